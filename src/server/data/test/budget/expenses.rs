use super::*;

/// Tests recording an expense.
///
/// Expected: Ok with the parsed category
#[tokio::test]
async fn creates_expense() -> Result<(), AppError> {
    let test = TestBuilder::new().with_budget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let budget = factory::budget::create_budget(db, owner.id).await?;

    let expense = BudgetRepository::new(db)
        .create_expense(CreateExpenseParams {
            budget_id: budget.id,
            paid_by: owner.id,
            category: ExpenseCategory::Transport,
            amount: 120_000,
            description: Some("Train to Madgaon".to_string()),
            spent_on: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
        })
        .await?;

    assert_eq!(expense.category, ExpenseCategory::Transport);
    assert_eq!(expense.amount, 120_000);
    assert_eq!(expense.budget_id, budget.id);

    Ok(())
}

/// Tests that expenses are listed with the latest `spent_on` first.
///
/// Expected: Ok in descending date order
#[tokio::test]
async fn lists_latest_spent_on_first() -> Result<(), AppError> {
    let test = TestBuilder::new().with_budget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let budget = factory::budget::create_budget(db, owner.id).await?;

    let repo = BudgetRepository::new(db);
    for day in [3, 9, 5] {
        repo.create_expense(CreateExpenseParams {
            budget_id: budget.id,
            paid_by: owner.id,
            category: ExpenseCategory::Food,
            amount: 1_000,
            description: None,
            spent_on: NaiveDate::from_ymd_opt(2026, 5, day).unwrap(),
        })
        .await?;
    }

    let expenses = repo.list_expenses(budget.id).await?;
    let days: Vec<NaiveDate> = expenses.iter().map(|e| e.spent_on).collect();

    assert_eq!(
        days,
        vec![
            NaiveDate::from_ymd_opt(2026, 5, 9).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 5).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 3).unwrap(),
        ]
    );

    Ok(())
}

/// Tests deleting an expense.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn deletes_expense() -> Result<(), AppError> {
    let test = TestBuilder::new().with_budget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let budget = factory::budget::create_budget(db, owner.id).await?;
    let expense = factory::budget::create_expense(db, budget.id, owner.id, 700).await?;

    let repo = BudgetRepository::new(db);
    assert!(repo.delete_expense(expense.id).await?);
    assert!(!repo.delete_expense(expense.id).await?);

    Ok(())
}
