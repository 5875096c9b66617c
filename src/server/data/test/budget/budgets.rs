use super::*;

/// Tests creating a budget and reading it back.
///
/// Expected: Ok with the stored fields
#[tokio::test]
async fn creates_and_finds_budget() -> Result<(), AppError> {
    let test = TestBuilder::new().with_budget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;

    let repo = BudgetRepository::new(db);
    let budget = repo
        .create(CreateBudgetParams {
            owner_id: owner.id,
            trip_id: None,
            name: "Goa weekend".to_string(),
            total_amount: 1_500_000,
            currency: "INR".to_string(),
        })
        .await?;

    assert_eq!(repo.find_by_id(budget.id).await?, Some(budget));

    Ok(())
}

/// Tests that listing only returns the owner's budgets.
///
/// Expected: Ok with two budgets for the owner
#[tokio::test]
async fn lists_budgets_for_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_budget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;
    factory::budget::create_budget(db, owner.id).await?;
    factory::budget::create_budget(db, owner.id).await?;
    factory::budget::create_budget(db, other.id).await?;

    let (budgets, total) = BudgetRepository::new(db)
        .list_for_owner(owner.id, 0, 10)
        .await?;

    assert_eq!(total, 2);
    assert!(budgets.iter().all(|b| b.owner_id == owner.id));

    Ok(())
}

/// Tests a partial update.
///
/// Expected: Ok(Some(budget)) with the new total and unchanged name
#[tokio::test]
async fn updates_total_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_budget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let budget = factory::budget::BudgetFactory::new(db, owner.id)
        .name("Kept")
        .build()
        .await?;

    let updated = BudgetRepository::new(db)
        .update(
            budget.id,
            UpdateBudgetParams {
                name: None,
                total_amount: Some(42_000),
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "Kept");
    assert_eq!(updated.total_amount, 42_000);

    Ok(())
}

/// Tests that deleting a budget removes its expenses.
///
/// Expected: Ok(true) and the expense is gone
#[tokio::test]
async fn delete_cascades_to_expenses() -> Result<(), AppError> {
    let test = TestBuilder::new().with_budget_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let budget = factory::budget::create_budget(db, owner.id).await?;
    let expense = factory::budget::create_expense(db, budget.id, owner.id, 5_000).await?;

    let repo = BudgetRepository::new(db);
    assert!(repo.delete(budget.id).await?);
    assert!(repo.find_expense(expense.id).await?.is_none());

    Ok(())
}
