//! Budget and expense service.
//!
//! A budget is readable and accepts expenses from its owner and, when it is linked to a
//! trip, from the members of that trip. Only the owner may change or delete it.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{budget::BudgetRepository, trip::TripRepository},
    error::{auth::AuthError, AppError},
    model::{
        budget::{
            Budget, BudgetSummary, CreateBudgetParams, CreateExpenseParams, Expense,
            UpdateBudgetParams,
        },
        pagination::Page,
    },
};

pub struct BudgetService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> BudgetService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// # Returns
    /// - `Err(AppError::BadRequest)` - Empty name or negative total
    /// - `Err(AppError::NotFound)` - Linked trip does not exist
    /// - `Err(AuthError::AccessDenied)` - Owner is not a member of the linked trip
    pub async fn create(&self, params: CreateBudgetParams) -> Result<Budget, AppError> {
        validate_budget_fields(Some(&params.name), Some(params.total_amount))?;

        if let Some(trip_id) = params.trip_id {
            let trip_repo = TripRepository::new(self.db);
            if trip_repo.find_by_id(trip_id).await?.is_none() {
                return Err(AppError::NotFound("Trip not found".to_string()));
            }
            if trip_repo
                .find_member_role(trip_id, params.owner_id)
                .await?
                .is_none()
            {
                return Err(AuthError::AccessDenied(
                    params.owner_id,
                    format!("User is not a member of trip {}", trip_id),
                )
                .into());
            }
        }

        Ok(BudgetRepository::new(self.db).create(params).await?)
    }

    /// Budget totals with spending broken down by category.
    pub async fn get_summary(&self, budget_id: i32, user_id: i32) -> Result<BudgetSummary, AppError> {
        let budget = self.accessible(budget_id, user_id).await?;
        let expenses = BudgetRepository::new(self.db)
            .list_expenses(budget.id)
            .await?;

        Ok(BudgetSummary::from_expenses(budget, &expenses))
    }

    pub async fn list_for_user(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Budget>, AppError> {
        let (budgets, total) = BudgetRepository::new(self.db)
            .list_for_owner(user_id, page, per_page)
            .await?;

        Ok(Page::new(budgets, total, page, per_page))
    }

    pub async fn update(
        &self,
        budget_id: i32,
        user_id: i32,
        params: UpdateBudgetParams,
    ) -> Result<Budget, AppError> {
        validate_budget_fields(params.name.as_deref(), params.total_amount)?;
        self.owned(budget_id, user_id).await?;

        BudgetRepository::new(self.db)
            .update(budget_id, params)
            .await?
            .ok_or_else(|| AppError::NotFound("Budget not found".to_string()))
    }

    pub async fn delete(&self, budget_id: i32, user_id: i32) -> Result<(), AppError> {
        self.owned(budget_id, user_id).await?;
        BudgetRepository::new(self.db).delete(budget_id).await?;

        Ok(())
    }

    /// # Returns
    /// - `Err(AppError::BadRequest)` - Amount is not positive
    pub async fn add_expense(&self, params: CreateExpenseParams) -> Result<Expense, AppError> {
        if params.amount <= 0 {
            return Err(AppError::BadRequest(
                "Expense amount must be greater than zero".to_string(),
            ));
        }
        self.accessible(params.budget_id, params.paid_by).await?;

        BudgetRepository::new(self.db).create_expense(params).await
    }

    /// Expenses of a budget, latest `spent_on` first.
    pub async fn list_expenses(&self, budget_id: i32, user_id: i32) -> Result<Vec<Expense>, AppError> {
        self.accessible(budget_id, user_id).await?;

        BudgetRepository::new(self.db).list_expenses(budget_id).await
    }

    /// Deletes an expense; allowed for the budget owner and for whoever paid it.
    pub async fn delete_expense(
        &self,
        budget_id: i32,
        expense_id: i32,
        user_id: i32,
    ) -> Result<(), AppError> {
        let budget = self.accessible(budget_id, user_id).await?;

        let repo = BudgetRepository::new(self.db);
        let expense = match repo.find_expense(expense_id).await? {
            Some(expense) if expense.budget_id == budget_id => expense,
            _ => return Err(AppError::NotFound("Expense not found".to_string())),
        };
        if budget.owner_id != user_id && expense.paid_by != user_id {
            return Err(AuthError::AccessDenied(
                user_id,
                format!("User may not delete expense {}", expense_id),
            )
            .into());
        }

        repo.delete_expense(expense_id).await?;

        Ok(())
    }

    async fn find(&self, budget_id: i32) -> Result<Budget, AppError> {
        BudgetRepository::new(self.db)
            .find_by_id(budget_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Budget not found".to_string()))
    }

    async fn owned(&self, budget_id: i32, user_id: i32) -> Result<Budget, AppError> {
        let budget = self.find(budget_id).await?;
        if budget.owner_id != user_id {
            return Err(AuthError::AccessDenied(
                user_id,
                format!("User does not own budget {}", budget_id),
            )
            .into());
        }

        Ok(budget)
    }

    async fn accessible(&self, budget_id: i32, user_id: i32) -> Result<Budget, AppError> {
        let budget = self.find(budget_id).await?;
        if budget.owner_id == user_id {
            return Ok(budget);
        }

        if let Some(trip_id) = budget.trip_id {
            let role = TripRepository::new(self.db)
                .find_member_role(trip_id, user_id)
                .await?;
            if role.is_some() {
                return Ok(budget);
            }
        }

        Err(AuthError::AccessDenied(
            user_id,
            format!("User has no access to budget {}", budget_id),
        )
        .into())
    }
}

fn validate_budget_fields(name: Option<&str>, total_amount: Option<i64>) -> Result<(), AppError> {
    if name.is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::BadRequest("Budget name is required".to_string()));
    }
    if total_amount.is_some_and(|t| t < 0) {
        return Err(AppError::BadRequest(
            "Budget total cannot be negative".to_string(),
        ));
    }

    Ok(())
}
