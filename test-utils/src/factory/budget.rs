//! Budget and expense factories.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test budgets.
pub struct BudgetFactory<'a> {
    db: &'a DatabaseConnection,
    owner_id: i32,
    trip_id: Option<i32>,
    name: String,
    total_amount: i64,
}

impl<'a> BudgetFactory<'a> {
    /// Defaults to an unlinked budget of 10,000.00 INR.
    pub fn new(db: &'a DatabaseConnection, owner_id: i32) -> Self {
        Self {
            db,
            owner_id,
            trip_id: None,
            name: format!("Budget {}", next_id()),
            total_amount: 1_000_000,
        }
    }

    pub fn trip_id(mut self, trip_id: i32) -> Self {
        self.trip_id = Some(trip_id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn total_amount(mut self, total_amount: i64) -> Self {
        self.total_amount = total_amount;
        self
    }

    pub async fn build(self) -> Result<entity::budget::Model, DbErr> {
        let now = Utc::now();
        entity::budget::ActiveModel {
            owner_id: ActiveValue::Set(self.owner_id),
            trip_id: ActiveValue::Set(self.trip_id),
            name: ActiveValue::Set(self.name),
            total_amount: ActiveValue::Set(self.total_amount),
            currency: ActiveValue::Set("INR".to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a budget with default values.
pub async fn create_budget(
    db: &DatabaseConnection,
    owner_id: i32,
) -> Result<entity::budget::Model, DbErr> {
    BudgetFactory::new(db, owner_id).build().await
}

/// Creates a `food` expense dated today.
pub async fn create_expense(
    db: &DatabaseConnection,
    budget_id: i32,
    paid_by: i32,
    amount: i64,
) -> Result<entity::expense::Model, DbErr> {
    let now = Utc::now();
    entity::expense::ActiveModel {
        budget_id: ActiveValue::Set(budget_id),
        paid_by: ActiveValue::Set(paid_by),
        category: ActiveValue::Set("food".to_string()),
        amount: ActiveValue::Set(amount),
        description: ActiveValue::Set(None),
        spent_on: ActiveValue::Set(now.date_naive()),
        created_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}
