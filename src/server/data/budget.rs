//! Budget and expense repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::budget::{
        Budget, CreateBudgetParams, CreateExpenseParams, Expense, UpdateBudgetParams,
    },
};

pub struct BudgetRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BudgetRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateBudgetParams) -> Result<Budget, DbErr> {
        let now = Utc::now();
        let entity = entity::budget::ActiveModel {
            owner_id: ActiveValue::Set(params.owner_id),
            trip_id: ActiveValue::Set(params.trip_id),
            name: ActiveValue::Set(params.name),
            total_amount: ActiveValue::Set(params.total_amount),
            currency: ActiveValue::Set(params.currency),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Budget::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Budget>, DbErr> {
        let entity = entity::prelude::Budget::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Budget::from_entity))
    }

    /// Budgets owned by the user, most recently created first.
    pub async fn list_for_owner(
        &self,
        owner_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Budget>, u64), DbErr> {
        let paginator = entity::prelude::Budget::find()
            .filter(entity::budget::Column::OwnerId.eq(owner_id))
            .order_by_desc(entity::budget::Column::CreatedAt)
            .order_by_desc(entity::budget::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let budgets = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(Budget::from_entity)
            .collect();

        Ok((budgets, total))
    }

    pub async fn update(
        &self,
        id: i32,
        params: UpdateBudgetParams,
    ) -> Result<Option<Budget>, DbErr> {
        let Some(entity) = entity::prelude::Budget::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::budget::ActiveModel = entity.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(total_amount) = params.total_amount {
            active.total_amount = ActiveValue::Set(total_amount);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let updated = active.update(self.db).await?;

        Ok(Some(Budget::from_entity(updated)))
    }

    /// Deletes a budget and, by cascade, its expenses.
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Budget::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn create_expense(&self, params: CreateExpenseParams) -> Result<Expense, AppError> {
        let entity = entity::expense::ActiveModel {
            budget_id: ActiveValue::Set(params.budget_id),
            paid_by: ActiveValue::Set(params.paid_by),
            category: ActiveValue::Set(params.category.as_str().to_string()),
            amount: ActiveValue::Set(params.amount),
            description: ActiveValue::Set(params.description),
            spent_on: ActiveValue::Set(params.spent_on),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Expense::from_entity(entity)
    }

    pub async fn find_expense(&self, id: i32) -> Result<Option<Expense>, AppError> {
        entity::prelude::Expense::find_by_id(id)
            .one(self.db)
            .await?
            .map(Expense::from_entity)
            .transpose()
    }

    /// All expenses of a budget, latest `spent_on` first.
    pub async fn list_expenses(&self, budget_id: i32) -> Result<Vec<Expense>, AppError> {
        entity::prelude::Expense::find()
            .filter(entity::expense::Column::BudgetId.eq(budget_id))
            .order_by_desc(entity::expense::Column::SpentOn)
            .order_by_desc(entity::expense::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Expense::from_entity)
            .collect()
    }

    pub async fn delete_expense(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Expense::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
