use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct BudgetDto {
    pub id: i32,
    pub owner_id: i32,
    pub trip_id: Option<i32>,
    pub name: String,
    pub total_amount: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CategoryTotalDto {
    pub category: String,
    pub amount: i64,
}

/// Budget with derived spending figures. `remaining` goes negative when over budget.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct BudgetSummaryDto {
    pub budget: BudgetDto,
    pub spent: i64,
    pub remaining: i64,
    pub over_budget: bool,
    pub by_category: Vec<CategoryTotalDto>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CreateBudgetDto {
    pub name: String,
    pub total_amount: i64,
    pub currency: Option<String>,
    pub trip_id: Option<i32>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, Default, ToSchema)]
pub struct UpdateBudgetDto {
    pub name: Option<String>,
    pub total_amount: Option<i64>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct ExpenseDto {
    pub id: i32,
    pub budget_id: i32,
    pub paid_by: i32,
    pub category: String,
    pub amount: i64,
    pub description: Option<String>,
    pub spent_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CreateExpenseDto {
    pub category: String,
    pub amount: i64,
    pub description: Option<String>,
    /// Defaults to today (UTC) when omitted.
    pub spent_on: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PaginatedBudgetsDto {
    pub budgets: Vec<BudgetDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
