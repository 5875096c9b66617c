//! Budget and expense domain models.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    model::budget::{
        BudgetDto, BudgetSummaryDto, CategoryTotalDto, CreateBudgetDto, CreateExpenseDto,
        ExpenseDto, PaginatedBudgetsDto, UpdateBudgetDto,
    },
    server::{
        error::{internal::InternalError, AppError},
        model::{pagination::Page, trip::DEFAULT_CURRENCY},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Transport,
    Accommodation,
    Food,
    Activities,
    Shopping,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 6] = [
        Self::Transport,
        Self::Accommodation,
        Self::Food,
        Self::Activities,
        Self::Shopping,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Accommodation => "accommodation",
            Self::Food => "food",
            Self::Activities => "activities",
            Self::Shopping => "shopping",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }

    pub fn from_stored(value: &str) -> Result<Self, InternalError> {
        Self::parse(value).ok_or_else(|| InternalError::UnknownEnumValue {
            kind: "expense category",
            value: value.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: i32,
    pub owner_id: i32,
    pub trip_id: Option<i32>,
    pub name: String,
    pub total_amount: i64,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn from_entity(entity: entity::budget::Model) -> Self {
        Self {
            id: entity.id,
            owner_id: entity.owner_id,
            trip_id: entity.trip_id,
            name: entity.name,
            total_amount: entity.total_amount,
            currency: entity.currency,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> BudgetDto {
        BudgetDto {
            id: self.id,
            owner_id: self.owner_id,
            trip_id: self.trip_id,
            name: self.name,
            total_amount: self.total_amount,
            currency: self.currency,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Page<Budget> {
    pub fn into_dto(self) -> PaginatedBudgetsDto {
        PaginatedBudgetsDto {
            budgets: self.items.into_iter().map(Budget::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i32,
    pub budget_id: i32,
    pub paid_by: i32,
    pub category: ExpenseCategory,
    pub amount: i64,
    pub description: Option<String>,
    pub spent_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn from_entity(entity: entity::expense::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            budget_id: entity.budget_id,
            paid_by: entity.paid_by,
            category: ExpenseCategory::from_stored(&entity.category)?,
            amount: entity.amount,
            description: entity.description,
            spent_on: entity.spent_on,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> ExpenseDto {
        ExpenseDto {
            id: self.id,
            budget_id: self.budget_id,
            paid_by: self.paid_by,
            category: self.category.as_str().to_string(),
            amount: self.amount,
            description: self.description,
            spent_on: self.spent_on,
            created_at: self.created_at,
        }
    }
}

/// Budget with totals derived from its expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSummary {
    pub budget: Budget,
    pub spent: i64,
    /// `total_amount - spent`; negative when over budget.
    pub remaining: i64,
    pub over_budget: bool,
    /// Totals for categories with at least one expense, in `ExpenseCategory::ALL` order.
    pub by_category: Vec<(ExpenseCategory, i64)>,
}

impl BudgetSummary {
    pub fn from_expenses(budget: Budget, expenses: &[Expense]) -> Self {
        let spent: i64 = expenses.iter().map(|e| e.amount).sum();
        let remaining = budget.total_amount - spent;

        let by_category = ExpenseCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let total: i64 = expenses
                    .iter()
                    .filter(|e| e.category == category)
                    .map(|e| e.amount)
                    .sum();
                (total > 0).then_some((category, total))
            })
            .collect();

        Self {
            over_budget: spent > budget.total_amount,
            budget,
            spent,
            remaining,
            by_category,
        }
    }

    pub fn into_dto(self) -> BudgetSummaryDto {
        BudgetSummaryDto {
            budget: self.budget.into_dto(),
            spent: self.spent,
            remaining: self.remaining,
            over_budget: self.over_budget,
            by_category: self
                .by_category
                .into_iter()
                .map(|(category, amount)| CategoryTotalDto {
                    category: category.as_str().to_string(),
                    amount,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBudgetParams {
    pub owner_id: i32,
    pub trip_id: Option<i32>,
    pub name: String,
    pub total_amount: i64,
    pub currency: String,
}

impl CreateBudgetParams {
    pub fn from_dto(owner_id: i32, dto: CreateBudgetDto) -> Self {
        Self {
            owner_id,
            trip_id: dto.trip_id,
            name: dto.name,
            total_amount: dto.total_amount,
            currency: dto
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateBudgetParams {
    pub name: Option<String>,
    pub total_amount: Option<i64>,
}

impl UpdateBudgetParams {
    pub fn from_dto(dto: UpdateBudgetDto) -> Self {
        Self {
            name: dto.name,
            total_amount: dto.total_amount,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateExpenseParams {
    pub budget_id: i32,
    pub paid_by: i32,
    pub category: ExpenseCategory,
    pub amount: i64,
    pub description: Option<String>,
    pub spent_on: NaiveDate,
}

impl CreateExpenseParams {
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Unknown category
    pub fn from_dto(budget_id: i32, paid_by: i32, dto: CreateExpenseDto) -> Result<Self, AppError> {
        let category = ExpenseCategory::parse(&dto.category).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown expense category '{}'", dto.category))
        })?;

        Ok(Self {
            budget_id,
            paid_by,
            category,
            amount: dto.amount,
            description: dto.description,
            spent_on: dto.spent_on.unwrap_or_else(|| Utc::now().date_naive()),
        })
    }
}
