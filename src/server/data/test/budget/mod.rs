use crate::server::{
    data::budget::BudgetRepository,
    error::AppError,
    model::budget::{CreateBudgetParams, CreateExpenseParams, ExpenseCategory, UpdateBudgetParams},
};
use chrono::NaiveDate;
use test_utils::{builder::TestBuilder, factory};

mod budgets;
mod expenses;
