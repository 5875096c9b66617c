use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        budget::{
            BudgetDto, BudgetSummaryDto, CreateBudgetDto, CreateExpenseDto, ExpenseDto,
            PaginatedBudgetsDto, UpdateBudgetDto,
        },
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::AuthGuard,
        model::budget::{CreateBudgetParams, CreateExpenseParams, UpdateBudgetParams},
        service::budget::BudgetService,
        state::AppState,
    },
};

/// Tag for grouping budget endpoints in OpenAPI documentation
pub static BUDGET_TAG: &str = "budget";

/// Create a budget, optionally linked to a trip.
///
/// # Access Control
/// - Any logged-in user; linking a trip requires membership of that trip
///
/// # Returns
/// - `201 Created` - Budget created
/// - `400 Bad Request` - Empty name or negative total
/// - `403 Forbidden` - Not a member of the linked trip
/// - `404 Not Found` - Linked trip does not exist
#[utoipa::path(
    post,
    path = "/api/budgets",
    tag = BUDGET_TAG,
    request_body = CreateBudgetDto,
    responses(
        (status = 201, description = "Budget created", body = BudgetDto),
        (status = 400, description = "Invalid budget data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not a member of the linked trip", body = ErrorDto),
        (status = 404, description = "Trip not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_budget(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateBudgetDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let budget = BudgetService::new(&state.db)
        .create(CreateBudgetParams::from_dto(user.id, payload))
        .await?;

    Ok((StatusCode::CREATED, Json(budget.into_dto())))
}

/// List budgets owned by the logged-in user, newest first.
#[utoipa::path(
    get,
    path = "/api/budgets",
    tag = BUDGET_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Owned budgets", body = PaginatedBudgetsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_budgets(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let budgets = BudgetService::new(&state.db)
        .list_for_user(user.id, params.page, params.entries())
        .await?;

    Ok((StatusCode::OK, Json(budgets.into_dto())))
}

/// Get a budget with spent, remaining and per-category totals.
///
/// # Access Control
/// - Owner, or a member of the linked trip
#[utoipa::path(
    get,
    path = "/api/budgets/{budget_id}",
    tag = BUDGET_TAG,
    params(("budget_id" = i32, Path, description = "Budget ID")),
    responses(
        (status = 200, description = "Budget summary", body = BudgetSummaryDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "No access to this budget", body = ErrorDto),
        (status = 404, description = "Budget not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_budget(
    State(state): State<AppState>,
    session: Session,
    Path(budget_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let summary = BudgetService::new(&state.db)
        .get_summary(budget_id, user.id)
        .await?;

    Ok((StatusCode::OK, Json(summary.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/budgets/{budget_id}",
    tag = BUDGET_TAG,
    params(("budget_id" = i32, Path, description = "Budget ID")),
    request_body = UpdateBudgetDto,
    responses(
        (status = 200, description = "Budget updated", body = BudgetDto),
        (status = 400, description = "Invalid budget data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Budget not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_budget(
    State(state): State<AppState>,
    session: Session,
    Path(budget_id): Path<i32>,
    Json(payload): Json<UpdateBudgetDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let budget = BudgetService::new(&state.db)
        .update(budget_id, user.id, UpdateBudgetParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(budget.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/budgets/{budget_id}",
    tag = BUDGET_TAG,
    params(("budget_id" = i32, Path, description = "Budget ID")),
    responses(
        (status = 204, description = "Budget deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the owner", body = ErrorDto),
        (status = 404, description = "Budget not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_budget(
    State(state): State<AppState>,
    session: Session,
    Path(budget_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    BudgetService::new(&state.db)
        .delete(budget_id, user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Record an expense paid by the logged-in user.
///
/// # Returns
/// - `201 Created` - Expense recorded
/// - `400 Bad Request` - Unknown category or non-positive amount
/// - `403 Forbidden` - No access to this budget
/// - `404 Not Found` - Unknown budget
#[utoipa::path(
    post,
    path = "/api/budgets/{budget_id}/expenses",
    tag = BUDGET_TAG,
    params(("budget_id" = i32, Path, description = "Budget ID")),
    request_body = CreateExpenseDto,
    responses(
        (status = 201, description = "Expense recorded", body = ExpenseDto),
        (status = 400, description = "Invalid expense data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "No access to this budget", body = ErrorDto),
        (status = 404, description = "Budget not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_expense(
    State(state): State<AppState>,
    session: Session,
    Path(budget_id): Path<i32>,
    Json(payload): Json<CreateExpenseDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let expense = BudgetService::new(&state.db)
        .add_expense(CreateExpenseParams::from_dto(budget_id, user.id, payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(expense.into_dto())))
}

/// Expenses of a budget, most recent `spent_on` first.
#[utoipa::path(
    get,
    path = "/api/budgets/{budget_id}/expenses",
    tag = BUDGET_TAG,
    params(("budget_id" = i32, Path, description = "Budget ID")),
    responses(
        (status = 200, description = "Expenses", body = Vec<ExpenseDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "No access to this budget", body = ErrorDto),
        (status = 404, description = "Budget not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_expenses(
    State(state): State<AppState>,
    session: Session,
    Path(budget_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let expenses = BudgetService::new(&state.db)
        .list_expenses(budget_id, user.id)
        .await?;

    let expenses_dto: Vec<_> = expenses.into_iter().map(|e| e.into_dto()).collect();

    Ok((StatusCode::OK, Json(expenses_dto)))
}

/// Delete an expense. Allowed for the budget owner and the payer.
#[utoipa::path(
    delete,
    path = "/api/budgets/{budget_id}/expenses/{expense_id}",
    tag = BUDGET_TAG,
    params(
        ("budget_id" = i32, Path, description = "Budget ID"),
        ("expense_id" = i32, Path, description = "Expense ID")
    ),
    responses(
        (status = 204, description = "Expense deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the owner or payer", body = ErrorDto),
        (status = 404, description = "Budget or expense not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_expense(
    State(state): State<AppState>,
    session: Session,
    Path((budget_id, expense_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    BudgetService::new(&state.db)
        .delete_expense(budget_id, expense_id, user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
