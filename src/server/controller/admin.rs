use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        wallet::{AdjustWalletDto, WalletTransactionDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::wallet::TransactionKind,
        service::wallet::WalletService,
        state::AppState,
    },
};

/// Tag for grouping admin endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

/// Credit or debit a user's wallet by hand.
///
/// The adjustment is recorded in the ledger with the given reason and the user is
/// notified.
///
/// # Access Control
/// - `Admin` - Only admins can adjust wallets
///
/// # Returns
/// - `201 Created` - Adjustment applied
/// - `400 Bad Request` - Unknown kind, non-positive amount, empty reason, or a
///   debit larger than the balance
/// - `403 Forbidden` - Caller is not an admin
/// - `404 Not Found` - Unknown user
#[utoipa::path(
    post,
    path = "/api/admin/users/{user_id}/wallet/adjust",
    tag = ADMIN_TAG,
    params(("user_id" = i32, Path, description = "User whose wallet is adjusted")),
    request_body = AdjustWalletDto,
    responses(
        (status = 201, description = "Adjustment applied", body = WalletTransactionDto),
        (status = 400, description = "Invalid adjustment", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn adjust_wallet(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
    Json(payload): Json<AdjustWalletDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let kind = TransactionKind::parse(&payload.kind).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unknown adjustment kind '{}', expected credit or debit",
            payload.kind
        ))
    })?;

    let transaction = WalletService::new(&state.db)
        .adjust(user_id, kind, payload.amount, &payload.reason)
        .await?;

    Ok((StatusCode::CREATED, Json(transaction.into_dto())))
}
