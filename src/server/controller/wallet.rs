use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        wallet::{PaginatedWalletTransactionsDto, TopUpDto, WalletDto, WalletTransactionDto},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::AuthGuard,
        service::wallet::WalletService,
        state::AppState,
        util::parse::parse_idempotency_key,
    },
};

/// Tag for grouping wallet endpoints in OpenAPI documentation
pub static WALLET_TAG: &str = "wallet";

/// Get the logged-in user's wallet. A wallet is created at zero if missing.
#[utoipa::path(
    get,
    path = "/api/wallet",
    tag = WALLET_TAG,
    responses(
        (status = 200, description = "Wallet balance", body = WalletDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_wallet(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let wallet = WalletService::new(&state.db).get_wallet(user.id).await?;

    Ok((StatusCode::OK, Json(wallet.into_dto())))
}

/// Ledger of the logged-in user, newest first.
#[utoipa::path(
    get,
    path = "/api/wallet/transactions",
    tag = WALLET_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Wallet transactions", body = PaginatedWalletTransactionsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_transactions(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let transactions = WalletService::new(&state.db)
        .transactions(user.id, params.page, params.entries())
        .await?;

    Ok((StatusCode::OK, Json(transactions.into_dto())))
}

/// Credit the wallet after a client-side payment.
///
/// Requests carry an `Idempotency-Key` UUID header. Retrying with the same key and
/// amount returns the original transaction with `200 OK` and leaves the balance alone.
///
/// # Returns
/// - `201 Created` - New credit applied
/// - `200 OK` - Replay of an earlier request with the same key
/// - `400 Bad Request` - Missing or malformed key, or non-positive amount
/// - `409 Conflict` - Key already used with a different amount
#[utoipa::path(
    post,
    path = "/api/wallet/top-up",
    tag = WALLET_TAG,
    params(("Idempotency-Key" = String, Header, description = "Client-generated UUID")),
    request_body = TopUpDto,
    responses(
        (status = 201, description = "Wallet credited", body = WalletTransactionDto),
        (status = 200, description = "Replayed top-up", body = WalletTransactionDto),
        (status = 400, description = "Invalid amount or idempotency key", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 409, description = "Idempotency key reused", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn top_up(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Json(payload): Json<TopUpDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;
    let key = parse_idempotency_key(&headers)?;

    let outcome = WalletService::new(&state.db)
        .top_up(user.id, payload.amount, key)
        .await?;

    let status = if outcome.replayed {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((status, Json(outcome.transaction.into_dto())))
}
