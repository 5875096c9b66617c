use axum::{http::StatusCode, response::Response};
use thiserror::Error;

use crate::server::error::error_response;

/// Violations of the wallet ledger rules.
#[derive(Error, Debug)]
pub enum WalletError {
    /// A debit would take the balance below zero. Nothing is written.
    #[error("Insufficient wallet balance: {balance} available, {requested} requested")]
    InsufficientFunds { balance: i64, requested: i64 },

    /// Ledger amounts must be strictly positive.
    #[error("Invalid amount {0}: amounts must be greater than zero")]
    InvalidAmount(i64),

    /// A ledger reference was replayed with a different amount, kind or owner.
    #[error("Ledger reference '{0}' was already used for a different operation")]
    IdempotencyConflict(String),
}

impl axum::response::IntoResponse for WalletError {
    fn into_response(self) -> Response {
        match self {
            Self::InsufficientFunds { .. } | Self::InvalidAmount(_) => {
                error_response(StatusCode::BAD_REQUEST, self.to_string())
            }
            Self::IdempotencyConflict(_) => error_response(
                StatusCode::CONFLICT,
                "Idempotency key was already used with a different request".to_string(),
            ),
        }
    }
}
