use axum::{http::StatusCode, response::Response};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user id is stored in the session.
    #[error("User not found in session")]
    UserNotInSession,

    /// The session refers to a user that no longer exists.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// The user is authenticated but not allowed to perform the action.
    ///
    /// # Fields
    /// - User id
    /// - Reason, logged server-side only
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),

    /// Login with an unknown email or a wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` → 401 Unauthorized with "Not logged in"
/// - `InvalidCredentials` → 401 Unauthorized with a single generic message
/// - `AccessDenied` → 403 Forbidden; the detailed reason is only logged
impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => {
                error_response(StatusCode::UNAUTHORIZED, "Not logged in".to_string())
            }
            Self::InvalidCredentials => error_response(
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            Self::AccessDenied(_, _) => {
                error_response(StatusCode::FORBIDDEN, "Access denied".to_string())
            }
        }
    }
}
