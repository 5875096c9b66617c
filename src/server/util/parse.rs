use axum::http::HeaderMap;
use uuid::Uuid;

use crate::server::error::{internal::InternalError, AppError};

/// Header carrying the client-generated key used to deduplicate wallet top-ups.
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

/// Extracts and parses the `Idempotency-Key` header as a UUID.
///
/// # Returns
/// - `Ok(Uuid)` - Header present and a valid UUID
/// - `Err(AppError::BadRequest)` - Header missing or not a UUID
pub fn parse_idempotency_key(headers: &HeaderMap) -> Result<Uuid, AppError> {
    let value = headers
        .get(IDEMPOTENCY_KEY_HEADER)
        .ok_or_else(|| AppError::BadRequest("Missing Idempotency-Key header".to_string()))?;

    value
        .to_str()
        .ok()
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
        .ok_or_else(|| AppError::BadRequest("Idempotency-Key must be a UUID".to_string()))
}

/// Reads a JSON array of strings stored in a `tags` column.
///
/// # Returns
/// - `Ok(Vec<String>)` - Parsed tags (`null` yields an empty list)
/// - `Err(AppError::InternalErr(MalformedJson))` - Stored JSON is not a string array
pub fn parse_tags(value: serde_json::Value) -> Result<Vec<String>, AppError> {
    if value.is_null() {
        return Ok(Vec::new());
    }

    let tags = serde_json::from_value(value).map_err(|source| InternalError::MalformedJson {
        field: "tags",
        source,
    })?;

    Ok(tags)
}
