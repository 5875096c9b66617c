//! HTTP handlers.
//!
//! Handlers authenticate through `AuthGuard`, convert DTOs into service
//! parameters, and convert domain results back into DTOs.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod budget;
pub mod club;
pub mod notification;
pub mod story;
pub mod trip;
pub mod user;
pub mod wallet;

use serde::Deserialize;
use utoipa::IntoParams;

const MAX_ENTRIES: u64 = 100;

/// Zero-indexed page selection shared by every list endpoint.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (default: 0)
    #[serde(default)]
    pub page: u64,
    /// Items per page, 1 to 100 (default: 10)
    #[serde(default = "default_entries")]
    pub entries: u64,
}

impl PaginationParams {
    /// Page size clamped to the accepted range.
    pub fn entries(&self) -> u64 {
        self.entries.clamp(1, MAX_ENTRIES)
    }
}

fn default_entries() -> u64 {
    10
}
