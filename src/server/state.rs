//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into every handler through
//! Axum's state extraction. It holds:
//! - The database connection pool
//! - The trip and profile TTL caches
//! - The booking payment window

use sea_orm::DatabaseConnection;

use crate::server::{
    model::{trip::Trip, user::UserProfile},
    service::cache::TtlCache,
};

/// Application state containing shared resources.
///
/// Every field is cheap to clone: the connection is a pool handle and the caches
/// share their storage between clones.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Trip details keyed by trip id.
    pub trip_cache: TtlCache<i32, Trip>,

    /// Public profiles keyed by user id.
    pub profile_cache: TtlCache<i32, UserProfile>,

    /// How long a booking may wait for its gateway payment.
    pub payment_window: chrono::Duration,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        cache_ttl: std::time::Duration,
        payment_window: chrono::Duration,
    ) -> Self {
        Self {
            db,
            trip_cache: TtlCache::new(cache_ttl),
            profile_cache: TtlCache::new(cache_ttl),
            payment_window,
        }
    }
}
