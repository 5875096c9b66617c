use std::time::Duration;

use crate::server::{error::AppError, service::cache::TtlCache};

mod auth;
mod club;
mod follow;
mod story;
mod trip;

/// A cache that keeps entries for the duration of a test.
fn test_cache<V: Clone>() -> TtlCache<i32, V> {
    TtlCache::new(Duration::from_secs(60))
}

/// Asserts that a result failed with an HTTP-level error of the given kind.
fn assert_status<T: std::fmt::Debug>(result: Result<T, AppError>, expected: u16) {
    use axum::response::IntoResponse;

    let err = result.expect_err("expected an error");
    assert_eq!(err.into_response().status().as_u16(), expected);
}
