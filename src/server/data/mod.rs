//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//!
//! Repositories are generic over `ConnectionTrait` so the same code runs against the
//! connection pool or inside a `DatabaseTransaction` when a service needs several writes
//! to succeed or fail together.

pub mod booking;
pub mod budget;
pub mod club;
pub mod follow;
pub mod notification;
pub mod story;
pub mod trip;
pub mod user;
pub mod wallet;

use sea_orm::sea_query::LikeExpr;

/// Escape character used in `LIKE` patterns built by [`contains_pattern`].
const LIKE_ESCAPE: char = '\\';

/// Builds a `LIKE` pattern matching `text` anywhere in a value.
///
/// `%` and `_` in `text` match only themselves.
pub(crate) fn contains_pattern(text: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped.push('%');

    LikeExpr::new(escaped).escape(LIKE_ESCAPE)
}

#[cfg(test)]
mod test;
