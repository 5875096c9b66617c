//! SeaORM entities for the Wander Sphere schema.
//!
//! One module per table. Enumerated columns (statuses, roles, kinds) are plain
//! strings here and are parsed into typed enums by the server's repository layer.

pub mod prelude;

pub mod booking;
pub mod budget;
pub mod club;
pub mod club_member;
pub mod expense;
pub mod follow;
pub mod notification;
pub mod story;
pub mod story_like;
pub mod trip;
pub mod trip_member;
pub mod user;
pub mod wallet;
pub mod wallet_transaction;
