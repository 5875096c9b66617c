//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories take the ids of the rows they depend on, and
//! `helpers` offers shortcuts that create the dependency chain in one call.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let user = factory::user::create_user(&db).await?;
//!     let trip = factory::trip::create_trip(&db, user.id).await?;
//!
//!     // Create a trip together with its organizer and membership row
//!     let (organizer, trip) = factory::helpers::create_trip_with_organizer(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let trip = factory::trip::TripFactory::new(&db, organizer.id)
//!     .title("Ladakh Road Trip")
//!     .price_per_person(150_000)
//!     .max_participants(4)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user entities
//! - `trip` - Create trips and trip memberships
//! - `budget` - Create budgets and expenses
//! - `story` - Create stories
//! - `club` - Create clubs and club memberships
//! - `wallet` - Create wallets with a starting balance
//! - `booking` - Create bookings
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod booking;
pub mod budget;
pub mod club;
pub mod helpers;
pub mod story;
pub mod trip;
pub mod user;
pub mod wallet;

pub use budget::{create_budget, create_expense};
pub use club::{create_club, create_club_member};
pub use story::create_story;
pub use trip::{create_trip, create_trip_member};
pub use user::create_user;
pub use wallet::create_wallet;
