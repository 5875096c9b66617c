//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including ID generation and convenience methods for creating entities
//! with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a user and a trip organized by that user.
///
/// The organizer membership row is inserted as well, mirroring what the trip
/// service does on creation.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((organizer, trip))` - Created user and trip
/// - `Err(DbErr)` - Database error during creation
pub async fn create_trip_with_organizer(
    db: &DatabaseConnection,
) -> Result<(entity::user::Model, entity::trip::Model), DbErr> {
    let organizer = crate::factory::user::create_user(db).await?;
    let trip = crate::factory::trip::create_trip(db, organizer.id).await?;
    crate::factory::trip::TripMemberFactory::new(db, trip.id, organizer.id)
        .role("organizer")
        .build()
        .await?;

    Ok((organizer, trip))
}

/// Creates a paid public trip and a separate user holding a funded wallet.
///
/// # Arguments
/// - `db` - Database connection
/// - `price_per_person` - Seat price in minor units
/// - `balance` - Starting wallet balance for the traveller
///
/// # Returns
/// - `Ok((organizer, trip, traveller))` - Created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_paid_trip_and_traveller(
    db: &DatabaseConnection,
    price_per_person: i64,
    balance: i64,
) -> Result<
    (
        entity::user::Model,
        entity::trip::Model,
        entity::user::Model,
    ),
    DbErr,
> {
    let organizer = crate::factory::user::create_user(db).await?;
    let trip = crate::factory::trip::TripFactory::new(db, organizer.id)
        .price_per_person(price_per_person)
        .build()
        .await?;
    crate::factory::trip::TripMemberFactory::new(db, trip.id, organizer.id)
        .role("organizer")
        .build()
        .await?;

    let traveller = crate::factory::user::create_user(db).await?;
    crate::factory::wallet::WalletFactory::new(db, traveller.id)
        .balance(balance)
        .build()
        .await?;

    Ok((organizer, trip, traveller))
}
