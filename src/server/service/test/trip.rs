use chrono::{Days, Utc};

use crate::server::{
    data::booking::BookingRepository,
    error::AppError,
    model::{
        booking::{BookingStatus, CreateBookingParams},
        notification::NotificationKind,
        trip::{CreateTripParams, Trip, TripRole, TripStatus, UpdateTripParams},
        user::User,
    },
    service::{
        booking::BookingService, notification::NotificationService, trip::TripService,
        wallet::WalletService,
    },
};
use test_utils::{builder::TestBuilder, factory};

use super::{assert_status, test_cache};

fn create_params(organizer_id: i32) -> CreateTripParams {
    let start = Utc::now().date_naive() + Days::new(20);
    CreateTripParams {
        organizer_id,
        title: "Hampi Ruins".to_string(),
        description: Some("Boulders and temples".to_string()),
        destination: "Hampi".to_string(),
        start_date: start,
        end_date: start + Days::new(3),
        is_public: true,
        max_participants: 2,
        price_per_person: 0,
        currency: "INR".to_string(),
        tags: vec!["heritage".to_string()],
        cover_image_url: None,
    }
}

/// Tests that creation adds the organizer as a member.
///
/// Expected: one member with the organizer role
#[tokio::test]
async fn create_adds_organizer_membership() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<Trip>();

    let organizer = factory::user::create_user(db).await?;

    let service = TripService::new(db, &cache);
    let trip = service.create(create_params(organizer.id)).await?;
    let members = service.members(trip.id, organizer.id).await?;

    assert_eq!(trip.status, TripStatus::Planning);
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].user.id, organizer.id);
    assert_eq!(members[0].role, TripRole::Organizer);

    Ok(())
}

/// Tests trip validation.
///
/// Expected: 400 for an end date before the start date
#[tokio::test]
async fn create_rejects_inverted_dates() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<Trip>();

    let organizer = factory::user::create_user(db).await?;
    let mut params = create_params(organizer.id);
    params.end_date = params.start_date - Days::new(1);

    assert_status(TripService::new(db, &cache).create(params).await, 400);

    Ok(())
}

/// Tests that private trips are hidden from non-members.
///
/// Expected: 404 for a stranger, Ok for a member
#[tokio::test]
async fn private_trip_visible_to_members_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<Trip>();

    let organizer = factory::user::create_user(db).await?;
    let member = factory::user::create_user(db).await?;
    let stranger = factory::user::create_user(db).await?;
    let trip = factory::trip::TripFactory::new(db, organizer.id)
        .is_public(false)
        .build()
        .await?;
    factory::trip::create_trip_member(db, trip.id, member.id).await?;

    let service = TripService::new(db, &cache);
    assert_status(service.get(trip.id, stranger.id).await, 404);
    assert_eq!(service.get(trip.id, member.id).await?.id, trip.id);
    assert_eq!(service.get(trip.id, organizer.id).await?.id, trip.id);

    Ok(())
}

/// Tests update permissions and cache invalidation.
///
/// Expected: 403 for a non-organizer; the organizer's change is visible on the next read
#[tokio::test]
async fn update_is_organizer_only_and_refreshes_cache() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<Trip>();

    let (organizer, trip) = factory::helpers::create_trip_with_organizer(db).await?;
    let other = factory::user::create_user(db).await?;

    let service = TripService::new(db, &cache);
    service.get(trip.id, organizer.id).await?;

    let rename = UpdateTripParams {
        title: Some("Renamed trip".to_string()),
        ..Default::default()
    };
    assert_status(service.update(trip.id, other.id, rename.clone()).await, 403);

    service.update(trip.id, organizer.id, rename).await?;
    assert_eq!(service.get(trip.id, organizer.id).await?.title, "Renamed trip");

    Ok(())
}

/// Tests that an update is validated against the stored trip.
///
/// Expected: 400 when only the end date moves before the stored start date
#[tokio::test]
async fn update_validates_merged_dates() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<Trip>();

    let (organizer, trip) = factory::helpers::create_trip_with_organizer(db).await?;

    let result = TripService::new(db, &cache)
        .update(
            trip.id,
            organizer.id,
            UpdateTripParams {
                end_date: Some(trip.start_date - Days::new(1)),
                ..Default::default()
            },
        )
        .await;

    assert_status(result, 400);

    Ok(())
}

/// Tests joining a free trip until it is full.
///
/// Expected: first join succeeds and notifies the organizer, second is rejected as full
#[tokio::test]
async fn join_respects_capacity_and_notifies() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<Trip>();

    let organizer = factory::user::create_user(db).await?;
    let trip = factory::trip::TripFactory::new(db, organizer.id)
        .max_participants(2)
        .build()
        .await?;
    factory::trip::TripMemberFactory::new(db, trip.id, organizer.id)
        .role("organizer")
        .build()
        .await?;
    let first = factory::user::create_user(db).await?;
    let second = factory::user::create_user(db).await?;

    let service = TripService::new(db, &cache);
    service.join(trip.id, first.id).await?;
    assert_status(service.join(trip.id, first.id).await, 409);
    assert_status(service.join(trip.id, second.id).await, 400);

    let notifications = NotificationService::new(db)
        .list(organizer.id, false, 0, 10)
        .await?;
    assert_eq!(notifications.items[0].kind, NotificationKind::TripJoin);

    Ok(())
}

/// Tests that paid and closed trips cannot be joined directly.
///
/// Expected: 400 for both
#[tokio::test]
async fn join_rejects_paid_and_closed_trips() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<Trip>();

    let organizer = factory::user::create_user(db).await?;
    let traveller = factory::user::create_user(db).await?;
    let paid = factory::trip::TripFactory::new(db, organizer.id)
        .price_per_person(100_000)
        .build()
        .await?;
    let cancelled = factory::trip::TripFactory::new(db, organizer.id)
        .status("cancelled")
        .build()
        .await?;

    let service = TripService::new(db, &cache);
    assert_status(service.join(paid.id, traveller.id).await, 400);
    assert_status(service.join(cancelled.id, traveller.id).await, 400);

    Ok(())
}

/// Tests leaving a trip.
///
/// Expected: participant leaves, organizer cannot, non-member gets 404
#[tokio::test]
async fn leave_rules() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<Trip>();

    let (organizer, trip) = factory::helpers::create_trip_with_organizer(db).await?;
    let traveller = factory::user::create_user(db).await?;
    factory::trip::create_trip_member(db, trip.id, traveller.id).await?;

    let service = TripService::new(db, &cache);
    service.leave(trip.id, traveller.id).await?;
    assert_status(service.leave(trip.id, traveller.id).await, 404);
    assert_status(service.leave(trip.id, organizer.id).await, 400);

    Ok(())
}

/// Tests delete permissions.
///
/// Expected: 403 for a stranger, Ok for an admin
#[tokio::test]
async fn delete_allowed_for_organizer_or_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<Trip>();

    let (organizer, trip) = factory::helpers::create_trip_with_organizer(db).await?;
    let stranger = User::from_entity(factory::user::create_user(db).await?);
    let admin = User::from_entity(
        factory::user::UserFactory::new(db)
            .admin(true)
            .build()
            .await?,
    );

    let service = TripService::new(db, &cache);
    assert_status(service.delete(trip.id, &stranger).await, 403);
    service.delete(trip.id, &admin).await?;
    assert_status(service.get(trip.id, organizer.id).await, 404);

    Ok(())
}

/// Tests that deleting a trip refunds the wallet share of its bookings.
///
/// Expected: balance restored, traveller notified of the cancellation
#[tokio::test]
async fn delete_refunds_wallet_bookings() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<Trip>();

    let (organizer, trip, traveller) =
        factory::helpers::create_paid_trip_and_traveller(db, 10_000, 25_000).await?;
    BookingService::new(db, chrono::Duration::minutes(30))
        .create(CreateBookingParams {
            user_id: traveller.id,
            trip_id: trip.id,
            seats: 2,
            use_wallet: true,
        })
        .await?;

    let wallet = WalletService::new(db);
    assert_eq!(wallet.get_wallet(traveller.id).await?.balance, 5_000);

    TripService::new(db, &cache)
        .delete(trip.id, &User::from_entity(organizer))
        .await?;

    assert_eq!(wallet.get_wallet(traveller.id).await?.balance, 25_000);

    let notifications = NotificationService::new(db)
        .list(traveller.id, false, 0, 10)
        .await?;
    assert_eq!(notifications.items[0].kind, NotificationKind::BookingCancelled);

    Ok(())
}

/// Tests that the organizer cannot move a trip to an arbitrary status.
///
/// Expected: 400 for reopening a completed trip and for cancelling it
#[tokio::test]
async fn update_rejects_status_other_than_cancelled() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<Trip>();

    let organizer = factory::user::create_user(db).await?;
    let today = Utc::now().date_naive();
    let completed = factory::trip::TripFactory::new(db, organizer.id)
        .dates(today - Days::new(6), today - Days::new(2))
        .status("completed")
        .build()
        .await?;

    let service = TripService::new(db, &cache);
    for status in [TripStatus::Planning, TripStatus::Cancelled] {
        let result = service
            .update(
                completed.id,
                organizer.id,
                UpdateTripParams {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .await;
        assert_status(result, 400);
    }

    assert_eq!(
        service.get(completed.id, organizer.id).await?.status,
        TripStatus::Completed
    );

    Ok(())
}

/// Tests cancelling a trip through an update.
///
/// Expected: trip cancelled, its booking cancelled and the wallet share refunded
#[tokio::test]
async fn cancelling_trip_releases_bookings() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<Trip>();

    let (organizer, trip, traveller) =
        factory::helpers::create_paid_trip_and_traveller(db, 10_000, 4_000).await?;
    let booking = BookingService::new(db, chrono::Duration::minutes(30))
        .create(CreateBookingParams {
            user_id: traveller.id,
            trip_id: trip.id,
            seats: 1,
            use_wallet: true,
        })
        .await?;
    assert_eq!(booking.status, BookingStatus::PendingPayment);

    let updated = TripService::new(db, &cache)
        .update(
            trip.id,
            organizer.id,
            UpdateTripParams {
                status: Some(TripStatus::Cancelled),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.status, TripStatus::Cancelled);

    let stored = BookingRepository::new(db)
        .find_by_id(booking.id)
        .await?
        .expect("booking kept");
    assert_eq!(stored.status, BookingStatus::Cancelled);
    assert_eq!(
        WalletService::new(db).get_wallet(traveller.id).await?.balance,
        4_000
    );

    Ok(())
}

/// Tests the date-driven status transitions.
///
/// Expected: one trip started and one completed
#[tokio::test]
async fn applies_status_transitions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<Trip>();

    let organizer = factory::user::create_user(db).await?;
    let today = Utc::now().date_naive();
    let starting = factory::trip::TripFactory::new(db, organizer.id)
        .dates(today, today + Days::new(2))
        .status("planning")
        .build()
        .await?;
    let ending = factory::trip::TripFactory::new(db, organizer.id)
        .dates(today - Days::new(4), today - Days::new(1))
        .status("ongoing")
        .build()
        .await?;

    let service = TripService::new(db, &cache);
    service.get(starting.id, organizer.id).await?;

    let transitions = service.apply_status_transitions(today).await?;

    assert_eq!(transitions.started, 1);
    assert_eq!(transitions.completed, 1);
    assert_eq!(
        service.get(starting.id, organizer.id).await?.status,
        TripStatus::Ongoing
    );
    assert_eq!(
        service.get(ending.id, organizer.id).await?.status,
        TripStatus::Completed
    );

    Ok(())
}
