use super::*;

/// Tests inserting a booking.
///
/// Verifies that the gateway amount is derived from the total and wallet portion.
///
/// Expected: Ok with gateway_amount = total - wallet
#[tokio::test]
async fn creates_booking_with_gateway_remainder() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, trip, traveller) =
        factory::helpers::create_paid_trip_and_traveller(db, 50_000, 0).await?;

    let repo = BookingRepository::new(db);
    let booking = repo
        .create(NewBooking {
            user_id: traveller.id,
            trip_id: trip.id,
            seats: 2,
            total_amount: 100_000,
            wallet_amount: 30_000,
            status: BookingStatus::PendingPayment,
            confirmation_code: "WS-ABCD1234".to_string(),
            expires_at: Some(Utc::now() + Duration::minutes(30)),
        })
        .await?;

    assert_eq!(booking.gateway_amount, 70_000);
    assert_eq!(booking.status, BookingStatus::PendingPayment);
    assert!(repo.confirmation_code_exists("WS-ABCD1234").await?);
    assert!(!repo.confirmation_code_exists("WS-OTHER000").await?);
    assert_eq!(repo.find_by_id(booking.id).await?, Some(booking));

    Ok(())
}

/// Tests listing bookings by user and by trip.
///
/// Expected: Ok with one booking per user and both on the trip
#[tokio::test]
async fn lists_by_user_and_trip() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, trip, traveller) =
        factory::helpers::create_paid_trip_and_traveller(db, 50_000, 0).await?;
    let other = factory::user::create_user(db).await?;
    factory::booking::BookingFactory::new(db, traveller.id, trip.id)
        .build()
        .await?;
    factory::booking::BookingFactory::new(db, other.id, trip.id)
        .build()
        .await?;

    let repo = BookingRepository::new(db);
    let (mine, total) = repo.list_for_user(traveller.id, 0, 10).await?;
    assert_eq!(total, 1);
    assert_eq!(mine[0].user_id, traveller.id);

    let (_, trip_total) = repo.list_for_trip(trip.id, 0, 10).await?;
    assert_eq!(trip_total, 2);

    Ok(())
}
