use super::*;

/// Tests that only pending and confirmed bookings hold seats.
///
/// Expected: Ok with two of the four bookings
#[tokio::test]
async fn returns_pending_and_confirmed_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, trip, traveller) =
        factory::helpers::create_paid_trip_and_traveller(db, 50_000, 0).await?;
    for status in ["pending_payment", "confirmed", "cancelled", "expired"] {
        factory::booking::BookingFactory::new(db, traveller.id, trip.id)
            .status(status)
            .build()
            .await?;
    }

    let bookings = BookingRepository::new(db)
        .seat_holding_for_trip(trip.id)
        .await?;

    assert_eq!(bookings.len(), 2);
    assert!(bookings.iter().all(|b| b.status.holds_seats()));

    Ok(())
}
