use super::*;

/// Tests confirming a pending booking.
///
/// Expected: Ok(Some(booking)) confirmed, with the reference stored and no expiry
#[tokio::test]
async fn confirms_and_clears_expiry() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, trip, traveller) =
        factory::helpers::create_paid_trip_and_traveller(db, 50_000, 0).await?;
    let booking = factory::booking::BookingFactory::new(db, traveller.id, trip.id)
        .build()
        .await?;

    let updated = BookingRepository::new(db)
        .update_status(
            booking.id,
            BookingStatus::Confirmed,
            Some("pay_123".to_string()),
        )
        .await?
        .unwrap();

    assert_eq!(updated.status, BookingStatus::Confirmed);
    assert_eq!(updated.payment_reference.as_deref(), Some("pay_123"));
    assert!(updated.expires_at.is_none());

    Ok(())
}

/// Tests updating a booking that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_booking() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = BookingRepository::new(db)
        .update_status(77, BookingStatus::Cancelled, None)
        .await?;

    assert!(result.is_none());

    Ok(())
}
