use super::*;

/// Tests selecting pending bookings past their payment window.
///
/// Expected: Ok with only the overdue pending booking
#[tokio::test]
async fn selects_overdue_pending_bookings() -> Result<(), AppError> {
    let test = TestBuilder::new().with_wallet_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, trip, traveller) =
        factory::helpers::create_paid_trip_and_traveller(db, 50_000, 0).await?;
    let now = Utc::now();

    let overdue = factory::booking::BookingFactory::new(db, traveller.id, trip.id)
        .expires_at(Some(now - Duration::minutes(1)))
        .build()
        .await?;
    factory::booking::BookingFactory::new(db, traveller.id, trip.id)
        .expires_at(Some(now + Duration::minutes(10)))
        .build()
        .await?;
    factory::booking::BookingFactory::new(db, traveller.id, trip.id)
        .status("confirmed")
        .expires_at(None)
        .build()
        .await?;

    let ids = BookingRepository::new(db).overdue_ids(now).await?;

    assert_eq!(ids, vec![overdue.id]);

    Ok(())
}
