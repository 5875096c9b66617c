use super::*;

/// Tests that private trips are excluded and results are ordered by start date.
///
/// Expected: Ok with public trips, earliest first
#[tokio::test]
async fn lists_public_trips_by_start_date() -> Result<(), AppError> {
    let test = TestBuilder::new().with_trip_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::user::create_user(db).await?;
    let today = Utc::now().date_naive();
    let late = factory::trip::TripFactory::new(db, organizer.id)
        .dates(today + Days::new(60), today + Days::new(62))
        .build()
        .await?;
    let early = factory::trip::TripFactory::new(db, organizer.id)
        .dates(today + Days::new(10), today + Days::new(12))
        .build()
        .await?;
    factory::trip::TripFactory::new(db, organizer.id)
        .is_public(false)
        .build()
        .await?;

    let (trips, total) = TripRepository::new(db)
        .list_public(TripFilter::default(), 0, 10)
        .await?;

    assert_eq!(total, 2);
    let ids: Vec<i32> = trips.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![early.id, late.id]);

    Ok(())
}

/// Tests filtering by destination substring and status.
///
/// Expected: Ok with only the matching trip
#[tokio::test]
async fn filters_by_destination_and_status() -> Result<(), AppError> {
    let test = TestBuilder::new().with_trip_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::user::create_user(db).await?;
    let goa = factory::trip::TripFactory::new(db, organizer.id)
        .destination("North Goa")
        .build()
        .await?;
    factory::trip::TripFactory::new(db, organizer.id)
        .destination("South Goa")
        .status("cancelled")
        .build()
        .await?;
    factory::trip::TripFactory::new(db, organizer.id)
        .destination("Kerala")
        .build()
        .await?;

    let (trips, total) = TripRepository::new(db)
        .list_public(
            TripFilter {
                destination: Some("goa".to_string()),
                status: Some(TripStatus::Upcoming),
            },
            0,
            10,
        )
        .await?;

    assert_eq!(total, 1);
    assert_eq!(trips[0].id, goa.id);

    Ok(())
}

/// Tests that a destination filter is matched literally.
///
/// Expected: Ok with no trips for a bare `%` filter
#[tokio::test]
async fn destination_filter_escapes_wildcards() -> Result<(), AppError> {
    let test = TestBuilder::new().with_trip_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::user::create_user(db).await?;
    factory::trip::TripFactory::new(db, organizer.id)
        .destination("Ladakh")
        .build()
        .await?;

    let (trips, total) = TripRepository::new(db)
        .list_public(
            TripFilter {
                destination: Some("%".to_string()),
                status: None,
            },
            0,
            10,
        )
        .await?;

    assert_eq!(total, 0);
    assert!(trips.is_empty());

    Ok(())
}
