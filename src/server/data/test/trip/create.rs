use super::*;

/// Tests inserting a trip.
///
/// Verifies that a new trip starts in the planning state and keeps its tags.
///
/// Expected: Ok with status planning
#[tokio::test]
async fn creates_trip_in_planning_state() -> Result<(), AppError> {
    let test = TestBuilder::new().with_trip_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::user::create_user(db).await?;

    let trip = TripRepository::new(db)
        .create(CreateTripParams {
            organizer_id: organizer.id,
            title: "Spiti Valley".to_string(),
            description: None,
            destination: "Spiti".to_string(),
            start_date: NaiveDate::from_ymd_opt(2027, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2027, 6, 9).unwrap(),
            is_public: true,
            max_participants: 8,
            price_per_person: 2_500_000,
            currency: "INR".to_string(),
            tags: vec!["mountains".to_string(), "roadtrip".to_string()],
            cover_image_url: None,
        })
        .await?;

    assert_eq!(trip.status, TripStatus::Planning);
    assert_eq!(trip.tags, vec!["mountains", "roadtrip"]);
    assert_eq!(trip.organizer_id, organizer.id);

    let found = TripRepository::new(db).find_by_id(trip.id).await?;
    assert_eq!(found, Some(trip));

    Ok(())
}

/// Tests looking up a trip that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_trip() -> Result<(), AppError> {
    let test = TestBuilder::new().with_trip_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(TripRepository::new(db).find_by_id(42).await?.is_none());

    Ok(())
}
