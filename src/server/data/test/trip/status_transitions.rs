use super::*;

/// Tests selecting trips due to start.
///
/// Expected: Ok with planning/upcoming trips whose start date is today or earlier
#[tokio::test]
async fn selects_trips_due_to_start() -> Result<(), AppError> {
    let test = TestBuilder::new().with_trip_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::user::create_user(db).await?;
    let today = Utc::now().date_naive();
    let starting = factory::trip::TripFactory::new(db, organizer.id)
        .dates(today, today + Days::new(3))
        .build()
        .await?;
    factory::trip::TripFactory::new(db, organizer.id)
        .dates(today, today + Days::new(3))
        .status("cancelled")
        .build()
        .await?;
    factory::trip::TripFactory::new(db, organizer.id)
        .dates(today + Days::new(1), today + Days::new(3))
        .build()
        .await?;

    let ids = TripRepository::new(db).ids_due_to_start(today).await?;

    assert_eq!(ids, vec![starting.id]);

    Ok(())
}

/// Tests completing ongoing trips whose end date has passed.
///
/// Expected: Ok, the trip becomes completed
#[tokio::test]
async fn completes_finished_trips() -> Result<(), AppError> {
    let test = TestBuilder::new().with_trip_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let organizer = factory::user::create_user(db).await?;
    let today = Utc::now().date_naive();
    let finished = factory::trip::TripFactory::new(db, organizer.id)
        .dates(today - Days::new(5), today - Days::new(1))
        .status("ongoing")
        .build()
        .await?;
    factory::trip::TripFactory::new(db, organizer.id)
        .dates(today - Days::new(5), today)
        .status("ongoing")
        .build()
        .await?;

    let repo = TripRepository::new(db);
    let ids = repo.ids_due_to_complete(today).await?;
    assert_eq!(ids, vec![finished.id]);

    let updated = repo.set_status(&ids, TripStatus::Completed).await?;
    assert_eq!(updated, 1);

    let trip = repo.find_by_id(finished.id).await?.unwrap();
    assert_eq!(trip.status, TripStatus::Completed);

    Ok(())
}
