use super::*;

/// Tests applying a partial update.
///
/// Expected: Ok(Some(trip)) with only the given fields changed
#[tokio::test]
async fn updates_given_fields() -> Result<(), AppError> {
    let test = TestBuilder::new().with_trip_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, trip) = factory::helpers::create_trip_with_organizer(db).await?;

    let updated = TripRepository::new(db)
        .update(
            trip.id,
            UpdateTripParams {
                title: Some("Renamed".to_string()),
                max_participants: Some(3),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.max_participants, 3);
    assert_eq!(updated.destination, trip.destination);

    Ok(())
}

/// Tests deleting a trip removes its memberships as well.
///
/// Expected: Ok(true) and no members left
#[tokio::test]
async fn delete_cascades_to_members() -> Result<(), AppError> {
    let test = TestBuilder::new().with_trip_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, trip) = factory::helpers::create_trip_with_organizer(db).await?;

    let repo = TripRepository::new(db);
    assert!(repo.delete(trip.id).await?);
    assert!(!repo.delete(trip.id).await?);
    assert_eq!(repo.count_members(trip.id).await?, 0);

    Ok(())
}
