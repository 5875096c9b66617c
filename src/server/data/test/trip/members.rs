use super::*;

/// Tests membership roles and counting.
///
/// Expected: Ok with organizer first and one participant
#[tokio::test]
async fn lists_members_with_roles() -> Result<(), AppError> {
    let test = TestBuilder::new().with_trip_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (organizer, trip) = factory::helpers::create_trip_with_organizer(db).await?;
    let traveller = factory::user::create_user(db).await?;

    let repo = TripRepository::new(db);
    repo.add_member(trip.id, traveller.id, TripRole::Participant)
        .await?;

    let members = repo.members(trip.id).await?;
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].0, organizer.id);
    assert_eq!(members[0].1, TripRole::Organizer);
    assert_eq!(members[1].1, TripRole::Participant);

    assert_eq!(
        repo.find_member_role(trip.id, traveller.id).await?,
        Some(TripRole::Participant)
    );
    assert_eq!(repo.count_for_member(traveller.id).await?, 1);

    Ok(())
}

/// Tests that `ensure_participant` keeps an existing role.
///
/// Expected: Ok, organizer stays organizer and a newcomer becomes participant
#[tokio::test]
async fn ensure_participant_is_idempotent() -> Result<(), AppError> {
    let test = TestBuilder::new().with_trip_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (organizer, trip) = factory::helpers::create_trip_with_organizer(db).await?;
    let traveller = factory::user::create_user(db).await?;

    let repo = TripRepository::new(db);
    repo.ensure_participant(trip.id, organizer.id).await?;
    repo.ensure_participant(trip.id, traveller.id).await?;
    repo.ensure_participant(trip.id, traveller.id).await?;

    assert_eq!(
        repo.find_member_role(trip.id, organizer.id).await?,
        Some(TripRole::Organizer)
    );
    assert_eq!(repo.count_members(trip.id).await?, 2);

    Ok(())
}

/// Tests removing a member.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn removes_member() -> Result<(), AppError> {
    let test = TestBuilder::new().with_trip_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (_, trip) = factory::helpers::create_trip_with_organizer(db).await?;
    let traveller = factory::user::create_user(db).await?;
    factory::trip::create_trip_member(db, trip.id, traveller.id).await?;

    let repo = TripRepository::new(db);
    assert!(repo.remove_member(trip.id, traveller.id).await?);
    assert!(!repo.remove_member(trip.id, traveller.id).await?);

    Ok(())
}
