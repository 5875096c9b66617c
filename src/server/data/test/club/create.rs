use super::*;

/// Tests creating a club and checking its name.
///
/// Expected: Ok with no members until the owner is added
#[tokio::test]
async fn creates_club() -> Result<(), AppError> {
    let test = TestBuilder::new().with_club_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;

    let repo = ClubRepository::new(db);
    let club = repo
        .create(CreateClubParams {
            owner_id: owner.id,
            name: "Western Ghats Trekkers".to_string(),
            description: Some("Monsoon treks".to_string()),
            is_private: false,
        })
        .await?;

    assert_eq!(club.member_count, 0);
    assert!(repo.name_exists("Western Ghats Trekkers").await?);
    assert!(!repo.name_exists("Eastern Ghats Trekkers").await?);

    repo.add_member(club.id, owner.id, ClubRole::Owner).await?;
    let club = repo.find_by_id(club.id).await?.unwrap();
    assert_eq!(club.member_count, 1);

    Ok(())
}

/// Tests that deleting a club removes memberships.
///
/// Expected: Ok(true) and zero members afterwards
#[tokio::test]
async fn delete_cascades_to_members() -> Result<(), AppError> {
    let test = TestBuilder::new().with_club_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let club = factory::club::create_club(db, owner.id, false).await?;

    let repo = ClubRepository::new(db);
    assert!(repo.delete(club.id).await?);
    assert_eq!(repo.count_members(club.id).await?, 0);

    Ok(())
}
