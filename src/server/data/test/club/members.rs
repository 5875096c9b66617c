use super::*;

/// Tests member roles and removal.
///
/// Expected: Ok with the owner and one member, then only the owner
#[tokio::test]
async fn manages_members() -> Result<(), AppError> {
    let test = TestBuilder::new().with_club_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let member = factory::user::create_user(db).await?;
    let club = factory::club::create_club(db, owner.id, false).await?;

    let repo = ClubRepository::new(db);
    repo.add_member(club.id, member.id, ClubRole::Member).await?;

    let members = repo.members(club.id).await?;
    assert_eq!(members.len(), 2);
    assert_eq!(
        repo.find_member_role(club.id, owner.id).await?,
        Some(ClubRole::Owner)
    );
    assert_eq!(
        repo.find_member_role(club.id, member.id).await?,
        Some(ClubRole::Member)
    );

    assert!(repo.remove_member(club.id, member.id).await?);
    assert_eq!(repo.find_member_role(club.id, member.id).await?, None);

    Ok(())
}

/// Tests that a membership row with an unknown role is reported as an internal error.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn rejects_unknown_stored_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_club_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let member = factory::user::create_user(db).await?;
    let club = factory::club::create_club(db, owner.id, false).await?;
    factory::club::create_club_member(db, club.id, member.id, "moderator").await?;

    let result = ClubRepository::new(db)
        .find_member_role(club.id, member.id)
        .await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
