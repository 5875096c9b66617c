use super::*;

/// Tests listing clubs with their member counts.
///
/// Expected: Ok with both clubs and correct counts
#[tokio::test]
async fn lists_clubs_with_member_counts() -> Result<(), AppError> {
    let test = TestBuilder::new().with_club_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::user::create_user(db).await?;
    let member = factory::user::create_user(db).await?;
    let busy = factory::club::create_club(db, owner.id, false).await?;
    let quiet = factory::club::create_club(db, owner.id, true).await?;
    factory::club::create_club_member(db, busy.id, member.id, "member").await?;

    let (clubs, total) = ClubRepository::new(db).list(0, 10).await?;

    assert_eq!(total, 2);
    for club in clubs {
        if club.id == busy.id {
            assert_eq!(club.member_count, 2);
        } else {
            assert_eq!(club.id, quiet.id);
            assert_eq!(club.member_count, 1);
        }
    }

    Ok(())
}
