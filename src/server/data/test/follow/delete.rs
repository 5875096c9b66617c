use super::*;

/// Tests removing an existing follow.
///
/// Expected: Ok(true), then Ok(false) on the second attempt
#[tokio::test]
async fn deletes_follow_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let follower = factory::user::create_user(db).await?;
    let target = factory::user::create_user(db).await?;

    let repo = FollowRepository::new(db);
    repo.create(follower.id, target.id).await?;

    assert!(repo.delete(follower.id, target.id).await?);
    assert!(!repo.delete(follower.id, target.id).await?);
    assert!(!repo.exists(follower.id, target.id).await?);

    Ok(())
}
