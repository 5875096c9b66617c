use super::*;

/// Tests creating a follow edge.
///
/// Expected: Ok, edge exists in one direction only
#[tokio::test]
async fn creates_follow() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let follower = factory::user::create_user(db).await?;
    let target = factory::user::create_user(db).await?;

    let repo = FollowRepository::new(db);
    repo.create(follower.id, target.id).await?;

    assert!(repo.exists(follower.id, target.id).await?);
    assert!(!repo.exists(target.id, follower.id).await?);
    assert_eq!(repo.count_followers(target.id).await?, 1);
    assert_eq!(repo.count_following(follower.id).await?, 1);

    Ok(())
}

/// Tests that the composite key rejects a second identical follow.
///
/// Expected: Err
#[tokio::test]
async fn fails_for_duplicate_follow() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let follower = factory::user::create_user(db).await?;
    let target = factory::user::create_user(db).await?;

    let repo = FollowRepository::new(db);
    repo.create(follower.id, target.id).await?;
    let result = repo.create(follower.id, target.id).await;

    assert!(result.is_err());

    Ok(())
}
