use crate::server::{
    error::AppError,
    model::{notification::NotificationKind, user::UserProfile},
    service::{follow::FollowService, notification::NotificationService},
};
use test_utils::{builder::TestBuilder, factory};

use super::{assert_status, test_cache};

/// Tests following a user.
///
/// Expected: follower listed and a follow notification delivered
#[tokio::test]
async fn follows_and_notifies_target() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<UserProfile>();

    let follower = factory::user::create_user(db).await?;
    let target = factory::user::create_user(db).await?;

    let service = FollowService::new(db, &cache);
    service.follow(follower.id, target.id).await?;

    let followers = service.followers(target.id, 0, 10).await?;
    assert_eq!(followers.total, 1);
    assert_eq!(followers.items[0].user.id, follower.id);

    let following = service.following(follower.id, 0, 10).await?;
    assert_eq!(following.items[0].user.id, target.id);

    let notifications = NotificationService::new(db)
        .list(target.id, false, 0, 10)
        .await?;
    assert_eq!(notifications.total, 1);
    assert_eq!(notifications.items[0].kind, NotificationKind::Follow);

    Ok(())
}

/// Tests the follow error cases.
///
/// Expected: 400 self-follow, 404 unknown target, 409 repeated follow
#[tokio::test]
async fn rejects_invalid_follows() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<UserProfile>();

    let follower = factory::user::create_user(db).await?;
    let target = factory::user::create_user(db).await?;

    let service = FollowService::new(db, &cache);
    assert_status(service.follow(follower.id, follower.id).await, 400);
    assert_status(service.follow(follower.id, 9_999).await, 404);

    service.follow(follower.id, target.id).await?;
    assert_status(service.follow(follower.id, target.id).await, 409);

    Ok(())
}

/// Tests unfollowing.
///
/// Expected: Ok once, then 404
#[tokio::test]
async fn unfollows_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let cache = test_cache::<UserProfile>();

    let follower = factory::user::create_user(db).await?;
    let target = factory::user::create_user(db).await?;

    let service = FollowService::new(db, &cache);
    service.follow(follower.id, target.id).await?;
    service.unfollow(follower.id, target.id).await?;

    assert_status(service.unfollow(follower.id, target.id).await, 404);
    assert_eq!(service.followers(target.id, 0, 10).await?.total, 0);

    Ok(())
}
