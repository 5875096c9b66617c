use super::*;

/// Tests listing notifications scoped to their owner.
///
/// Expected: Ok with only the user's notifications, data preserved
#[tokio::test]
async fn lists_only_own_notifications() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;

    let repo = NotificationRepository::new(db);
    repo.create(params(user.id)).await?;
    repo.create(params(user.id)).await?;
    repo.create(params(other.id)).await?;

    let (notifications, total) = repo.list_for_user(user.id, false, 0, 10).await?;

    assert_eq!(total, 2);
    assert!(notifications.iter().all(|n| n.user_id == user.id));
    assert_eq!(notifications[0].kind, NotificationKind::Follow);
    assert_eq!(notifications[0].data["follower_id"], 1);

    Ok(())
}

/// Tests the unread filter.
///
/// Expected: Ok with one unread notification
#[tokio::test]
async fn filters_unread() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;

    let repo = NotificationRepository::new(db);
    let read = repo.create(params(user.id)).await?;
    repo.create(params(user.id)).await?;
    repo.mark_read(read.id, user.id).await?;

    let (unread, total) = repo.list_for_user(user.id, true, 0, 10).await?;

    assert_eq!(total, 1);
    assert!(!unread[0].read);
    assert_eq!(repo.unread_count(user.id).await?, 1);

    Ok(())
}
