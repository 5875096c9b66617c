use super::*;

/// Tests that another user cannot mark or delete a notification.
///
/// Expected: Ok(false) for the stranger, Ok(true) for the owner
#[tokio::test]
async fn scopes_changes_to_owner() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let stranger = factory::user::create_user(db).await?;

    let repo = NotificationRepository::new(db);
    let notification = repo.create(params(user.id)).await?;

    assert!(!repo.mark_read(notification.id, stranger.id).await?);
    assert!(!repo.delete(notification.id, stranger.id).await?);
    assert_eq!(repo.unread_count(user.id).await?, 1);

    assert!(repo.mark_read(notification.id, user.id).await?);
    assert_eq!(repo.unread_count(user.id).await?, 0);
    assert!(repo.delete(notification.id, user.id).await?);

    Ok(())
}

/// Tests marking every unread notification.
///
/// Expected: Ok(2), then Ok(0) on a repeat
#[tokio::test]
async fn marks_all_read() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::create_user(db).await?;
    let other = factory::user::create_user(db).await?;

    let repo = NotificationRepository::new(db);
    repo.create(params(user.id)).await?;
    repo.create(params(user.id)).await?;
    repo.create(params(other.id)).await?;

    assert_eq!(repo.mark_all_read(user.id).await?, 2);
    assert_eq!(repo.mark_all_read(user.id).await?, 0);
    assert_eq!(repo.unread_count(other.id).await?, 1);

    Ok(())
}
