use super::*;

/// Tests loading a user together with the stored password hash.
///
/// Expected: Ok(Some((user, hash)))
#[tokio::test]
async fn returns_user_and_hash() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .email("login@example.com")
        .password_hash("stored-hash")
        .build()
        .await?;

    let result = UserRepository::new(db)
        .find_credentials_by_email("login@example.com")
        .await?;

    let (user, hash) = result.unwrap();
    assert_eq!(user.id, created.id);
    assert_eq!(hash, "stored-hash");

    Ok(())
}

/// Tests an unknown email.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .find_credentials_by_email("nobody@example.com")
        .await?;

    assert!(result.is_none());

    Ok(())
}
