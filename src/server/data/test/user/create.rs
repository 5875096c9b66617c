use super::*;

/// Tests creating a user row.
///
/// Verifies that the stored fields come back on the domain model and that the
/// existence checks see the new email and username.
///
/// Expected: Ok with matching fields
#[tokio::test]
async fn creates_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParams {
            email: "asha@example.com".to_string(),
            username: "asha".to_string(),
            password_hash: "hash".to_string(),
            display_name: "Asha".to_string(),
            admin: false,
        })
        .await?;

    assert_eq!(user.email, "asha@example.com");
    assert_eq!(user.username, "asha");
    assert!(!user.admin);
    assert!(repo.email_exists("asha@example.com").await?);
    assert!(repo.username_exists("asha").await?);
    assert!(!repo.username_exists("someone-else").await?);

    Ok(())
}

/// Tests the unique constraint on email.
///
/// Expected: Err
#[tokio::test]
async fn fails_for_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .email("taken@example.com")
        .build()
        .await?;

    let result = UserRepository::new(db)
        .create(CreateUserParams {
            email: "taken@example.com".to_string(),
            username: "fresh".to_string(),
            password_hash: "hash".to_string(),
            display_name: "Fresh".to_string(),
            admin: false,
        })
        .await;

    assert!(result.is_err());

    Ok(())
}
