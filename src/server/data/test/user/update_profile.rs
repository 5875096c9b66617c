use super::*;

/// Tests a partial profile update.
///
/// Verifies that provided fields change and omitted fields keep their values.
///
/// Expected: Ok(Some(user)) with merged fields
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::user::UserFactory::new(db)
        .display_name("Before")
        .location("Pune")
        .build()
        .await?;

    let updated = UserRepository::new(db)
        .update_profile(
            created.id,
            UpdateProfileParams {
                display_name: None,
                bio: Some("Mountains and monsoon".to_string()),
                avatar_url: None,
                location: None,
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.display_name, "Before");
    assert_eq!(updated.bio.as_deref(), Some("Mountains and monsoon"));
    assert_eq!(updated.location.as_deref(), Some("Pune"));

    Ok(())
}

/// Tests updating a user that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = UserRepository::new(db)
        .update_profile(
            999,
            UpdateProfileParams {
                display_name: Some("Ghost".to_string()),
                bio: None,
                avatar_url: None,
                location: None,
            },
        )
        .await?;

    assert!(result.is_none());

    Ok(())
}
