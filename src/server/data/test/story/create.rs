use super::*;

/// Tests inserting a story with its rendered HTML.
///
/// Expected: Ok with zero likes
#[tokio::test]
async fn creates_story() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_story_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;

    let repo = StoryRepository::new(db);
    let story = repo
        .create(
            CreateStoryParams {
                author_id: author.id,
                trip_id: None,
                title: "Sunrise at Tiger Hill".to_string(),
                content: "**Worth** the 4am alarm".to_string(),
                location: Some("Darjeeling".to_string()),
                is_public: true,
            },
            "<p><strong>Worth</strong> the 4am alarm</p>\n".to_string(),
        )
        .await?;

    assert_eq!(story.like_count, 0);
    assert_eq!(repo.find_by_id(story.id).await?, Some(story));

    Ok(())
}

/// Tests deleting a story.
///
/// Expected: Ok(true) then Ok(None) on lookup
#[tokio::test]
async fn deletes_story() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_story_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let story = factory::story::create_story(db, author.id).await?;

    let repo = StoryRepository::new(db);
    assert!(repo.delete(story.id).await?);
    assert!(repo.find_by_id(story.id).await?.is_none());

    Ok(())
}
