use super::*;

/// Tests liking and unliking a story.
///
/// Expected: like count follows the like rows
#[tokio::test]
async fn tracks_likes() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_story_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let fan = factory::user::create_user(db).await?;
    let other_fan = factory::user::create_user(db).await?;
    let story = factory::story::create_story(db, author.id).await?;

    let repo = StoryRepository::new(db);
    repo.add_like(story.id, fan.id).await?;
    repo.add_like(story.id, other_fan.id).await?;

    assert!(repo.has_liked(story.id, fan.id).await?);
    assert_eq!(repo.like_count(story.id).await?, 2);

    assert!(repo.remove_like(story.id, fan.id).await?);
    assert!(!repo.remove_like(story.id, fan.id).await?);
    assert!(!repo.has_liked(story.id, fan.id).await?);

    let story = repo.find_by_id(story.id).await?.unwrap();
    assert_eq!(story.like_count, 1);

    Ok(())
}

/// Tests that the composite key rejects a second like by the same user.
///
/// Expected: Err
#[tokio::test]
async fn rejects_duplicate_like() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_story_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let story = factory::story::create_story(db, author.id).await?;

    let repo = StoryRepository::new(db);
    repo.add_like(story.id, author.id).await?;

    assert!(repo.add_like(story.id, author.id).await.is_err());

    Ok(())
}
