use super::*;

/// Tests hiding private stories unless requested.
///
/// Expected: Ok with one public story, or both when private ones are included
#[tokio::test]
async fn hides_private_stories_unless_requested() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_story_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    factory::story::create_story(db, author.id).await?;
    factory::story::StoryFactory::new(db, author.id)
        .is_public(false)
        .build()
        .await?;

    let repo = StoryRepository::new(db);

    let (_, public_total) = repo.list_by_author(author.id, false, 0, 10).await?;
    let (_, all_total) = repo.list_by_author(author.id, true, 0, 10).await?;

    assert_eq!(public_total, 1);
    assert_eq!(all_total, 2);
    assert_eq!(repo.count_public_by_author(author.id).await?, 1);

    Ok(())
}

/// Tests that listed stories carry their like counts.
///
/// Expected: Ok with like_count 1 on the liked story
#[tokio::test]
async fn attaches_like_counts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_story_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let fan = factory::user::create_user(db).await?;
    let liked = factory::story::create_story(db, author.id).await?;
    factory::story::create_story(db, author.id).await?;

    let repo = StoryRepository::new(db);
    repo.add_like(liked.id, fan.id).await?;

    let (stories, _) = repo.list_by_author(author.id, false, 0, 10).await?;

    for story in stories {
        let expected = if story.id == liked.id { 1 } else { 0 };
        assert_eq!(story.like_count, expected);
    }

    Ok(())
}
