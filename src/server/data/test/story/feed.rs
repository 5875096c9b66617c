use super::*;

/// Tests the feed composition.
///
/// The feed contains public stories of followed users and every story of the
/// viewer, but nothing from strangers or private stories of followed users.
///
/// Expected: Ok with the viewer's two stories and the followed user's public one
#[tokio::test]
async fn includes_followed_public_and_own_stories() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_story_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let viewer = factory::user::create_user(db).await?;
    let followed = factory::user::create_user(db).await?;
    let stranger = factory::user::create_user(db).await?;

    let own_public = factory::story::create_story(db, viewer.id).await?;
    let own_private = factory::story::StoryFactory::new(db, viewer.id)
        .is_public(false)
        .build()
        .await?;
    let followed_public = factory::story::create_story(db, followed.id).await?;
    factory::story::StoryFactory::new(db, followed.id)
        .is_public(false)
        .build()
        .await?;
    factory::story::create_story(db, stranger.id).await?;

    let (stories, total) = StoryRepository::new(db)
        .feed(viewer.id, vec![followed.id], 0, 10)
        .await?;

    let mut ids: Vec<i32> = stories.iter().map(|s| s.id).collect();
    ids.sort();
    let mut expected = vec![own_public.id, own_private.id, followed_public.id];
    expected.sort();

    assert_eq!(total, 3);
    assert_eq!(ids, expected);

    Ok(())
}

/// Tests the feed of a user who follows nobody.
///
/// Expected: Ok with only the viewer's stories
#[tokio::test]
async fn contains_only_own_stories_without_follows() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_story_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let viewer = factory::user::create_user(db).await?;
    let stranger = factory::user::create_user(db).await?;
    let own = factory::story::create_story(db, viewer.id).await?;
    factory::story::create_story(db, stranger.id).await?;

    let (stories, total) = StoryRepository::new(db)
        .feed(viewer.id, Vec::new(), 0, 10)
        .await?;

    assert_eq!(total, 1);
    assert_eq!(stories[0].id, own.id);

    Ok(())
}
