use crate::server::{
    error::AppError,
    model::{notification::NotificationKind, story::CreateStoryParams, user::User},
    service::{notification::NotificationService, story::StoryService},
};
use test_utils::{builder::TestBuilder, factory};

use super::assert_status;

fn params(author_id: i32, content: &str) -> CreateStoryParams {
    CreateStoryParams {
        author_id,
        trip_id: None,
        title: "Backwaters".to_string(),
        content: content.to_string(),
        location: Some("Alleppey".to_string()),
        is_public: true,
    }
}

/// Tests markdown rendering on creation.
///
/// Expected: HTML output with raw HTML removed
#[tokio::test]
async fn renders_markdown_without_raw_html() -> Result<(), AppError> {
    let test = TestBuilder::new().with_story_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;

    let story = StoryService::new(db)
        .create(params(
            author.id,
            "A *slow* houseboat day<script>alert(1)</script>",
        ))
        .await?;

    assert!(story.content_html.contains("<em>slow</em>"));
    assert!(!story.content_html.contains("<script>"));

    Ok(())
}

/// Tests story validation.
///
/// Expected: 400 for empty content, 404 for an unknown trip
#[tokio::test]
async fn validates_new_stories() -> Result<(), AppError> {
    let test = TestBuilder::new().with_story_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let service = StoryService::new(db);

    assert_status(service.create(params(author.id, "   ")).await, 400);

    let mut with_trip = params(author.id, "Content");
    with_trip.trip_id = Some(777);
    assert_status(service.create(with_trip).await, 404);

    Ok(())
}

/// Tests likes and the author notification.
///
/// Expected: like notifies the author, a second like conflicts, unlike works once
#[tokio::test]
async fn like_flow() -> Result<(), AppError> {
    let test = TestBuilder::new().with_story_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let fan = factory::user::create_user(db).await?;
    let story = factory::story::create_story(db, author.id).await?;

    let service = StoryService::new(db);
    service.like(story.id, fan.id).await?;
    assert_status(service.like(story.id, fan.id).await, 409);
    assert_eq!(service.get(story.id, fan.id).await?.like_count, 1);

    let notifications = NotificationService::new(db)
        .list(author.id, false, 0, 10)
        .await?;
    assert_eq!(notifications.items[0].kind, NotificationKind::StoryLike);

    service.unlike(story.id, fan.id).await?;
    assert_status(service.unlike(story.id, fan.id).await, 404);

    Ok(())
}

/// Tests private story visibility.
///
/// Expected: 404 for others, visible to the author, listed only for the author
#[tokio::test]
async fn private_stories_visible_to_author_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_story_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let reader = factory::user::create_user(db).await?;
    let private = factory::story::StoryFactory::new(db, author.id)
        .is_public(false)
        .build()
        .await?;

    let service = StoryService::new(db);
    assert_status(service.get(private.id, reader.id).await, 404);
    assert_status(service.like(private.id, reader.id).await, 404);
    assert_eq!(service.get(private.id, author.id).await?.id, private.id);

    assert_eq!(service.list_by_author(author.id, reader.id, 0, 10).await?.total, 0);
    assert_eq!(service.list_by_author(author.id, author.id, 0, 10).await?.total, 1);

    Ok(())
}

/// Tests the feed through the follow graph.
///
/// Expected: the followed author's public story appears
#[tokio::test]
async fn feed_uses_follows() -> Result<(), AppError> {
    let test = TestBuilder::new().with_story_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let viewer = factory::user::create_user(db).await?;
    let followed = factory::user::create_user(db).await?;
    let story = factory::story::create_story(db, followed.id).await?;

    let service = StoryService::new(db);
    assert_eq!(service.feed(viewer.id, 0, 10).await?.total, 0);

    crate::server::data::follow::FollowRepository::new(db)
        .create(viewer.id, followed.id)
        .await?;

    let feed = service.feed(viewer.id, 0, 10).await?;
    assert_eq!(feed.total, 1);
    assert_eq!(feed.items[0].id, story.id);

    Ok(())
}

/// Tests delete permissions.
///
/// Expected: 403 for another user, Ok for an admin
#[tokio::test]
async fn delete_by_author_or_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_story_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::user::create_user(db).await?;
    let other = User::from_entity(factory::user::create_user(db).await?);
    let admin = User::from_entity(
        factory::user::UserFactory::new(db)
            .admin(true)
            .build()
            .await?,
    );
    let story = factory::story::create_story(db, author.id).await?;

    let service = StoryService::new(db);
    assert_status(service.delete(story.id, &other).await, 403);
    service.delete(story.id, &admin).await?;
    assert_status(service.get(story.id, author.id).await, 404);

    Ok(())
}
