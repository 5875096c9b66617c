//! Travel story service.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        follow::FollowRepository, story::StoryRepository, trip::TripRepository,
        user::UserRepository,
    },
    error::{auth::AuthError, AppError},
    model::{
        notification::{NotificationKind, SendNotificationParams},
        pagination::Page,
        story::{CreateStoryParams, Story},
        user::User,
    },
    service::notification::NotificationService,
    util::markdown::render_markdown,
};

pub struct StoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> StoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Publishes a story, rendering its markdown with raw HTML removed.
    pub async fn create(&self, params: CreateStoryParams) -> Result<Story, AppError> {
        if params.title.trim().is_empty() {
            return Err(AppError::BadRequest("Story title is required".to_string()));
        }
        if params.content.trim().is_empty() {
            return Err(AppError::BadRequest("Story content is required".to_string()));
        }
        if let Some(trip_id) = params.trip_id {
            if TripRepository::new(self.db).find_by_id(trip_id).await?.is_none() {
                return Err(AppError::NotFound("Trip not found".to_string()));
            }
        }

        let content_html = render_markdown(&params.content);

        Ok(StoryRepository::new(self.db)
            .create(params, content_html)
            .await?)
    }

    /// Returns a story if it is public or written by the viewer.
    pub async fn get(&self, story_id: i32, viewer_id: i32) -> Result<Story, AppError> {
        match StoryRepository::new(self.db).find_by_id(story_id).await? {
            Some(story) if story.is_visible_to(viewer_id) => Ok(story),
            _ => Err(AppError::NotFound("Story not found".to_string())),
        }
    }

    /// Stories by `author_id`; private ones are included only for the author.
    pub async fn list_by_author(
        &self,
        author_id: i32,
        viewer_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<Page<Story>, AppError> {
        if UserRepository::new(self.db)
            .find_by_id(author_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let (stories, total) = StoryRepository::new(self.db)
            .list_by_author(author_id, author_id == viewer_id, page, per_page)
            .await?;

        Ok(Page::new(stories, total, page, per_page))
    }

    /// Public stories of followed users plus the viewer's own, newest first.
    pub async fn feed(&self, viewer_id: i32, page: u64, per_page: u64) -> Result<Page<Story>, AppError> {
        let following = FollowRepository::new(self.db)
            .following_ids(viewer_id)
            .await?;

        let (stories, total) = StoryRepository::new(self.db)
            .feed(viewer_id, following, page, per_page)
            .await?;

        Ok(Page::new(stories, total, page, per_page))
    }

    /// Likes a visible story and notifies its author.
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - Already liked
    pub async fn like(&self, story_id: i32, user_id: i32) -> Result<(), AppError> {
        let story = self.get(story_id, user_id).await?;

        let repo = StoryRepository::new(self.db);
        if repo.has_liked(story_id, user_id).await? {
            return Err(AppError::Conflict("Story already liked".to_string()));
        }
        repo.add_like(story_id, user_id).await?;

        if story.author_id != user_id {
            let name = UserRepository::new(self.db)
                .find_by_id(user_id)
                .await?
                .map(|u| u.display_name)
                .unwrap_or_else(|| "Someone".to_string());

            NotificationService::new(self.db)
                .notify(SendNotificationParams {
                    user_id: story.author_id,
                    kind: NotificationKind::StoryLike,
                    title: "New like".to_string(),
                    message: format!("{} liked \"{}\"", name, story.title),
                    data: serde_json::json!({ "story_id": story_id, "user_id": user_id }),
                })
                .await;
        }

        Ok(())
    }

    pub async fn unlike(&self, story_id: i32, user_id: i32) -> Result<(), AppError> {
        if !StoryRepository::new(self.db)
            .remove_like(story_id, user_id)
            .await?
        {
            return Err(AppError::NotFound("Like not found".to_string()));
        }

        Ok(())
    }

    /// Deletes a story; allowed for its author and for admins.
    pub async fn delete(&self, story_id: i32, user: &User) -> Result<(), AppError> {
        let repo = StoryRepository::new(self.db);
        let Some(story) = repo.find_by_id(story_id).await? else {
            return Err(AppError::NotFound("Story not found".to_string()));
        };

        if story.author_id != user.id && !user.admin {
            if !story.is_public {
                return Err(AppError::NotFound("Story not found".to_string()));
            }
            return Err(AuthError::AccessDenied(
                user.id,
                format!("User may not delete story {}", story_id),
            )
            .into());
        }

        repo.delete(story_id).await?;

        Ok(())
    }
}
