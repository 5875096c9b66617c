//! Story factory for creating test stories.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test stories. Defaults to a public story with plain text content.
pub struct StoryFactory<'a> {
    db: &'a DatabaseConnection,
    author_id: i32,
    trip_id: Option<i32>,
    title: String,
    content: String,
    is_public: bool,
}

impl<'a> StoryFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, author_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            author_id,
            trip_id: None,
            title: format!("Story {}", id),
            content: format!("Day {} on the road.", id),
            is_public: true,
        }
    }

    pub fn trip_id(mut self, trip_id: i32) -> Self {
        self.trip_id = Some(trip_id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn is_public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }

    pub async fn build(self) -> Result<entity::story::Model, DbErr> {
        let now = Utc::now();
        let content_html = format!("<p>{}</p>\n", self.content);
        entity::story::ActiveModel {
            author_id: ActiveValue::Set(self.author_id),
            trip_id: ActiveValue::Set(self.trip_id),
            title: ActiveValue::Set(self.title),
            content: ActiveValue::Set(self.content),
            content_html: ActiveValue::Set(content_html),
            location: ActiveValue::Set(None),
            is_public: ActiveValue::Set(self.is_public),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a public story with default values.
pub async fn create_story(
    db: &DatabaseConnection,
    author_id: i32,
) -> Result<entity::story::Model, DbErr> {
    StoryFactory::new(db, author_id).build().await
}
