//! Story domain models.

use chrono::{DateTime, Utc};

use crate::{
    model::story::{CreateStoryDto, PaginatedStoriesDto, StoryDto},
    server::model::pagination::Page,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub id: i32,
    pub author_id: i32,
    pub trip_id: Option<i32>,
    pub title: String,
    pub content: String,
    pub content_html: String,
    pub location: Option<String>,
    pub is_public: bool,
    pub like_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Story {
    pub fn from_entity(entity: entity::story::Model, like_count: u64) -> Self {
        Self {
            id: entity.id,
            author_id: entity.author_id,
            trip_id: entity.trip_id,
            title: entity.title,
            content: entity.content,
            content_html: entity.content_html,
            location: entity.location,
            is_public: entity.is_public,
            like_count,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Private stories are only visible to their author.
    pub fn is_visible_to(&self, viewer_id: i32) -> bool {
        self.is_public || self.author_id == viewer_id
    }

    pub fn into_dto(self) -> StoryDto {
        StoryDto {
            id: self.id,
            author_id: self.author_id,
            trip_id: self.trip_id,
            title: self.title,
            content: self.content,
            content_html: self.content_html,
            location: self.location,
            is_public: self.is_public,
            like_count: self.like_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Page<Story> {
    pub fn into_dto(self) -> PaginatedStoriesDto {
        PaginatedStoriesDto {
            stories: self.items.into_iter().map(Story::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Parameters for publishing a story. `content_html` is filled in by the service.
#[derive(Debug, Clone)]
pub struct CreateStoryParams {
    pub author_id: i32,
    pub trip_id: Option<i32>,
    pub title: String,
    pub content: String,
    pub location: Option<String>,
    pub is_public: bool,
}

impl CreateStoryParams {
    pub fn from_dto(author_id: i32, dto: CreateStoryDto) -> Self {
        Self {
            author_id,
            trip_id: dto.trip_id,
            title: dto.title.trim().to_string(),
            content: dto.content,
            location: dto.location,
            is_public: dto.is_public,
        }
    }
}
