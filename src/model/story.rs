use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::trip::default_true;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct StoryDto {
    pub id: i32,
    pub author_id: i32,
    pub trip_id: Option<i32>,
    pub title: String,
    /// Markdown source as written by the author.
    pub content: String,
    /// Rendered HTML with raw HTML blocks removed.
    pub content_html: String,
    pub location: Option<String>,
    pub is_public: bool,
    pub like_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CreateStoryDto {
    pub title: String,
    pub content: String,
    pub trip_id: Option<i32>,
    pub location: Option<String>,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PaginatedStoriesDto {
    pub stories: Vec<StoryDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
