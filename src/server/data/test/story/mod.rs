use crate::server::{data::story::StoryRepository, model::story::CreateStoryParams};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod feed;
mod likes;
mod list_by_author;
