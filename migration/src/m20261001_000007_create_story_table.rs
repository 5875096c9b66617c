use sea_orm_migration::{prelude::*, schema::*};

use super::{m20261001_000001_create_user_table::User, m20261001_000003_create_trip_table::Trip};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Story::Table)
                    .if_not_exists()
                    .col(pk_auto(Story::Id))
                    .col(integer(Story::AuthorId))
                    .col(integer_null(Story::TripId))
                    .col(string(Story::Title))
                    .col(text(Story::Content))
                    .col(text(Story::ContentHtml))
                    .col(string_null(Story::Location))
                    .col(boolean(Story::IsPublic).default(true))
                    .col(timestamp_with_time_zone(Story::CreatedAt))
                    .col(timestamp_with_time_zone(Story::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_story_author_id")
                            .from(Story::Table, Story::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_story_trip_id")
                            .from(Story::Table, Story::TripId)
                            .to(Trip::Table, Trip::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StoryLike::Table)
                    .if_not_exists()
                    .col(integer(StoryLike::StoryId))
                    .col(integer(StoryLike::UserId))
                    .col(timestamp_with_time_zone(StoryLike::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(StoryLike::StoryId)
                            .col(StoryLike::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_story_like_story_id")
                            .from(StoryLike::Table, StoryLike::StoryId)
                            .to(Story::Table, Story::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_story_like_user_id")
                            .from(StoryLike::Table, StoryLike::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StoryLike::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Story::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Story {
    Table,
    Id,
    AuthorId,
    TripId,
    Title,
    Content,
    ContentHtml,
    Location,
    IsPublic,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum StoryLike {
    Table,
    StoryId,
    UserId,
    CreatedAt,
}
