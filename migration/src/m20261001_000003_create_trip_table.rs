use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trip::Table)
                    .if_not_exists()
                    .col(pk_auto(Trip::Id))
                    .col(integer(Trip::OrganizerId))
                    .col(string(Trip::Title))
                    .col(text_null(Trip::Description))
                    .col(string(Trip::Destination))
                    .col(date(Trip::StartDate))
                    .col(date(Trip::EndDate))
                    .col(string_len(Trip::Status, 20).default("planning"))
                    .col(boolean(Trip::IsPublic).default(true))
                    .col(integer(Trip::MaxParticipants).default(10))
                    .col(big_integer(Trip::PricePerPerson).default(0))
                    .col(string_len(Trip::Currency, 3).default("INR"))
                    .col(json(Trip::Tags))
                    .col(string_null(Trip::CoverImageUrl))
                    .col(timestamp_with_time_zone(Trip::CreatedAt))
                    .col(timestamp_with_time_zone(Trip::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trip_organizer_id")
                            .from(Trip::Table, Trip::OrganizerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_trip_start_date")
                    .table(Trip::Table)
                    .col(Trip::StartDate)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trip::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Trip {
    Table,
    Id,
    OrganizerId,
    Title,
    Description,
    Destination,
    StartDate,
    EndDate,
    Status,
    IsPublic,
    MaxParticipants,
    PricePerPerson,
    Currency,
    Tags,
    CoverImageUrl,
    CreatedAt,
    UpdatedAt,
}
