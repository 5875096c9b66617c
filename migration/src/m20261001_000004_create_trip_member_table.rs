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
                    .table(TripMember::Table)
                    .if_not_exists()
                    .col(integer(TripMember::TripId))
                    .col(integer(TripMember::UserId))
                    .col(string_len(TripMember::Role, 20).default("participant"))
                    .col(timestamp_with_time_zone(TripMember::JoinedAt))
                    .primary_key(
                        Index::create()
                            .col(TripMember::TripId)
                            .col(TripMember::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trip_member_trip_id")
                            .from(TripMember::Table, TripMember::TripId)
                            .to(Trip::Table, Trip::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trip_member_user_id")
                            .from(TripMember::Table, TripMember::UserId)
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
            .drop_table(Table::drop().table(TripMember::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TripMember {
    Table,
    TripId,
    UserId,
    Role,
    JoinedAt,
}
