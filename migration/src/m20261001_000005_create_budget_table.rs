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
                    .table(Budget::Table)
                    .if_not_exists()
                    .col(pk_auto(Budget::Id))
                    .col(integer(Budget::OwnerId))
                    .col(integer_null(Budget::TripId))
                    .col(string(Budget::Name))
                    .col(big_integer(Budget::TotalAmount))
                    .col(string_len(Budget::Currency, 3).default("INR"))
                    .col(timestamp_with_time_zone(Budget::CreatedAt))
                    .col(timestamp_with_time_zone(Budget::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_budget_owner_id")
                            .from(Budget::Table, Budget::OwnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_budget_trip_id")
                            .from(Budget::Table, Budget::TripId)
                            .to(Trip::Table, Trip::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Budget::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Budget {
    Table,
    Id,
    OwnerId,
    TripId,
    Name,
    TotalAmount,
    Currency,
    CreatedAt,
    UpdatedAt,
}
