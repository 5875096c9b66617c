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
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_auto(Booking::Id))
                    .col(integer(Booking::UserId))
                    .col(integer(Booking::TripId))
                    .col(integer(Booking::Seats))
                    .col(big_integer(Booking::TotalAmount))
                    .col(big_integer(Booking::WalletAmount))
                    .col(big_integer(Booking::GatewayAmount))
                    .col(string_len(Booking::Status, 20))
                    .col(string_uniq(Booking::ConfirmationCode))
                    .col(string_null(Booking::PaymentReference))
                    .col(timestamp_with_time_zone_null(Booking::ExpiresAt))
                    .col(timestamp_with_time_zone(Booking::CreatedAt))
                    .col(timestamp_with_time_zone(Booking::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_user_id")
                            .from(Booking::Table, Booking::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_trip_id")
                            .from(Booking::Table, Booking::TripId)
                            .to(Trip::Table, Trip::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_status_expires_at")
                    .table(Booking::Table)
                    .col(Booking::Status)
                    .col(Booking::ExpiresAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    UserId,
    TripId,
    Seats,
    TotalAmount,
    WalletAmount,
    GatewayAmount,
    Status,
    ConfirmationCode,
    PaymentReference,
    ExpiresAt,
    CreatedAt,
    UpdatedAt,
}
