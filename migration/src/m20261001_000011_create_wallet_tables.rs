use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_user_table::User, m20261001_000010_create_booking_table::Booking,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Wallet::Table)
                    .if_not_exists()
                    .col(integer(Wallet::UserId).primary_key())
                    .col(big_integer(Wallet::Balance).default(0))
                    .col(string_len(Wallet::Currency, 3).default("INR"))
                    .col(timestamp_with_time_zone(Wallet::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wallet_user_id")
                            .from(Wallet::Table, Wallet::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WalletTransaction::Table)
                    .if_not_exists()
                    .col(pk_auto(WalletTransaction::Id))
                    .col(integer(WalletTransaction::UserId))
                    .col(string_len(WalletTransaction::Kind, 10))
                    .col(big_integer(WalletTransaction::Amount))
                    .col(big_integer(WalletTransaction::BalanceAfter))
                    .col(string_uniq(WalletTransaction::Reference))
                    .col(string(WalletTransaction::Description))
                    .col(integer_null(WalletTransaction::BookingId))
                    .col(timestamp_with_time_zone(WalletTransaction::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wallet_transaction_user_id")
                            .from(WalletTransaction::Table, WalletTransaction::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wallet_transaction_booking_id")
                            .from(WalletTransaction::Table, WalletTransaction::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_wallet_transaction_user_id")
                    .table(WalletTransaction::Table)
                    .col(WalletTransaction::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WalletTransaction::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Wallet::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Wallet {
    Table,
    UserId,
    Balance,
    Currency,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum WalletTransaction {
    Table,
    Id,
    UserId,
    Kind,
    Amount,
    BalanceAfter,
    Reference,
    Description,
    BookingId,
    CreatedAt,
}
