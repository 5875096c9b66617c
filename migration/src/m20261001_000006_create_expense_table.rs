use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20261001_000001_create_user_table::User, m20261001_000005_create_budget_table::Budget,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expense::Table)
                    .if_not_exists()
                    .col(pk_auto(Expense::Id))
                    .col(integer(Expense::BudgetId))
                    .col(integer(Expense::PaidBy))
                    .col(string_len(Expense::Category, 20))
                    .col(big_integer(Expense::Amount))
                    .col(text_null(Expense::Description))
                    .col(date(Expense::SpentOn))
                    .col(timestamp_with_time_zone(Expense::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_budget_id")
                            .from(Expense::Table, Expense::BudgetId)
                            .to(Budget::Table, Budget::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_expense_paid_by")
                            .from(Expense::Table, Expense::PaidBy)
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
            .drop_table(Table::drop().table(Expense::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Expense {
    Table,
    Id,
    BudgetId,
    PaidBy,
    Category,
    Amount,
    Description,
    SpentOn,
    CreatedAt,
}
