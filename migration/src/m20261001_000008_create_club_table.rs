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
                    .table(Club::Table)
                    .if_not_exists()
                    .col(pk_auto(Club::Id))
                    .col(string_uniq(Club::Name))
                    .col(text_null(Club::Description))
                    .col(integer(Club::OwnerId))
                    .col(boolean(Club::IsPrivate).default(false))
                    .col(timestamp_with_time_zone(Club::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_club_owner_id")
                            .from(Club::Table, Club::OwnerId)
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
                    .table(ClubMember::Table)
                    .if_not_exists()
                    .col(integer(ClubMember::ClubId))
                    .col(integer(ClubMember::UserId))
                    .col(string_len(ClubMember::Role, 20).default("member"))
                    .col(timestamp_with_time_zone(ClubMember::JoinedAt))
                    .primary_key(
                        Index::create()
                            .col(ClubMember::ClubId)
                            .col(ClubMember::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_club_member_club_id")
                            .from(ClubMember::Table, ClubMember::ClubId)
                            .to(Club::Table, Club::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_club_member_user_id")
                            .from(ClubMember::Table, ClubMember::UserId)
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
            .drop_table(Table::drop().table(ClubMember::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Club::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Club {
    Table,
    Id,
    Name,
    Description,
    OwnerId,
    IsPrivate,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum ClubMember {
    Table,
    ClubId,
    UserId,
    Role,
    JoinedAt,
}
