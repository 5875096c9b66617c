pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_user_table;
mod m20261001_000002_create_follow_table;
mod m20261001_000003_create_trip_table;
mod m20261001_000004_create_trip_member_table;
mod m20261001_000005_create_budget_table;
mod m20261001_000006_create_expense_table;
mod m20261001_000007_create_story_table;
mod m20261001_000008_create_club_table;
mod m20261001_000009_create_notification_table;
mod m20261001_000010_create_booking_table;
mod m20261001_000011_create_wallet_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_user_table::Migration),
            Box::new(m20261001_000002_create_follow_table::Migration),
            Box::new(m20261001_000003_create_trip_table::Migration),
            Box::new(m20261001_000004_create_trip_member_table::Migration),
            Box::new(m20261001_000005_create_budget_table::Migration),
            Box::new(m20261001_000006_create_expense_table::Migration),
            Box::new(m20261001_000007_create_story_table::Migration),
            Box::new(m20261001_000008_create_club_table::Migration),
            Box::new(m20261001_000009_create_notification_table::Migration),
            Box::new(m20261001_000010_create_booking_table::Migration),
            Box::new(m20261001_000011_create_wallet_tables::Migration),
        ]
    }
}
