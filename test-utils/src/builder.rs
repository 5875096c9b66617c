use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Collects the tables a test needs, then creates them in a fresh in-memory database.
///
/// The `with_*_tables` groups include their dependencies and may overlap.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Trip};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Trip)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// `CREATE TABLE IF NOT EXISTS` statements in insertion order.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds the table of `entity`. Add referenced tables before the tables pointing at them.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        let mut stmt = schema.create_table_from_entity(entity);
        stmt.if_not_exists();
        self.tables.push(stmt);
        self
    }

    /// Adds the user table together with follows and notifications.
    pub fn with_user_tables(self) -> Self {
        self.with_table(User)
            .with_table(Follow)
            .with_table(Notification)
    }

    /// User tables plus `Trip` and `TripMember`.
    pub fn with_trip_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Trip)
            .with_table(TripMember)
    }

    /// Adds all tables required for budget and expense operations.
    pub fn with_budget_tables(self) -> Self {
        self.with_trip_tables()
            .with_table(Budget)
            .with_table(Expense)
    }

    /// Adds all tables required for story operations.
    pub fn with_story_tables(self) -> Self {
        self.with_trip_tables()
            .with_table(Story)
            .with_table(StoryLike)
    }

    /// Adds all tables required for club operations.
    pub fn with_club_tables(self) -> Self {
        self.with_user_tables()
            .with_table(Club)
            .with_table(ClubMember)
    }

    /// Adds all tables required for wallet and booking operations.
    ///
    /// Bookings are created before the wallet ledger since ledger rows may
    /// reference the booking they paid for.
    pub fn with_wallet_tables(self) -> Self {
        self.with_trip_tables()
            .with_table(Booking)
            .with_table(Wallet)
            .with_table(WalletTransaction)
    }

    /// Adds every table in the schema.
    pub fn with_all_tables(self) -> Self {
        self.with_wallet_tables()
            .with_budget_tables()
            .with_story_tables()
            .with_club_tables()
    }

    /// Connects to a fresh in-memory database and creates the collected tables.
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
