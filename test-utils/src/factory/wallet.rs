//! Wallet factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for wallets. The starting balance is written directly without a
/// ledger row, so tests that assert on ledger contents should fund wallets
/// through the wallet service instead.
pub struct WalletFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    balance: i64,
}

impl<'a> WalletFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            balance: 0,
        }
    }

    pub fn balance(mut self, balance: i64) -> Self {
        self.balance = balance;
        self
    }

    pub async fn build(self) -> Result<entity::wallet::Model, DbErr> {
        entity::wallet::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            balance: ActiveValue::Set(self.balance),
            currency: ActiveValue::Set("INR".to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a wallet holding `balance` minor units.
pub async fn create_wallet(
    db: &DatabaseConnection,
    user_id: i32,
    balance: i64,
) -> Result<entity::wallet::Model, DbErr> {
    WalletFactory::new(db, user_id).balance(balance).build().await
}
