//! Wallet and ledger repository.
//!
//! These are plain row operations. Balance checks and the pairing of a balance update
//! with its ledger row live in the wallet service, which runs them in one transaction.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::{
        trip::DEFAULT_CURRENCY,
        wallet::{NewWalletTransaction, Wallet, WalletTransaction},
    },
};

pub struct WalletRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WalletRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find(&self, user_id: i32) -> Result<Option<Wallet>, DbErr> {
        let entity = entity::prelude::Wallet::find_by_id(user_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Wallet::from_entity))
    }

    /// Returns the user's wallet, creating an empty one if none exists yet.
    pub async fn get_or_create(&self, user_id: i32) -> Result<Wallet, DbErr> {
        if let Some(wallet) = self.find(user_id).await? {
            return Ok(wallet);
        }

        let entity = entity::wallet::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            balance: ActiveValue::Set(0),
            currency: ActiveValue::Set(DEFAULT_CURRENCY.to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(Wallet::from_entity(entity))
    }

    pub async fn set_balance(&self, user_id: i32, balance: i64) -> Result<Wallet, DbErr> {
        let entity = entity::wallet::ActiveModel {
            user_id: ActiveValue::Unchanged(user_id),
            balance: ActiveValue::Set(balance),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(Wallet::from_entity(entity))
    }

    pub async fn insert_transaction(
        &self,
        transaction: NewWalletTransaction,
    ) -> Result<WalletTransaction, AppError> {
        let entity = entity::wallet_transaction::ActiveModel {
            user_id: ActiveValue::Set(transaction.user_id),
            kind: ActiveValue::Set(transaction.kind.as_str().to_string()),
            amount: ActiveValue::Set(transaction.amount),
            balance_after: ActiveValue::Set(transaction.balance_after),
            reference: ActiveValue::Set(transaction.reference),
            description: ActiveValue::Set(transaction.description),
            booking_id: ActiveValue::Set(transaction.booking_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        WalletTransaction::from_entity(entity)
    }

    pub async fn find_transaction_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<WalletTransaction>, AppError> {
        entity::prelude::WalletTransaction::find()
            .filter(entity::wallet_transaction::Column::Reference.eq(reference))
            .one(self.db)
            .await?
            .map(WalletTransaction::from_entity)
            .transpose()
    }

    /// Ledger rows of a user, newest first.
    pub async fn transactions(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<WalletTransaction>, u64), AppError> {
        let paginator = entity::prelude::WalletTransaction::find()
            .filter(entity::wallet_transaction::Column::UserId.eq(user_id))
            .order_by_desc(entity::wallet_transaction::Column::CreatedAt)
            .order_by_desc(entity::wallet_transaction::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let transactions = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(WalletTransaction::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((transactions, total))
    }
}
