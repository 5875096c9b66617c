//! Wallet ledger service.
//!
//! Every balance change goes through [`apply_entry`], which runs the balance check, the
//! balance update and the ledger insert on the connection it is given. Public methods
//! wrap it in their own transaction; the booking service calls it inside the booking
//! transaction so a debit and the booking row commit together.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::{user::UserRepository, wallet::WalletRepository},
    error::{wallet::WalletError, AppError},
    model::{
        notification::{NotificationKind, SendNotificationParams},
        pagination::Page,
        wallet::{
            adjustment_reference, top_up_reference, LedgerEntryParams, NewWalletTransaction,
            TopUpOutcome, TransactionKind, Wallet, WalletTransaction,
        },
    },
    service::notification::NotificationService,
};

pub struct WalletService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WalletService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the user's wallet, creating an empty one on first access.
    pub async fn get_wallet(&self, user_id: i32) -> Result<Wallet, AppError> {
        Ok(WalletRepository::new(self.db).get_or_create(user_id).await?)
    }

    pub async fn credit(&self, params: LedgerEntryParams) -> Result<WalletTransaction, AppError> {
        self.apply(TransactionKind::Credit, params)
            .await
            .map(|(transaction, _)| transaction)
    }

    pub async fn debit(&self, params: LedgerEntryParams) -> Result<WalletTransaction, AppError> {
        self.apply(TransactionKind::Debit, params)
            .await
            .map(|(transaction, _)| transaction)
    }

    /// Credits a client top-up identified by an idempotency key.
    ///
    /// Replaying the same key with the same amount returns the original transaction and
    /// leaves the balance untouched.
    ///
    /// # Returns
    /// - `Ok(TopUpOutcome)` - New or replayed transaction
    /// - `Err(WalletError::InvalidAmount)` - Amount is not positive
    /// - `Err(WalletError::IdempotencyConflict)` - Key reused with a different amount
    pub async fn top_up(
        &self,
        user_id: i32,
        amount: i64,
        idempotency_key: Uuid,
    ) -> Result<TopUpOutcome, AppError> {
        let (transaction, replayed) = self
            .apply(
                TransactionKind::Credit,
                LedgerEntryParams {
                    user_id,
                    amount,
                    reference: top_up_reference(user_id, idempotency_key),
                    description: "Wallet top-up".to_string(),
                    booking_id: None,
                },
            )
            .await?;

        if replayed {
            tracing::debug!(
                "Replayed top-up {} for user {}",
                transaction.reference,
                user_id
            );
        }

        Ok(TopUpOutcome {
            transaction,
            replayed,
        })
    }

    /// Applies an admin credit or debit and tells the user about it.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Target user does not exist
    /// - `Err(AppError::BadRequest)` - Empty reason
    pub async fn adjust(
        &self,
        user_id: i32,
        kind: TransactionKind,
        amount: i64,
        reason: &str,
    ) -> Result<WalletTransaction, AppError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(AppError::BadRequest(
                "A reason is required for wallet adjustments".to_string(),
            ));
        }
        if UserRepository::new(self.db).find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let (transaction, _) = self
            .apply(
                kind,
                LedgerEntryParams {
                    user_id,
                    amount,
                    reference: adjustment_reference(user_id),
                    description: format!("Adjustment: {}", reason),
                    booking_id: None,
                },
            )
            .await?;

        tracing::info!(
            "Wallet of user {} adjusted by {} {} ({})",
            user_id,
            kind.as_str(),
            amount,
            reason
        );

        NotificationService::new(self.db)
            .notify(SendNotificationParams {
                user_id,
                kind: NotificationKind::Wallet,
                title: "Wallet adjusted".to_string(),
                message: format!("Your wallet received a {} of {}", kind.as_str(), amount),
                data: serde_json::json!({
                    "transaction_id": transaction.id,
                    "balance_after": transaction.balance_after,
                }),
            })
            .await;

        Ok(transaction)
    }

    /// Ledger of a user, newest first.
    pub async fn transactions(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<Page<WalletTransaction>, AppError> {
        let (transactions, total) = WalletRepository::new(self.db)
            .transactions(user_id, page, per_page)
            .await?;

        Ok(Page::new(transactions, total, page, per_page))
    }

    /// Runs [`apply_entry`] in its own transaction.
    ///
    /// Two requests with the same reference can both miss the lookup; the later insert
    /// or commit then fails on the unique reference. A failed write is therefore checked
    /// against the stored ledger before the error is returned.
    async fn apply(
        &self,
        kind: TransactionKind,
        params: LedgerEntryParams,
    ) -> Result<(WalletTransaction, bool), AppError> {
        let attempt = params.clone();
        match self.apply_in_transaction(kind, params).await {
            Err(AppError::DbErr(err)) => replay_stored_entry(self.db, kind, &attempt, err).await,
            result => result,
        }
    }

    async fn apply_in_transaction(
        &self,
        kind: TransactionKind,
        params: LedgerEntryParams,
    ) -> Result<(WalletTransaction, bool), AppError> {
        let txn = self.db.begin().await?;
        let result = apply_entry(&txn, kind, params).await?;
        txn.commit().await?;

        Ok(result)
    }
}

/// Applies one ledger entry on `db`, which should be a transaction.
///
/// If the reference already exists with the same user, kind and amount the stored
/// transaction is returned and nothing is written.
///
/// # Returns
/// - `Ok((transaction, replayed))` - The ledger row and whether it already existed
/// - `Err(WalletError::InvalidAmount)` - Amount is not positive
/// - `Err(WalletError::InsufficientFunds)` - Debit larger than the balance
/// - `Err(WalletError::IdempotencyConflict)` - Reference reused for a different entry
pub(crate) async fn apply_entry<C: ConnectionTrait>(
    db: &C,
    kind: TransactionKind,
    params: LedgerEntryParams,
) -> Result<(WalletTransaction, bool), AppError> {
    if params.amount <= 0 {
        return Err(WalletError::InvalidAmount(params.amount).into());
    }

    let wallet_repo = WalletRepository::new(db);

    if let Some(existing) = wallet_repo
        .find_transaction_by_reference(&params.reference)
        .await?
    {
        if is_same_entry(&existing, kind, &params) {
            return Ok((existing, true));
        }
        return Err(WalletError::IdempotencyConflict(params.reference).into());
    }

    let wallet = wallet_repo.get_or_create(params.user_id).await?;
    let balance_after = match kind {
        TransactionKind::Credit => wallet.balance.checked_add(params.amount).ok_or_else(|| {
            AppError::BadRequest("Wallet balance would overflow".to_string())
        })?,
        TransactionKind::Debit => {
            if params.amount > wallet.balance {
                return Err(WalletError::InsufficientFunds {
                    balance: wallet.balance,
                    requested: params.amount,
                }
                .into());
            }
            wallet.balance - params.amount
        }
    };

    wallet_repo
        .set_balance(params.user_id, balance_after)
        .await?;
    let transaction = wallet_repo
        .insert_transaction(NewWalletTransaction {
            user_id: params.user_id,
            kind,
            amount: params.amount,
            balance_after,
            reference: params.reference,
            description: params.description,
            booking_id: params.booking_id,
        })
        .await?;

    Ok((transaction, false))
}

/// Resolves a failed ledger write against the row stored under the same reference.
///
/// # Returns
/// - `Ok((transaction, true))` - A matching entry was committed by another request
/// - `Err(WalletError::IdempotencyConflict)` - The reference holds a different entry
/// - `Err(AppError::DbErr)` - Nothing is stored under the reference; `err` is returned
pub(crate) async fn replay_stored_entry<C: ConnectionTrait>(
    db: &C,
    kind: TransactionKind,
    params: &LedgerEntryParams,
    err: DbErr,
) -> Result<(WalletTransaction, bool), AppError> {
    match WalletRepository::new(db)
        .find_transaction_by_reference(&params.reference)
        .await?
    {
        Some(existing) if is_same_entry(&existing, kind, params) => {
            tracing::debug!(
                "Write of {} lost to a concurrent request; replaying stored entry",
                params.reference
            );
            Ok((existing, true))
        }
        Some(_) => Err(WalletError::IdempotencyConflict(params.reference.clone()).into()),
        None => Err(err.into()),
    }
}

fn is_same_entry(
    existing: &WalletTransaction,
    kind: TransactionKind,
    params: &LedgerEntryParams,
) -> bool {
    existing.user_id == params.user_id && existing.kind == kind && existing.amount == params.amount
}
