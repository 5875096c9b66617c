//! Wallet and ledger domain models.
//!
//! Every balance change is recorded as exactly one `WalletTransaction` whose
//! `reference` is unique. References are built by the helpers at the bottom of this
//! module so that retries of the same logical operation map onto the same ledger row.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::wallet::{PaginatedWalletTransactionsDto, WalletDto, WalletTransactionDto},
    server::{
        error::{internal::InternalError, AppError},
        model::pagination::Page,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    pub user_id: i32,
    /// Balance in minor currency units, never negative.
    pub balance: i64,
    pub currency: String,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    pub fn from_entity(entity: entity::wallet::Model) -> Self {
        Self {
            user_id: entity.user_id,
            balance: entity.balance,
            currency: entity.currency,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> WalletDto {
        WalletDto {
            user_id: self.user_id,
            balance: self.balance,
            currency: self.currency,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Credit,
    Debit,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "credit" => Some(Self::Credit),
            "debit" => Some(Self::Debit),
            _ => None,
        }
    }

    pub fn from_stored(value: &str) -> Result<Self, InternalError> {
        Self::parse(value).ok_or_else(|| InternalError::UnknownEnumValue {
            kind: "wallet transaction kind",
            value: value.to_string(),
        })
    }
}

/// One immutable ledger row.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletTransaction {
    pub id: i32,
    pub user_id: i32,
    pub kind: TransactionKind,
    pub amount: i64,
    /// Wallet balance right after this row was applied.
    pub balance_after: i64,
    pub reference: String,
    pub description: String,
    pub booking_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl WalletTransaction {
    pub fn from_entity(entity: entity::wallet_transaction::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            kind: TransactionKind::from_stored(&entity.kind)?,
            amount: entity.amount,
            balance_after: entity.balance_after,
            reference: entity.reference,
            description: entity.description,
            booking_id: entity.booking_id,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> WalletTransactionDto {
        WalletTransactionDto {
            id: self.id,
            kind: self.kind.as_str().to_string(),
            amount: self.amount,
            balance_after: self.balance_after,
            reference: self.reference,
            description: self.description,
            booking_id: self.booking_id,
            created_at: self.created_at,
        }
    }
}

impl Page<WalletTransaction> {
    pub fn into_dto(self) -> PaginatedWalletTransactionsDto {
        PaginatedWalletTransactionsDto {
            transactions: self
                .items
                .into_iter()
                .map(WalletTransaction::into_dto)
                .collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// A requested balance change. `reference` must be unique per logical operation.
#[derive(Debug, Clone)]
pub struct LedgerEntryParams {
    pub user_id: i32,
    pub amount: i64,
    pub reference: String,
    pub description: String,
    pub booking_id: Option<i32>,
}

/// Values written for a new ledger row.
#[derive(Debug, Clone)]
pub struct NewWalletTransaction {
    pub user_id: i32,
    pub kind: TransactionKind,
    pub amount: i64,
    pub balance_after: i64,
    pub reference: String,
    pub description: String,
    pub booking_id: Option<i32>,
}

/// Result of a client top-up.
#[derive(Debug, Clone, PartialEq)]
pub struct TopUpOutcome {
    pub transaction: WalletTransaction,
    /// `true` when the idempotency key had already been used and nothing was written.
    pub replayed: bool,
}

pub fn top_up_reference(user_id: i32, key: Uuid) -> String {
    format!("topup:{}:{}", user_id, key)
}

pub fn booking_debit_reference(booking_id: i32) -> String {
    format!("booking:{}", booking_id)
}

pub fn booking_refund_reference(booking_id: i32) -> String {
    format!("refund:booking:{}", booking_id)
}

pub fn adjustment_reference(user_id: i32) -> String {
    format!("adjust:{}:{}", user_id, Uuid::new_v4())
}
