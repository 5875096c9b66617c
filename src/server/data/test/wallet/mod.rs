use crate::server::{
    data::wallet::WalletRepository,
    error::AppError,
    model::wallet::{NewWalletTransaction, TransactionKind},
};
use test_utils::{builder::TestBuilder, factory};

mod get_or_create;
mod transactions;
