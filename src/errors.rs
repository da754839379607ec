// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown frequency '{0}'")]
    UnknownFrequency(String),

    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(Decimal),

    #[error("Amount cannot be negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("Account {0} not found")]
    AccountNotFound(i64),

    #[error("Category {0} not found")]
    CategoryNotFound(i64),

    #[error("Planning item {0} not found")]
    ItemNotFound(i64),

    #[error("Transaction {0} not found")]
    TransactionNotFound(i64),

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Category '{0}' only holds a single planning item")]
    CategoryFull(String),

    #[error(
        "Category '{name}' still has {items} planning item(s) and {transactions} transaction(s); choose a fallback category"
    )]
    CategoryInUse {
        name: String,
        items: usize,
        transactions: usize,
    },

    #[error("Account '{name}' still has {transactions} transaction(s); delete them as well to continue")]
    AccountHasTransactions { name: String, transactions: usize },

    #[error("Account '{name}' is the funding source of {items} planning item(s)")]
    AccountInUse { name: String, items: usize },

    #[error("Cannot move money from a category to itself")]
    SameCategory,

    #[error("Cannot transfer money from an account to itself")]
    SameAccount,

    #[error("Splits add up to {splits} but the transaction is {amount}")]
    SplitMismatch { splits: Decimal, amount: Decimal },

    #[error("No pay schedule configured")]
    NoPaySchedule,

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
