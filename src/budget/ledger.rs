// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Envelope balances and the account side of transactions.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;

use crate::errors::{Error, Result};
use crate::models::{Account, Category, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FundingStatus {
    Overspent,
    NoPlan,
    FullyFunded,
    HalfFunded,
    NeedsFunding,
}

impl fmt::Display for FundingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Overspent => "overspent",
            Self::NoPlan => "no-plan",
            Self::FullyFunded => "fully-funded",
            Self::HalfFunded => "half-funded",
            Self::NeedsFunding => "needs-funding",
        })
    }
}

fn category_mut(categories: &mut [Category], id: i64) -> Result<&mut Category> {
    categories
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(Error::CategoryNotFound(id))
}

/// Move unassigned money into an envelope.
pub fn fund_category(categories: &mut [Category], id: i64, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::NonPositiveAmount(amount));
    }
    let cat = category_mut(categories, id)?;
    cat.allocated += amount;
    cat.available += amount;
    tracing::debug!(category = %cat.name, %amount, available = %cat.available, "funded category");
    Ok(())
}

/// Move envelope money from one category to another.
pub fn move_between(categories: &mut [Category], from: i64, to: i64, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::NonPositiveAmount(amount));
    }
    if from == to {
        return Err(Error::SameCategory);
    }
    // Resolve both before touching either.
    category_mut(categories, to)?;
    let src = category_mut(categories, from)?;
    src.allocated -= amount;
    src.available -= amount;
    let dst = category_mut(categories, to)?;
    dst.allocated += amount;
    dst.available += amount;
    Ok(())
}

/// Record categorized spending against an envelope. Inflows leave it alone.
pub fn apply_transaction_effect(category: &mut Category, amount: Decimal, is_outflow: bool) {
    if !is_outflow {
        return;
    }
    let spend = amount.abs();
    category.spent += spend;
    category.available -= spend;
}

/// Exact inverse of [`apply_transaction_effect`]; `spent` never drops below zero.
pub fn reverse_transaction_effect(category: &mut Category, amount: Decimal, is_outflow: bool) {
    if !is_outflow {
        return;
    }
    let spend = amount.abs();
    category.spent = (category.spent - spend).max(Decimal::ZERO);
    category.available += spend;
}

/// Per-category amounts a transaction spends: the splits if it has any,
/// otherwise the whole amount against its own category.
pub fn category_effects(tx: &Transaction) -> Vec<(i64, Decimal)> {
    if tx.is_split() {
        tx.splits
            .iter()
            .filter_map(|s| s.category_id.map(|c| (c, s.amount)))
            .collect()
    } else {
        tx.category_id
            .map(|c| vec![(c, tx.amount)])
            .unwrap_or_default()
    }
}

/// Check every id the transaction touches exists and that splits add up.
pub fn validate_transaction(
    tx: &Transaction,
    accounts: &[Account],
    categories: &[Category],
) -> Result<()> {
    let has_account = |id: i64| accounts.iter().any(|a| a.id == id);
    if !has_account(tx.account_id) {
        return Err(Error::AccountNotFound(tx.account_id));
    }
    if let Some(t) = tx.transfer_account_id {
        if t == tx.account_id {
            return Err(Error::SameAccount);
        }
        if !has_account(t) {
            return Err(Error::AccountNotFound(t));
        }
    }
    if tx.is_split() {
        let splits: Decimal = tx.splits.iter().map(|s| s.amount).sum();
        if splits != tx.amount {
            return Err(Error::SplitMismatch {
                splits,
                amount: tx.amount,
            });
        }
    }
    for (cat, _) in category_effects(tx) {
        if !categories.iter().any(|c| c.id == cat) {
            return Err(Error::CategoryNotFound(cat));
        }
    }
    Ok(())
}

/// Apply a transaction to balances and envelopes. Ids must already be
/// validated.
pub fn apply_transaction(tx: &Transaction, accounts: &mut [Account], categories: &mut [Category]) {
    for acct in accounts.iter_mut() {
        if acct.id == tx.account_id {
            acct.balance += tx.amount;
        } else if Some(acct.id) == tx.transfer_account_id {
            acct.balance -= tx.amount;
        }
    }
    for (cat_id, amount) in category_effects(tx) {
        if let Some(cat) = categories.iter_mut().find(|c| c.id == cat_id) {
            apply_transaction_effect(cat, amount, amount < Decimal::ZERO);
        }
    }
}

pub fn reverse_transaction(tx: &Transaction, accounts: &mut [Account], categories: &mut [Category]) {
    for acct in accounts.iter_mut() {
        if acct.id == tx.account_id {
            acct.balance -= tx.amount;
        } else if Some(acct.id) == tx.transfer_account_id {
            acct.balance += tx.amount;
        }
    }
    for (cat_id, amount) in category_effects(tx) {
        if let Some(cat) = categories.iter_mut().find(|c| c.id == cat_id) {
            reverse_transaction_effect(cat, amount, amount < Decimal::ZERO);
        }
    }
}

pub fn funding_status(category: &Category, total_planned: Decimal, item_count: usize) -> FundingStatus {
    if category.available < Decimal::ZERO {
        FundingStatus::Overspent
    } else if total_planned.is_zero() && item_count == 0 {
        FundingStatus::NoPlan
    } else if category.available >= total_planned {
        FundingStatus::FullyFunded
    } else if category.available >= total_planned * dec!(0.5) {
        FundingStatus::HalfFunded
    } else {
        FundingStatus::NeedsFunding
    }
}

/// Real money not yet assigned to any envelope. Negative means the
/// envelopes hold more than the accounts do.
pub fn to_be_allocated(accounts: &[Account], categories: &[Category]) -> Decimal {
    let balances: Decimal = accounts.iter().map(|a| a.balance).sum();
    let allocated: Decimal = categories.iter().map(|c| c.allocated).sum();
    balances - allocated
}
