// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::budget::frequency::{Frequency, PayFrequency};
use crate::errors::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Checking,
    Savings,
    Credit,
    Investment,
    Cash,
}

impl FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            "credit" => Ok(Self::Credit),
            "investment" => Ok(Self::Investment),
            "cash" => Ok(Self::Cash),
            other => Err(format!(
                "Invalid account type '{}', expected checking|savings|credit|investment|cash",
                other
            )),
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::Credit => "credit",
            Self::Investment => "investment",
            Self::Cash => "cash",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub balance: Decimal,
    pub r#type: AccountKind,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Holds at most one planning item.
    Single,
    Multiple,
}

impl FromStr for CategoryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multiple" => Ok(Self::Multiple),
            other => Err(format!(
                "Invalid category type '{}', expected single|multiple",
                other
            )),
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
        })
    }
}

/// An envelope. `available` is what can still be spent, `allocated` and
/// `spent` are lifetime totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub color: String,
    pub r#type: CategoryKind,
    #[serde(default)]
    pub allocated: Decimal,
    #[serde(default)]
    pub spent: Decimal,
    #[serde(default)]
    pub available: Decimal,
}

impl Category {
    pub fn new(id: i64, name: &str, kind: CategoryKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            color: String::new(),
            r#type: kind,
            allocated: Decimal::ZERO,
            spent: Decimal::ZERO,
            available: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityState {
    #[default]
    Active,
    Paused,
    Complete,
}

impl fmt::Display for PriorityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Complete => "complete",
        })
    }
}

/// What a planning item is saving towards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ItemKind {
    Expense {
        amount: Decimal,
        frequency: Frequency,
        #[serde(default)]
        due_date: Option<NaiveDate>,
    },
    SavingsGoal {
        target_amount: Decimal,
        monthly_contribution: Decimal,
        #[serde(default)]
        target_date: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningItem {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub kind: ItemKind,
    #[serde(default)]
    pub already_saved: Decimal,
    pub category_id: i64,
    pub account_id: i64,
    #[serde(default)]
    pub priority_state: PriorityState,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl PlanningItem {
    /// Amount the item is working towards.
    pub fn target(&self) -> Decimal {
        match &self.kind {
            ItemKind::Expense { amount, .. } => *amount,
            ItemKind::SavingsGoal { target_amount, .. } => *target_amount,
        }
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        match &self.kind {
            ItemKind::Expense { due_date, .. } => *due_date,
            ItemKind::SavingsGoal { target_date, .. } => *target_date,
        }
    }

    pub fn remaining(&self) -> Decimal {
        (self.target() - self.already_saved).max(Decimal::ZERO)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, ItemKind::Expense { .. })
    }
}

/// Derived per-item allocation; rebuilt whenever items or pay change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAllocation {
    pub id: i64,
    pub planning_item_id: i64,
    pub category_id: i64,
    pub monthly_allocation: Decimal,
    pub per_paycheck_amount: Decimal,
    pub source_account_id: i64,
    pub is_paused: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub category_id: Option<i64>,
    pub amount: Decimal,
    #[serde(default)]
    pub memo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub payee: String,
    /// Negative for money leaving the account.
    pub amount: Decimal,
    #[serde(default)]
    pub category_id: Option<i64>,
    pub account_id: i64,
    #[serde(default)]
    pub transfer_account_id: Option<i64>,
    #[serde(default)]
    pub cleared: bool,
    #[serde(default)]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub splits: Vec<Split>,
}

impl Transaction {
    pub fn is_split(&self) -> bool {
        !self.splits.is_empty()
    }

    pub fn is_transfer(&self) -> bool {
        self.transfer_account_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaySchedule {
    pub start_date: NaiveDate,
    pub frequency: PayFrequency,
    #[serde(default)]
    pub split_paycheck: bool,
    pub primary_amount: Decimal,
    #[serde(default)]
    pub secondary_amount: Option<Decimal>,
    #[serde(default)]
    pub secondary_account_id: Option<i64>,
    #[serde(default)]
    pub secondary_days_early: Option<u32>,
}

impl PaySchedule {
    pub fn new(start_date: NaiveDate, frequency: PayFrequency, primary_amount: Decimal) -> Self {
        Self {
            start_date,
            frequency,
            split_paycheck: false,
            primary_amount,
            secondary_amount: None,
            secondary_account_id: None,
            secondary_days_early: None,
        }
    }

    pub fn total_per_paycheck(&self) -> Decimal {
        self.primary_amount + self.secondary_amount.unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.primary_amount < Decimal::ZERO {
            return Err(Error::NegativeAmount(self.primary_amount));
        }
        match self.secondary_amount {
            Some(sec) if sec < Decimal::ZERO => Err(Error::NegativeAmount(sec)),
            _ => Ok(()),
        }
    }
}
