// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// User-tunable knobs, persisted alongside the budget data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Per-paycheck amounts are rounded up to a multiple of this; 0 disables it.
    pub rounding_increment: Decimal,
    /// How far ahead paycheck listings look.
    pub horizon_months: u32,
    pub paycheck_count: usize,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rounding_increment: Decimal::ZERO,
            horizon_months: 12,
            paycheck_count: 26,
            currency: "USD".to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.rounding_increment < Decimal::ZERO {
            return Err(Error::NegativeAmount(self.rounding_increment));
        }
        Ok(())
    }

    /// Update a single setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let value = value.trim();
        match key.trim() {
            "rounding_increment" | "rounding" => {
                let d = crate::utils::parse_decimal(value)?;
                if d < Decimal::ZERO {
                    anyhow::bail!("rounding_increment cannot be negative");
                }
                self.rounding_increment = d;
            }
            "horizon_months" => self.horizon_months = value.parse()?,
            "paycheck_count" => self.paycheck_count = value.parse()?,
            "currency" => self.currency = value.to_uppercase(),
            other => anyhow::bail!(
                "Unknown setting '{}' (rounding_increment|horizon_months|paycheck_count|currency)",
                other
            ),
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("rounding_increment", self.rounding_increment.to_string()),
            ("horizon_months", self.horizon_months.to_string()),
            ("paycheck_count", self.paycheck_count.to_string()),
            ("currency", self.currency.clone()),
        ]
    }
}
