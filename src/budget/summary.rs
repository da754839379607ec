// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Plain-text budget report for copying or saving to a file.

use rust_decimal::Decimal;
use std::fmt;

use super::ItemPlan;
use super::allocation::to_cents;
use crate::models::{Category, PaySchedule};

pub struct SummaryInput<'a> {
    pub currency: &'a str,
    pub pay: Option<&'a PaySchedule>,
    pub to_be_allocated: Decimal,
    pub categories: &'a [Category],
    pub plans: &'a [ItemPlan],
}

pub fn budget_summary(input: &SummaryInput<'_>) -> String {
    input.to_string()
}

impl fmt::Display for SummaryInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ccy = self.currency;
        writeln!(f, "Budget summary ({})", ccy)?;
        match self.pay {
            Some(p) => writeln!(
                f,
                "Pay: {} from {}, {:.2} per paycheck",
                p.frequency,
                p.start_date,
                p.total_per_paycheck()
            )?,
            None => writeln!(f, "Pay: not configured")?,
        }
        writeln!(f, "To Be Allocated: {:.2}", to_cents(self.to_be_allocated))?;
        if self.to_be_allocated < Decimal::ZERO {
            writeln!(f, "  warning: more money is assigned than exists")?;
        }

        let mut total = Decimal::ZERO;
        for cat in self.categories {
            let plans: Vec<&ItemPlan> = self
                .plans
                .iter()
                .filter(|p| p.item.category_id == cat.id)
                .collect();
            writeln!(
                f,
                "\n{} ({}): available {:.2}, allocated {:.2}, spent {:.2}",
                cat.name,
                cat.r#type,
                to_cents(cat.available),
                to_cents(cat.allocated),
                to_cents(cat.spent)
            )?;
            if plans.is_empty() {
                writeln!(f, "  (no planned items)")?;
            }
            for p in plans {
                total += p.per_paycheck;
                let due = p
                    .item
                    .deadline()
                    .map(|d| format!(", due {}", d))
                    .unwrap_or_default();
                writeln!(
                    f,
                    "  - {}: {:.2} {} per paycheck [{}, urgency {:.0}{}]",
                    p.item.name,
                    to_cents(p.per_paycheck),
                    ccy,
                    p.bucket,
                    p.urgency.round(),
                    due
                )?;
                writeln!(f, "    {}", p.timeline.message)?;
            }
        }

        let uncategorized: Vec<&ItemPlan> = self
            .plans
            .iter()
            .filter(|p| !self.categories.iter().any(|c| c.id == p.item.category_id))
            .collect();
        if !uncategorized.is_empty() {
            writeln!(f, "\nUncategorized")?;
            for p in uncategorized {
                total += p.per_paycheck;
                writeln!(
                    f,
                    "  - {}: {:.2} {} per paycheck",
                    p.item.name,
                    to_cents(p.per_paycheck),
                    ccy
                )?;
            }
        }

        writeln!(f, "\nTotal per paycheck: {:.2} {}", to_cents(total), ccy)
    }
}
