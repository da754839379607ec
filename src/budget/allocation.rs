// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-paycheck set-aside amounts for planning items.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::frequency::{Frequency, PayFrequency};
use crate::models::{ItemKind, PlanningItem, PriorityState};

/// Pay periods the per-paycheck figures are expressed in.
pub const PERIODS_PER_YEAR: Decimal = dec!(26);

/// Round `value` up to the next multiple of `increment`. A zero increment
/// leaves it exact.
pub fn round_up_to(value: Decimal, increment: Decimal) -> Decimal {
    if increment <= Decimal::ZERO {
        return value;
    }
    (value / increment).ceil() * increment
}

/// Nearest cent, for display only.
pub fn to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// How much to set aside from each paycheck for `item`.
///
/// Paused or completed items, and items that already hold their target,
/// need nothing. Expenses are prorated by what is still owed; savings
/// goals contribute at their monthly rate regardless of progress.
pub fn compute_allocation(
    item: &PlanningItem,
    pay: PayFrequency,
    rounding_increment: Decimal,
) -> Decimal {
    if matches!(
        item.priority_state,
        PriorityState::Paused | PriorityState::Complete
    ) {
        return Decimal::ZERO;
    }
    let remaining = item.target() - item.already_saved;
    if remaining <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let raw = match &item.kind {
        ItemKind::Expense {
            frequency: Frequency::PerPaycheck,
            ..
        } => remaining,
        ItemKind::Expense { amount, .. } if *amount <= Decimal::ZERO => Decimal::ZERO,
        ItemKind::Expense {
            amount, frequency, ..
        } => {
            let yearly = *amount * frequency.occurrences_or_per_paycheck(pay);
            let full = yearly / PERIODS_PER_YEAR;
            full * remaining / *amount
        }
        ItemKind::SavingsGoal {
            monthly_contribution,
            ..
        } => *monthly_contribution * dec!(12) / PERIODS_PER_YEAR,
    };

    round_up_to(raw.max(Decimal::ZERO), rounding_increment)
}

/// Monthly equivalent of the item's cadence, for display and summaries.
pub fn monthly_equivalent(item: &PlanningItem, pay: PayFrequency) -> Decimal {
    let monthly = match &item.kind {
        ItemKind::Expense {
            amount, frequency, ..
        } => *amount * frequency.occurrences_or_per_paycheck(pay) / dec!(12),
        ItemKind::SavingsGoal {
            monthly_contribution,
            ..
        } => *monthly_contribution,
    };
    to_cents(monthly)
}
