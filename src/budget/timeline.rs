// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Will an item be funded before its deadline at the current rate?

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use super::allocation::to_cents;
use crate::models::PlanningItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimelineStatus {
    NoDeadline,
    FullyFunded,
    OnTrack,
    Behind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub status: TimelineStatus,
    pub deadline: Option<NaiveDate>,
    pub funding_date: Option<NaiveDate>,
    pub remaining_needed: Decimal,
    /// `None` when the allocation rate is zero and the target is never reached.
    pub paychecks_needed: Option<u32>,
    pub available_paychecks: usize,
    /// Per-paycheck rate that would still make the deadline. `None` when no
    /// paychecks are left before it.
    pub required_allocation: Option<Decimal>,
    pub message: String,
}

impl Timeline {
    pub fn has_deadline(&self) -> bool {
        self.status != TimelineStatus::NoDeadline
    }

    pub fn is_behind(&self) -> bool {
        self.status == TimelineStatus::Behind
    }
}

/// Project funding for `item` given its per-paycheck `allocation` and the
/// paydays that reach its account on or before the deadline.
pub fn compute_timeline(
    item: &PlanningItem,
    allocation: Decimal,
    relevant_paychecks: &[NaiveDate],
) -> Timeline {
    let remaining = item.remaining();
    let deadline = item.deadline();
    let available = relevant_paychecks.len();

    if remaining <= Decimal::ZERO {
        return Timeline {
            status: TimelineStatus::FullyFunded,
            deadline,
            funding_date: None,
            remaining_needed: Decimal::ZERO,
            paychecks_needed: Some(0),
            available_paychecks: available,
            required_allocation: Some(Decimal::ZERO),
            message: format!("{} is fully funded", item.name),
        };
    }

    let paychecks_needed = paychecks_needed(remaining, allocation);

    let Some(deadline) = deadline else {
        return Timeline {
            status: TimelineStatus::NoDeadline,
            deadline: None,
            funding_date: None,
            remaining_needed: remaining,
            paychecks_needed,
            available_paychecks: available,
            required_allocation: None,
            message: format!("{} has no deadline; {:.2} still to save", item.name, remaining),
        };
    };

    let funding_date = paychecks_needed
        .and_then(|n| relevant_paychecks.get((n as usize).max(1) - 1))
        .copied();

    let on_track = paychecks_needed.is_some_and(|n| n as usize <= available);
    if on_track {
        let needed = paychecks_needed.unwrap_or_default();
        return Timeline {
            status: TimelineStatus::OnTrack,
            deadline: Some(deadline),
            funding_date,
            remaining_needed: remaining,
            paychecks_needed,
            available_paychecks: available,
            required_allocation: Some(allocation),
            message: format!(
                "On track: {} paycheck(s) of {:.2} fund {} by {}",
                needed,
                to_cents(allocation),
                item.name,
                funding_date.unwrap_or(deadline)
            ),
        };
    }

    let required = if available == 0 {
        None
    } else {
        Some(
            (remaining / Decimal::from(available))
                .round_dp_with_strategy(2, RoundingStrategy::AwayFromZero),
        )
    };
    let message = match required {
        Some(r) => format!(
            "Behind: {} needs {:.2} per paycheck over {} paycheck(s) to make {}",
            item.name, r, available, deadline
        ),
        None => format!(
            "Behind: no paychecks left before {} to fund {:.2} for {}",
            deadline, remaining, item.name
        ),
    };
    Timeline {
        status: TimelineStatus::Behind,
        deadline: Some(deadline),
        funding_date: None,
        remaining_needed: remaining,
        paychecks_needed,
        available_paychecks: available,
        required_allocation: required,
        message,
    }
}

fn paychecks_needed(remaining: Decimal, allocation: Decimal) -> Option<u32> {
    if allocation <= Decimal::ZERO {
        return None;
    }
    // Quotients within 1e-12 of a whole number count as that number.
    (remaining / allocation).round_dp(12).ceil().to_u32()
}
