// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;

use super::timeline::{Timeline, TimelineStatus};

pub const MAX_URGENCY: Decimal = dec!(100);
pub const CRITICAL_AT: Decimal = dec!(80);
pub const UPCOMING_AT: Decimal = dec!(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrgencyBucket {
    Critical,
    Upcoming,
    OnTrack,
    NoDeadline,
}

impl fmt::Display for UrgencyBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Critical => "critical",
            Self::Upcoming => "upcoming",
            Self::OnTrack => "on-track",
            Self::NoDeadline => "no-deadline",
        })
    }
}

/// 0 means nothing to worry about, 100 means the deadline cannot be met at
/// the current rate.
pub fn urgency_score(timeline: &Timeline) -> Decimal {
    match timeline.status {
        TimelineStatus::NoDeadline | TimelineStatus::FullyFunded => Decimal::ZERO,
        TimelineStatus::Behind => MAX_URGENCY,
        TimelineStatus::OnTrack => match (timeline.paychecks_needed, timeline.available_paychecks) {
            (Some(needed), available) if available > 0 => {
                let ratio = Decimal::from(needed) / Decimal::from(available) * MAX_URGENCY;
                ratio.min(MAX_URGENCY).round_dp(2)
            }
            _ => MAX_URGENCY,
        },
    }
}

pub fn bucket(timeline: &Timeline) -> UrgencyBucket {
    if !timeline.has_deadline() {
        return UrgencyBucket::NoDeadline;
    }
    bucket_for_score(urgency_score(timeline))
}

pub fn bucket_for_score(score: Decimal) -> UrgencyBucket {
    if score >= CRITICAL_AT {
        UrgencyBucket::Critical
    } else if score >= UPCOMING_AT {
        UrgencyBucket::Upcoming
    } else {
        UrgencyBucket::OnTrack
    }
}

/// Mean score across a category's items; `None` if there is nothing to score.
pub fn category_urgency<'a, I>(timelines: I) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a Timeline>,
{
    let (sum, count) = timelines
        .into_iter()
        .fold((Decimal::ZERO, 0u32), |(sum, n), t| (sum + urgency_score(t), n + 1));
    if count == 0 {
        return None;
    }
    Some((sum / Decimal::from(count)).round_dp(2))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub critical: usize,
    pub upcoming: usize,
    pub on_track: usize,
    pub no_deadline: usize,
}

pub fn bucket_counts<'a, I>(timelines: I) -> BucketCounts
where
    I: IntoIterator<Item = &'a Timeline>,
{
    let mut counts = BucketCounts::default();
    for t in timelines {
        match bucket(t) {
            UrgencyBucket::Critical => counts.critical += 1,
            UrgencyBucket::Upcoming => counts.upcoming += 1,
            UrgencyBucket::OnTrack => counts.on_track += 1,
            UrgencyBucket::NoDeadline => counts.no_deadline += 1,
        }
    }
    counts
}
