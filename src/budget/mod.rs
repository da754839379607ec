// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure budgeting calculations: nothing in here touches storage.

pub mod allocation;
pub mod frequency;
pub mod ledger;
pub mod paychecks;
pub mod summary;
pub mod timeline;
pub mod urgency;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::PlanningItem;
use timeline::Timeline;
use urgency::UrgencyBucket;

/// Everything computed for one active planning item.
#[derive(Debug, Clone, Serialize)]
pub struct ItemPlan {
    pub item: PlanningItem,
    pub per_paycheck: Decimal,
    pub timeline: Timeline,
    pub urgency: Decimal,
    pub bucket: UrgencyBucket,
}
