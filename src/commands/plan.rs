// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::allocation::to_cents;
use crate::budget::urgency;
use crate::state::Budget;
use crate::utils::{category_name, maybe_print_json, opt_date, pretty_table, today};
use anyhow::Result;

pub fn handle(budget: &Budget, m: &clap::ArgMatches) -> Result<()> {
    let today = today(m)?;
    let mut plans = budget.plans(today);
    // Most urgent first.
    plans.sort_by(|a, b| b.urgency.cmp(&a.urgency).then(a.item.name.cmp(&b.item.name)));

    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &plans)? {
        return Ok(());
    }
    let rows = plans
        .iter()
        .map(|p| {
            vec![
                p.item.name.clone(),
                category_name(budget, Some(p.item.category_id)),
                format!("{:.2}", to_cents(p.per_paycheck)),
                format!("{:.2}", to_cents(p.timeline.remaining_needed)),
                opt_date(p.item.deadline()),
                p.timeline
                    .paychecks_needed
                    .map_or_else(|| "never".into(), |n| n.to_string()),
                p.timeline.available_paychecks.to_string(),
                opt_date(p.timeline.funding_date),
                format!("{:.0}", p.urgency.round()),
                p.bucket.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Item", "Category", "Per paycheck", "Remaining", "Deadline", "Needed", "Available",
                "Funded by", "Urgency", "Bucket"
            ],
            rows
        )
    );
    let counts = urgency::bucket_counts(plans.iter().map(|p| &p.timeline));
    println!(
        "Per paycheck total: {:.2} | critical {} | upcoming {} | on track {} | no deadline {}",
        to_cents(budget.per_paycheck_total()),
        counts.critical,
        counts.upcoming,
        counts.on_track,
        counts.no_deadline
    );
    for p in plans.iter().filter(|p| p.timeline.is_behind()) {
        println!("  {}", p.timeline.message);
    }
    Ok(())
}
