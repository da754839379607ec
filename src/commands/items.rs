// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::allocation::to_cents;
use crate::budget::frequency::Frequency;
use crate::models::{ItemKind, PlanningItem, PriorityState};
use crate::state::Budget;
use crate::utils::{
    id_for_account, id_for_category, id_for_item, maybe_print_json, opt, opt_date, parse_date,
    parse_decimal, pretty_table, req,
};
use anyhow::{Context, Result};

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expense", sub)) => {
            let amount = parse_decimal(req(sub, "amount")?)?;
            let frequency: Frequency = req(sub, "frequency")?.parse()?;
            let due_date = opt(sub, "due").map(parse_date).transpose()?;
            let kind = ItemKind::Expense {
                amount,
                frequency,
                due_date,
            };
            add(budget, sub, kind)?;
        }
        Some(("goal", sub)) => {
            let kind = ItemKind::SavingsGoal {
                target_amount: parse_decimal(req(sub, "target")?)?,
                monthly_contribution: parse_decimal(req(sub, "monthly")?)?,
                target_date: opt(sub, "by").map(parse_date).transpose()?,
            };
            add(budget, sub, kind)?;
        }
        Some(("list", sub)) => list(budget, sub)?,
        Some(("rm", sub)) => {
            let id = id_for_item(budget, req(sub, "name")?)?;
            let item = budget.remove_item(id)?;
            println!("Removed '{}'", item.name);
        }
        Some(("pause", sub)) => set_state(budget, sub, PriorityState::Paused)?,
        Some(("resume", sub)) => set_state(budget, sub, PriorityState::Active)?,
        Some(("complete", sub)) => set_state(budget, sub, PriorityState::Complete)?,
        Some(("activate", sub)) => set_active(budget, sub, true)?,
        Some(("deactivate", sub)) => set_active(budget, sub, false)?,
        Some(("saved", sub)) => {
            let id = id_for_item(budget, req(sub, "name")?)?;
            let mut item = budget.item(id).cloned().context("Planning item vanished")?;
            item.already_saved = parse_decimal(req(sub, "amount")?)?;
            budget.update_item(item)?;
            println!(
                "'{}' now needs {:.2} per paycheck",
                req(sub, "name")?,
                to_cents(budget.per_paycheck_amount(id))
            );
        }
        _ => {}
    }
    Ok(())
}

fn add(budget: &mut Budget, sub: &clap::ArgMatches, kind: ItemKind) -> Result<()> {
    let name = req(sub, "name")?;
    let category_id = id_for_category(budget, req(sub, "category")?)?;
    let account_id = match opt(sub, "account") {
        Some(a) => id_for_account(budget, a)?,
        None => budget
            .default_account()
            .map(|a| a.id)
            .context("No default account; add an account or pass --account")?,
    };
    let item = PlanningItem {
        id: 0,
        name: name.to_string(),
        kind,
        already_saved: parse_decimal(req(sub, "saved")?)?,
        category_id,
        account_id,
        priority_state: PriorityState::Active,
        is_active: true,
    };
    let id = budget.add_item(item)?;
    println!(
        "Added '{}': {:.2} per paycheck",
        name,
        to_cents(budget.per_paycheck_amount(id))
    );
    Ok(())
}

fn set_state(budget: &mut Budget, sub: &clap::ArgMatches, state: PriorityState) -> Result<()> {
    let name = req(sub, "name")?;
    budget.set_priority_state(id_for_item(budget, name)?, state)?;
    println!("'{}' is now {}", name, state);
    Ok(())
}

fn set_active(budget: &mut Budget, sub: &clap::ArgMatches, active: bool) -> Result<()> {
    let name = req(sub, "name")?;
    budget.set_item_active(id_for_item(budget, name)?, active)?;
    println!(
        "'{}' {} allocation",
        name,
        if active { "included in" } else { "excluded from" }
    );
    Ok(())
}

fn list(budget: &Budget, sub: &clap::ArgMatches) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budget.items())? {
        return Ok(());
    }
    let rows = budget
        .items()
        .iter()
        .map(|i| {
            let (kind, cadence) = match &i.kind {
                ItemKind::Expense { frequency, .. } => ("expense", frequency.to_string()),
                ItemKind::SavingsGoal {
                    monthly_contribution,
                    ..
                } => ("goal", format!("{:.2}/month", monthly_contribution)),
            };
            vec![
                i.name.clone(),
                kind.to_string(),
                crate::utils::category_name(budget, Some(i.category_id)),
                format!("{:.2}", i.target()),
                cadence,
                format!("{:.2}", i.already_saved),
                opt_date(i.deadline()),
                if i.is_active {
                    i.priority_state.to_string()
                } else {
                    "inactive".into()
                },
                format!("{:.2}", to_cents(budget.per_paycheck_amount(i.id))),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Item", "Kind", "Category", "Target", "Cadence", "Saved", "Deadline", "State",
                "Per paycheck"
            ],
            rows
        )
    );
    Ok(())
}
