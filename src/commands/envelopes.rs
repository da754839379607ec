// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::state::Budget;
use crate::utils::{
    fmt_money, id_for_category, maybe_print_json, parse_decimal, pretty_table, req, today,
};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("fund", sub)) => fund(budget, sub)?,
        Some(("move", sub)) => move_between(budget, sub)?,
        Some(("status", sub)) => status(budget, sub)?,
        _ => {}
    }
    Ok(())
}

fn fund(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let cat = req(sub, "category")?;
    let amount = parse_decimal(req(sub, "amount")?)?;
    let cat_id = id_for_category(budget, cat)?;
    budget.fund_category(cat_id, amount)?;
    let ccy = &budget.settings().currency;
    println!(
        "Funded {} for {}; To Be Allocated {}",
        fmt_money(&amount, ccy),
        cat,
        fmt_money(&budget.to_be_allocated(), ccy)
    );
    Ok(())
}

fn move_between(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let from = req(sub, "from")?;
    let to = req(sub, "to")?;
    let amount = parse_decimal(req(sub, "amount")?)?;
    let from_id = id_for_category(budget, from)?;
    let to_id = id_for_category(budget, to)?;
    budget.move_between(from_id, to_id, amount)?;
    println!(
        "Moved {} {} from {} to {}",
        amount,
        budget.settings().currency,
        from,
        to
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct EnvelopeRow {
    pub category: String,
    pub allocated: Decimal,
    pub spent: Decimal,
    pub available: Decimal,
    pub planned: Decimal,
    pub status: String,
    pub urgency: Option<Decimal>,
}

pub fn envelope_rows(budget: &Budget, today: chrono::NaiveDate) -> Result<Vec<EnvelopeRow>> {
    budget
        .categories()
        .iter()
        .map(|c| {
            Ok(EnvelopeRow {
                category: c.name.clone(),
                allocated: c.allocated,
                spent: c.spent,
                available: c.available,
                planned: budget.total_planned(c.id),
                status: budget.category_funding_status(c.id)?.to_string(),
                urgency: budget.category_urgency(c.id, today),
            })
        })
        .collect()
}

fn status(budget: &Budget, sub: &clap::ArgMatches) -> Result<()> {
    let rows = envelope_rows(budget, today(sub)?)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    let table = rows
        .iter()
        .map(|r| {
            vec![
                r.category.clone(),
                format!("{:.2}", r.allocated),
                format!("{:.2}", r.spent),
                format!("{:.2}", r.available),
                format!("{:.2}", r.planned),
                r.status.clone(),
                r.urgency.map(|u| format!("{:.0}", u)).unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Category", "Allocated", "Spent", "Available", "Planned", "Status", "Urgency"],
            table
        )
    );
    let tba = budget.to_be_allocated();
    println!("To Be Allocated: {:.2}", tba);
    if tba < Decimal::ZERO {
        println!("warning: categories hold more than your accounts do");
    }
    Ok(())
}
