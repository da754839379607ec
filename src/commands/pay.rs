// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::budget::frequency::PayFrequency;
use crate::budget::paychecks;
use crate::errors::Error;
use crate::models::PaySchedule;
use crate::state::Budget;
use crate::utils::{
    account_name, id_for_account, maybe_print_json, opt, opt_date, parse_date, parse_decimal,
    pretty_table, req, today,
};
use anyhow::Result;

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(budget, sub)?,
        Some(("show", _)) => show(budget),
        Some(("upcoming", sub)) => upcoming(budget, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let frequency: PayFrequency = req(sub, "frequency")?.parse()?;
    let mut schedule = PaySchedule::new(
        parse_date(req(sub, "start")?)?,
        frequency,
        parse_decimal(req(sub, "amount")?)?,
    );
    schedule.secondary_amount = opt(sub, "secondary-amount").map(parse_decimal).transpose()?;
    if let Some(acct) = opt(sub, "secondary-account") {
        schedule.secondary_account_id = Some(id_for_account(budget, acct)?);
        schedule.split_paycheck = true;
        schedule.secondary_days_early = sub.get_one::<u32>("days-early").copied();
    }
    budget.set_pay_schedule(schedule)?;
    println!(
        "Pay schedule set: {} starting {}; {} allocation(s) recalculated",
        frequency,
        req(sub, "start")?,
        budget.allocations().len()
    );
    Ok(())
}

fn show(budget: &Budget) {
    let Some(s) = budget.pay_schedule() else {
        println!("No pay schedule configured");
        return;
    };
    let mut rows = vec![
        vec!["Start".to_string(), s.start_date.to_string()],
        vec!["Frequency".to_string(), s.frequency.to_string()],
        vec!["Primary amount".to_string(), format!("{:.2}", s.primary_amount)],
    ];
    if let Some(a) = s.secondary_amount {
        rows.push(vec!["Secondary amount".to_string(), format!("{:.2}", a)]);
    }
    if s.split_paycheck {
        if let Some(id) = s.secondary_account_id {
            rows.push(vec!["Secondary account".to_string(), account_name(budget, id)]);
        }
        rows.push(vec![
            "Secondary days early".to_string(),
            s.secondary_days_early.unwrap_or(0).to_string(),
        ]);
    }
    println!("{}", pretty_table(&["Setting", "Value"], rows));
}

fn upcoming(budget: &Budget, sub: &clap::ArgMatches) -> Result<()> {
    let today = today(sub)?;
    let schedule = budget.pay_schedule().ok_or(Error::NoPaySchedule)?;
    let list = match sub.get_one::<usize>("count") {
        Some(n) => paychecks::upcoming(schedule, today, *n),
        None => budget.upcoming_paychecks(today),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
        let rows = list
            .iter()
            .map(|p| {
                vec![
                    (p.index + 1).to_string(),
                    p.primary_date.to_string(),
                    format!("{:.2}", p.primary_amount),
                    opt_date(p.secondary_date),
                    format!("{:.2}", p.secondary_amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["#", "Payday", "Primary", "Secondary date", "Secondary"], rows)
        );
    }
    Ok(())
}
