// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::AccountKind;
use crate::state::Budget;
use crate::utils::{id_for_account, maybe_print_json, opt, parse_date, parse_decimal, pretty_table, req, today};
use anyhow::{Result, anyhow};

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = req(sub, "name")?;
            let kind: AccountKind = req(sub, "type")?.parse().map_err(|e: String| anyhow!(e))?;
            let balance = parse_decimal(req(sub, "balance")?)?;
            budget.add_account(name, kind, balance)?;
            println!("Added account '{}' ({}, opening {:.2})", name, kind, balance);
        }
        Some(("list", sub)) => {
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budget.accounts())? {
                let data = budget
                    .accounts()
                    .iter()
                    .map(|a| {
                        vec![
                            a.name.clone(),
                            a.r#type.to_string(),
                            format!("{:.2}", a.balance),
                            if a.is_default { "*".into() } else { String::new() },
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Name", "Type", "Balance", "Default"], data)
                );
            }
        }
        Some(("rm", sub)) => {
            let name = req(sub, "name")?;
            let id = id_for_account(budget, name)?;
            budget.remove_account(id, sub.get_flag("cascade"))?;
            println!("Removed account '{}'", name);
        }
        Some(("default", sub)) => {
            let name = req(sub, "name")?;
            budget.set_default_account(id_for_account(budget, name)?)?;
            println!("Default account is now '{}'", name);
        }
        Some(("transfer", sub)) => {
            let from = id_for_account(budget, req(sub, "from")?)?;
            let to = id_for_account(budget, req(sub, "to")?)?;
            let amount = parse_decimal(req(sub, "amount")?)?;
            let date = match opt(sub, "date") {
                Some(d) => parse_date(d)?,
                None => today(sub)?,
            };
            budget.transfer(from, to, amount, date)?;
            println!(
                "Transferred {:.2} from {} to {}",
                amount,
                req(sub, "from")?,
                req(sub, "to")?
            );
        }
        _ => {}
    }
    Ok(())
}
