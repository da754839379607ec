// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::CategoryKind;
use crate::state::Budget;
use crate::utils::{id_for_category, maybe_print_json, opt, pretty_table, req};
use anyhow::{Result, anyhow};

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = req(sub, "name")?;
            let kind: CategoryKind = req(sub, "type")?.parse().map_err(|e: String| anyhow!(e))?;
            let color = opt(sub, "color").unwrap_or_default();
            budget.add_category(name, kind, color)?;
            println!("Added category '{}' ({})", name, kind);
        }
        Some(("list", sub)) => {
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &budget.categories())? {
                let data = budget
                    .categories()
                    .iter()
                    .map(|c| {
                        vec![
                            c.name.clone(),
                            c.r#type.to_string(),
                            budget.items_in_category(c.id).count().to_string(),
                            format!("{:.2}", c.available),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Category", "Type", "Items", "Available"], data)
                );
            }
        }
        Some(("rm", sub)) => {
            let name = req(sub, "name")?;
            let id = id_for_category(budget, name)?;
            let fallback = match opt(sub, "fallback") {
                Some(f) => Some(id_for_category(budget, f)?),
                None => None,
            };
            budget.remove_category(id, fallback)?;
            match opt(sub, "fallback") {
                Some(f) => println!("Removed category '{}', contents moved to '{}'", name, f),
                None => println!("Removed category '{}'", name),
            }
        }
        _ => {}
    }
    Ok(())
}
