// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::state::Budget;
use crate::utils::{pretty_table, req};
use anyhow::Result;

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = req(sub, "key")?;
            let mut settings = budget.settings().clone();
            settings.set(key, req(sub, "value")?)?;
            budget.set_settings(settings)?;
            println!("Set {} = {}", key, req(sub, "value")?);
        }
        _ => {
            let rows = budget
                .settings()
                .entries()
                .into_iter()
                .map(|(k, v)| vec![k.to_string(), v])
                .collect();
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
    }
    Ok(())
}
