// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::state::Budget;
use crate::utils::{opt, today};
use anyhow::{Context, Result};

pub fn handle(budget: &Budget, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => export_summary(budget, sub),
        _ => Ok(()),
    }
}

fn export_summary(budget: &Budget, sub: &clap::ArgMatches) -> Result<()> {
    let report = budget.summary(today(sub)?);
    match opt(sub, "out") {
        Some(out) => {
            std::fs::write(out, &report).with_context(|| format!("Write {}", out))?;
            println!("Exported budget summary to {}", out);
        }
        None => print!("{}", report),
    }
    Ok(())
}
