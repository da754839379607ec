// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use payplan::{Budget, cli, commands, db};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut store = db::open_or_init()?;
    let mut budget = Budget::load(&store)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            budget.save(&mut store)?;
            println!("Data store initialized at {}", db::db_path()?.display());
            return Ok(());
        }
        Some(("account", sub)) => commands::accounts::handle(&mut budget, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut budget, sub)?,
        Some(("item", sub)) => commands::items::handle(&mut budget, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut budget, sub)?,
        Some(("pay", sub)) => commands::pay::handle(&mut budget, sub)?,
        Some(("envelope", sub)) => commands::envelopes::handle(&mut budget, sub)?,
        Some(("config", sub)) => commands::settings::handle(&mut budget, sub)?,
        Some(("plan", sub)) => return commands::plan::handle(&budget, sub),
        Some(("export", sub)) => return commands::exporter::handle(&budget, sub),
        Some(("doctor", _)) => return commands::doctor::handle(&budget),
        _ => {
            cli::build_cli().print_help()?;
            println!();
            return Ok(());
        }
    }
    budget.save(&mut store)?;
    Ok(())
}
