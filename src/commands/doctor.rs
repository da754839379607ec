// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::state::Budget;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(budget: &Budget) -> Result<()> {
    let rows: Vec<Vec<String>> = budget
        .warnings()
        .into_iter()
        .map(|(issue, detail)| vec![issue.to_string(), detail])
        .collect();

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
