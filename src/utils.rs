// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

use crate::state::Budget;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Value of a required string argument.
pub fn req<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.trim())
        .with_context(|| format!("Missing --{}", name))
}

pub fn opt<'a>(m: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

/// `--today` if given, otherwise the local calendar date.
pub fn today(m: &clap::ArgMatches) -> Result<NaiveDate> {
    match m.try_get_one::<String>("today").ok().flatten() {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn opt_date(d: Option<NaiveDate>) -> String {
    d.map(|d| d.to_string()).unwrap_or_else(|| "-".into())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_account(budget: &Budget, name: &str) -> Result<i64> {
    budget
        .account_by_name(name)
        .map(|a| a.id)
        .with_context(|| format!("Account '{}' not found", name.trim()))
}

pub fn id_for_category(budget: &Budget, name: &str) -> Result<i64> {
    budget
        .category_by_name(name)
        .map(|c| c.id)
        .with_context(|| format!("Category '{}' not found", name.trim()))
}

pub fn id_for_item(budget: &Budget, name: &str) -> Result<i64> {
    budget
        .item_by_name(name)
        .map(|i| i.id)
        .with_context(|| format!("Planning item '{}' not found", name.trim()))
}

pub fn account_name(budget: &Budget, id: i64) -> String {
    budget
        .account(id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| format!("#{}", id))
}

pub fn category_name(budget: &Budget, id: Option<i64>) -> String {
    match id {
        Some(id) => budget
            .category(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("#{}", id)),
        None => String::new(),
    }
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
