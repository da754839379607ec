// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Split, Transaction};
use crate::state::Budget;
use crate::utils::{
    account_name, category_name, id_for_account, id_for_category, maybe_print_json, opt,
    parse_date, parse_decimal, pretty_table, req, today,
};
use anyhow::{Context, Result, anyhow};
use serde::Serialize;

pub fn handle(budget: &mut Budget, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(budget, sub)?,
        Some(("list", sub)) => list(budget, sub)?,
        Some(("edit", sub)) => edit(budget, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("Missing --id")?;
            let tx = budget.remove_transaction(id)?;
            println!("Deleted {} {:.2} at '{}'", tx.date, tx.amount, tx.payee);
        }
        _ => {}
    }
    Ok(())
}

fn parse_split(budget: &Budget, s: &str) -> Result<Split> {
    let (cat, amount) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid split '{}', expected CATEGORY=AMOUNT", s))?;
    Ok(Split {
        category_id: Some(id_for_category(budget, cat)?),
        amount: parse_decimal(amount)?,
        memo: String::new(),
    })
}

fn add(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let date = match opt(sub, "date") {
        Some(d) => parse_date(d)?,
        None => today(sub)?,
    };
    let account_id = id_for_account(budget, req(sub, "account")?)?;
    let amount = parse_decimal(req(sub, "amount")?)?;
    let payee = req(sub, "payee")?.to_string();
    let category_id = opt(sub, "category")
        .map(|c| id_for_category(budget, c))
        .transpose()?;
    let splits = sub
        .get_many::<String>("split")
        .map(|vals| vals.map(|s| parse_split(budget, s)).collect::<Result<Vec<_>>>())
        .transpose()?
        .unwrap_or_default();

    budget.add_transaction(Transaction {
        id: 0,
        date,
        payee: payee.clone(),
        amount,
        category_id,
        account_id,
        transfer_account_id: None,
        cleared: sub.get_flag("cleared"),
        memo: opt(sub, "memo").map(str::to_string),
        splits,
    })?;
    println!(
        "Recorded {} on {} at '{}' (acct: {})",
        amount,
        date,
        payee,
        req(sub, "account")?
    );
    Ok(())
}

fn edit(budget: &mut Budget, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing --id")?;
    let mut tx = budget
        .transaction(id)
        .cloned()
        .with_context(|| format!("Transaction {} not found", id))?;
    if let Some(a) = opt(sub, "amount") {
        tx.amount = parse_decimal(a)?;
    }
    if let Some(p) = opt(sub, "payee") {
        tx.payee = p.to_string();
    }
    if let Some(d) = opt(sub, "date") {
        tx.date = parse_date(d)?;
    }
    if let Some(c) = opt(sub, "category") {
        tx.category_id = Some(id_for_category(budget, c)?);
    }
    budget.update_transaction(tx)?;
    println!("Updated transaction {}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub account: String,
    pub payee: String,
    pub amount: String,
    pub category: String,
    pub cleared: bool,
}

/// Rows for `tx list`, newest first.
pub fn query_rows(budget: &Budget, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let account = opt(sub, "account").map(|a| id_for_account(budget, a)).transpose()?;
    let category = opt(sub, "category").map(|c| id_for_category(budget, c)).transpose()?;

    let mut txs: Vec<&Transaction> = budget
        .transactions()
        .iter()
        .filter(|t| {
            account.is_none_or(|a| t.account_id == a || t.transfer_account_id == Some(a))
        })
        .filter(|t| {
            category.is_none_or(|c| {
                t.category_id == Some(c) || t.splits.iter().any(|s| s.category_id == Some(c))
            })
        })
        .collect();
    txs.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }

    Ok(txs
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            account: account_name(budget, t.account_id),
            payee: t.payee.clone(),
            amount: t.amount.to_string(),
            category: if t.is_split() {
                "(split)".into()
            } else {
                category_name(budget, t.category_id)
            },
            cleared: t.cleared,
        })
        .collect())
}

fn list(budget: &Budget, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(budget, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.account.clone(),
                    r.payee.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    if r.cleared { "✓".into() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Account", "Payee", "Amount", "Category", "Cleared"],
                rows,
            )
        );
    }
    Ok(())
}
