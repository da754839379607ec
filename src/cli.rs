// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn required(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).required(true).help(help)
}

fn optional(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

/// Signed money argument; `-12.50` is a value, not a flag.
fn signed(arg: Arg) -> Arg {
    arg.allow_negative_numbers(true)
}

fn item_common(cmd: Command) -> Command {
    cmd.arg(required("name", "Item name"))
        .arg(required("category", "Category name"))
        .arg(optional("account", "Funding account (defaults to the default account)"))
        .arg(optional("saved", "Amount already saved").default_value("0"))
}

pub fn build_cli() -> Command {
    Command::new("payplan")
        .version(crate_version!())
        .about("Paycheck-based envelope budgeting")
        .arg(
            Arg::new("today")
                .long("today")
                .global(true)
                .help("Treat this date (YYYY-MM-DD) as today"),
        )
        .subcommand(Command::new("init").about("Create the data store"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .arg(required("name", "Account name"))
                        .arg(
                            optional("type", "checking|savings|credit|investment|cash")
                                .default_value("checking"),
                        )
                        .arg(signed(optional("balance", "Opening balance")).default_value("0")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("rm")
                        .arg(required("name", "Account name"))
                        .arg(
                            Arg::new("cascade")
                                .long("cascade")
                                .action(ArgAction::SetTrue)
                                .help("Also delete the account's transactions"),
                        ),
                )
                .subcommand(Command::new("default").arg(required("name", "Account name")))
                .subcommand(
                    Command::new("transfer")
                        .arg(required("from", "Source account"))
                        .arg(required("to", "Destination account"))
                        .arg(required("amount", "Amount to move"))
                        .arg(optional("date", "YYYY-MM-DD, defaults to today")),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(required("name", "Category name"))
                        .arg(optional("type", "single|multiple").default_value("multiple"))
                        .arg(optional("color", "Display color").default_value("")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("rm")
                        .arg(required("name", "Category name"))
                        .arg(optional("fallback", "Category that takes over items and money")),
                ),
        )
        .subcommand(
            Command::new("item")
                .about("Manage planning items")
                .subcommand(item_common(
                    Command::new("expense")
                        .arg(required("amount", "Amount per occurrence"))
                        .arg(optional("frequency", "once|weekly|bi-weekly|monthly|...").default_value("monthly"))
                        .arg(optional("due", "Due date YYYY-MM-DD")),
                ))
                .subcommand(item_common(
                    Command::new("goal")
                        .arg(required("target", "Target amount"))
                        .arg(required("monthly", "Monthly contribution"))
                        .arg(optional("by", "Target date YYYY-MM-DD")),
                ))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(required("name", "Item name")))
                .subcommand(Command::new("pause").arg(required("name", "Item name")))
                .subcommand(Command::new("resume").arg(required("name", "Item name")))
                .subcommand(Command::new("complete").arg(required("name", "Item name")))
                .subcommand(Command::new("activate").arg(required("name", "Item name")))
                .subcommand(Command::new("deactivate").arg(required("name", "Item name")))
                .subcommand(
                    Command::new("saved")
                        .about("Set how much is already saved")
                        .arg(required("name", "Item name"))
                        .arg(required("amount", "Amount saved so far")),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record transactions")
                .subcommand(
                    Command::new("add")
                        .arg(required("account", "Account name"))
                        .arg(signed(required("amount", "Signed amount, negative for spending")))
                        .arg(required("payee", "Payee"))
                        .arg(optional("date", "YYYY-MM-DD, defaults to today"))
                        .arg(optional("category", "Category name"))
                        .arg(optional("memo", "Memo"))
                        .arg(
                            Arg::new("split")
                                .long("split")
                                .action(ArgAction::Append)
                                .help("CATEGORY=AMOUNT, repeatable"),
                        )
                        .arg(
                            Arg::new("cleared")
                                .long("cleared")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(optional("account", "Only this account"))
                        .arg(optional("category", "Only this category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(signed(optional("amount", "New signed amount")))
                        .arg(optional("payee", "New payee"))
                        .arg(optional("date", "New date"))
                        .arg(optional("category", "New category")),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("pay")
                .about("Pay schedule")
                .subcommand(
                    Command::new("set")
                        .arg(required("start", "First payday YYYY-MM-DD"))
                        .arg(required("frequency", "weekly|bi-weekly|semi-monthly|monthly"))
                        .arg(required("amount", "Primary paycheck amount"))
                        .arg(optional("secondary-amount", "Secondary deposit amount"))
                        .arg(optional("secondary-account", "Account receiving the secondary deposit"))
                        .arg(
                            Arg::new("days-early")
                                .long("days-early")
                                .value_parser(clap::value_parser!(u32))
                                .help("Days before payday the secondary deposit lands"),
                        ),
                )
                .subcommand(Command::new("show"))
                .subcommand(json_flags(Command::new("upcoming").arg(
                    Arg::new("count").long("count").value_parser(clap::value_parser!(usize)),
                ))),
        )
        .subcommand(
            Command::new("envelope")
                .about("Envelope balances")
                .subcommand(
                    Command::new("fund")
                        .arg(required("category", "Category name"))
                        .arg(signed(required("amount", "Amount to assign"))),
                )
                .subcommand(
                    Command::new("move")
                        .arg(required("from", "Source category"))
                        .arg(required("to", "Destination category"))
                        .arg(required("amount", "Amount to move")),
                )
                .subcommand(json_flags(Command::new("status"))),
        )
        .subcommand(json_flags(
            Command::new("plan").about("Per-paycheck allocations, timelines and urgency"),
        ))
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(signed(Arg::new("value").required(true))),
                ),
        )
        .subcommand(
            Command::new("export").about("Reports").subcommand(
                Command::new("summary").arg(optional("out", "Write to this file instead of stdout")),
            ),
        )
        .subcommand(Command::new("doctor").about("Check data for problems"))
}
