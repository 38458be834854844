// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("kudiflow")
        .about("Personal finance dashboard: transactions, recurring rules, budgets, streaks, multi-currency reports")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the data store"))
        .subcommand(
            Command::new("user")
                .about("Manage local user profiles")
                .subcommand(
                    Command::new("register")
                        .about("Create a profile")
                        .arg(Arg::new("username").long("username").required(true))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(
                    Command::new("login")
                        .about("Make a profile active")
                        .arg(Arg::new("username").long("username").required(true))
                        .arg(Arg::new("password").long("password").required(true)),
                )
                .subcommand(Command::new("logout").about("Clear the active profile"))
                .subcommand(Command::new("whoami").about("Show the active profile")),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction (amount in the display currency)")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income or expense"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("quantity")
                                .long("quantity")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(Arg::new("payment-method").long("payment-method")),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Change a transaction; missing fields are kept")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(
                    Command::new("delete").about("Delete a transaction").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List the active user's transactions")
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("search").long("search"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                )),
        )
        .subcommand(
            Command::new("recurring")
                .about("Manage recurring transaction rules")
                .subcommand(
                    Command::new("add")
                        .about("Add a rule (amount in the display currency)")
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("type").long("type").required(true))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .required(true)
                                .help("daily, weekly or monthly"),
                        )
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(json_flags(Command::new("list").about("List the active user's rules")))
                .subcommand(
                    Command::new("delete").about("Delete a rule").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("run")
                        .about("Materialize elapsed periods into transactions")
                        .arg(Arg::new("as-of").long("as-of").help("YYYY-MM-DD or RFC 3339")),
                ),
        )
        .subcommand(
            Command::new("settings")
                .about("Per-user settings")
                .subcommand(json_flags(Command::new("show").about("Show current settings")))
                .subcommand(
                    Command::new("set-currency")
                        .about("Change the display currency")
                        .arg(Arg::new("code").long("code").required(true)),
                )
                .subcommand(
                    Command::new("set-budget")
                        .about("Set the overall monthly budget (canonical currency; 0 disables)")
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("set-category-budget")
                        .about("Set one category's budget (canonical currency)")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("set-weekly-goal")
                        .about("Set the weekly spending goal (canonical currency)")
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(
                    Command::new("set-savings-goal")
                        .about("Set the savings goal (canonical currency)")
                        .arg(Arg::new("amount").long("amount").required(true)),
                )
                .subcommand(Command::new("toggle-dark-mode").about("Flip the dark mode flag"))
                .subcommand(Command::new("toggle-confetti").about("Flip the confetti flag"))
                .subcommand(
                    Command::new("toggle-transaction-reminder")
                        .about("Flip the daily transaction reminder flag"),
                )
                .subcommand(
                    Command::new("toggle-budget-alert")
                        .about("Flip the budget overspend alert flag"),
                )
                .subcommand(
                    Command::new("toggle-income-alert").about("Flip the income received alert flag"),
                )
                .subcommand(Command::new("reset").about("Restore default settings")),
        )
        .subcommand(json_flags(
            Command::new("dashboard")
                .about("Render dashboard views from the ledger")
                .arg(
                    Arg::new("view")
                        .long("view")
                        .action(ArgAction::Append)
                        .help("summary, categories, monthly, budget, streak, weekly, projections (default: all)"),
                )
                .arg(Arg::new("category").long("category").help("Category filter; 'All Categories' clears it"))
                .arg(Arg::new("as-of").long("as-of").help("YYYY-MM-DD or RFC 3339")),
        ))
        .subcommand(Command::new("currencies").about("List supported display currencies"))
}
