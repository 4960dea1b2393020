// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, ArgGroup, Command, crate_version};

use crate::config::DB_ENV;

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print JSON Lines"),
    )
}

fn filter_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("month").long("month").help("YYYY-MM"))
        .arg(Arg::new("from").long("from").help("Start date YYYY-MM-DD (inclusive)"))
        .arg(Arg::new("to").long("to").help("End date YYYY-MM-DD (inclusive)"))
        .arg(
            Arg::new("range")
                .long("range")
                .help("Preset range: 1m|3m|6m|1y|all"),
        )
        .arg(
            Arg::new("offset")
                .long("offset")
                .value_parser(clap::value_parser!(i32))
                .allow_negative_numbers(true)
                .conflicts_with_all(["range", "from", "to"])
                .help("Move the month window by N months (-1 is the previous month)"),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .help("Category name or 'all'"),
        )
        .group(
            ArgGroup::new("period")
                .args(["month", "range", "from"])
                .multiple(false),
        )
        .group(
            ArgGroup::new("period_end")
                .args(["month", "range", "to"])
                .multiple(false),
        )
}

fn tx_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("amount")
            .long("amount")
            .required(required)
            .allow_hyphen_values(true)
            .help("Positive amount"),
    )
    .arg(
        Arg::new("description")
            .long("description")
            .short('d')
            .required(required),
    )
    .arg(Arg::new("category").long("category").short('c'))
    .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
    .arg(
        Arg::new("income")
            .long("income")
            .action(ArgAction::SetTrue)
            .help("Record as income instead of expense"),
    )
}

pub fn build_cli() -> Command {
    Command::new("spendtrail")
        .about("Track income and expenses, with category and trend reports")
        .version(crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env(DB_ENV)
                .help("Path to the SQLite store"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .subcommand(Command::new("init").about("Create the store and seed demo data"))
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(tx_fields(Command::new("add"), true))
                .subcommand(
                    tx_fields(
                        Command::new("edit").arg(Arg::new("id").required(true)),
                        false,
                    )
                    .arg(
                        Arg::new("expense")
                            .long("expense")
                            .action(ArgAction::SetTrue)
                            .conflicts_with("income")
                            .help("Record as expense"),
                    ),
                )
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true)))
                .subcommand(json_args(filter_args(
                    Command::new("list")
                        .arg(
                            Arg::new("sort")
                                .long("sort")
                                .value_parser(["date", "amount", "category"])
                                .default_value("date"),
                        )
                        .arg(
                            Arg::new("asc")
                                .long("asc")
                                .action(ArgAction::SetTrue)
                                .help("Ascending order (default is descending)"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize)),
                        ),
                ))),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregate reports")
                .subcommand(json_args(filter_args(Command::new("summary"))))
                .subcommand(json_args(filter_args(Command::new("categories"))))
                .subcommand(json_args(filter_args(Command::new("trend")))),
        )
        .subcommand(
            Command::new("category")
                .about("Category reference table")
                .subcommand(json_args(Command::new("list"))),
        )
        .subcommand(Command::new("doctor").about("Check stored records for integrity problems"))
}
