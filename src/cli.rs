// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

use crate::render::MAX_CHART_WIDTH;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .short('m')
        .value_name("YYYY-MM")
        .help("Reporting month (defaults to the current month)")
}

fn entry_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("amount")
            .long("amount")
            .short('a')
            .required(true)
            .allow_hyphen_values(true)
            .help("Non-negative amount, e.g. 12.50"),
    )
    .arg(
        Arg::new("description")
            .long("description")
            .short('d')
            .default_value(""),
    )
    .arg(
        Arg::new("date")
            .long("date")
            .value_name("YYYY-MM-DD[ HH:MM[:SS]]")
            .help("Occurrence date (defaults to now)"),
    )
}

pub fn build_cli() -> Command {
    Command::new("tallybook")
        .version(clap::crate_version!())
        .about("Single-user income and expense ledger with monthly reports")
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .value_name("EMAIL")
                .help("Act as this user instead of the stored current user"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging on stderr"),
        )
        .subcommand(Command::new("init").about("Create the data directory and seed categories"))
        .subcommand(
            Command::new("user")
                .about("Manage users")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("username").required(true))
                        .arg(Arg::new("email").required(true)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("set-active")
                        .arg(Arg::new("email").required(true))
                        .arg(
                            Arg::new("active")
                                .required(true)
                                .value_parser(value_parser!(bool)),
                        ),
                )
                .subcommand(
                    Command::new("switch")
                        .about("Make a user the current user")
                        .arg(Arg::new("email").required(true)),
                )
                .subcommand(Command::new("whoami")),
        )
        .subcommand(
            Command::new("category")
                .about("Manage expense categories")
                .subcommand_required(true)
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("add").arg(Arg::new("name").required(true))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record, list and delete transactions")
                .subcommand_required(true)
                .subcommand(entry_args(
                    Command::new("income")
                        .about("Record income")
                        .arg(Arg::new("source").long("source").short('s').required(true)),
                ))
                .subcommand(entry_args(
                    Command::new("expense")
                        .about("Record an expense")
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .short('c')
                                .required(true),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete one of the current user's transactions")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly reports")
                .subcommand_required(true)
                .subcommand(
                    Command::new("summary")
                        .arg(month_arg())
                        .arg(
                            Arg::new("width")
                                .long("width")
                                .short('w')
                                .value_parser(
                                    value_parser!(u16).range(0..=MAX_CHART_WIDTH as i64),
                                )
                                .help("Ratio chart width (saved for later runs)"),
                        )
                        .arg(
                            Arg::new("no_color")
                                .long("no-color")
                                .action(ArgAction::SetTrue),
                        )
                        .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
                )
                .subcommand(json_flags(Command::new("categories").arg(month_arg())))
                .subcommand(json_flags(Command::new("daily").arg(month_arg()))),
        )
        .subcommand(
            Command::new("export")
                .about("Export the current user's transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .short('f')
                                .default_value("csv"),
                        )
                        .arg(Arg::new("out").long("out").short('o').required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
