// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command};

pub fn build_cli() -> Command {
    command!()
        .about("Chat-driven expense tracker: log expenses with slash commands, get chart reports")
        .arg(
            Arg::new("db")
                .long("db")
                .env("SPENDBOT_DB")
                .global(true)
                .help("SQLite database file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .env("SPENDBOT_OUT_DIR")
                .global(true)
                .default_value(".")
                .help("Where exported files and reports are written"),
        )
        .arg(
            Arg::new("bot-username")
                .long("bot-username")
                .env("SPENDBOT_USERNAME")
                .global(true)
                .help("Accept commands addressed as /command@NAME"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .default_value("info")
                .value_parser(["off", "error", "warn", "info", "debug", "trace"])
                .help("Log level when RUST_LOG is not set"),
        )
        .subcommand(Command::new("init").about("Create the database and print its location"))
        .subcommand(Command::new("chat").about("Read chat messages from stdin, one per line (default)"))
        .subcommand(
            Command::new("send")
                .about("Dispatch a single message and exit")
                .arg(
                    Arg::new("message")
                        .required(true)
                        .num_args(1..)
                        .action(ArgAction::Append)
                        .allow_hyphen_values(true),
                ),
        )
}
