// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use spendbot::config::Config;
use spendbot::db::Store;
use spendbot::dispatcher::{Dispatcher, Reply};
use spendbot::cli;

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let config = Config::from_matches(&matches)?;
    init_logger(config.log_level);
    debug!(?config, "configuration loaded");

    let store = Store::open(&config.db_path)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", config.db_path.display());
        }
        Some(("send", sub)) => {
            let text = sub
                .get_many::<String>("message")
                .map(|vals| vals.cloned().collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            let mut bot = dispatcher(store, &config);
            deliver(&mut io::stdout().lock(), &bot.dispatch(&text))?;
        }
        _ => chat(dispatcher(store, &config))?,
    }
    Ok(())
}

fn dispatcher(store: Store, config: &Config) -> Dispatcher {
    let bot = Dispatcher::new(store, config.out_dir.clone());
    match &config.bot_username {
        Some(name) => bot.with_bot_username(name.clone()),
        None => bot,
    }
}

/// Console transport: one chat message per stdin line.
fn chat(mut bot: Dispatcher) -> Result<()> {
    info!("listening on stdin");
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = bot.dispatch(&line);
        deliver(&mut out, &reply)?;
    }
    info!("stdin closed, shutting down");
    Ok(())
}

fn deliver(out: &mut impl Write, reply: &Reply) -> Result<()> {
    match reply {
        Reply::Text(text) => writeln!(out, "{}", text)?,
        Reply::Document { path, caption } => {
            writeln!(out, "sent document: {} ({})", path.display(), caption)?
        }
    }
    out.flush()?;
    Ok(())
}

/// Installs the tracing subscriber. `RUST_LOG` wins over `--log-level`.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
