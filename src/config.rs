// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::default_db_path;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub out_dir: PathBuf,
    pub bot_username: Option<String>,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let db_path = match m.get_one::<String>("db") {
            Some(p) => PathBuf::from(p),
            None => default_db_path()?,
        };
        let out_dir = m
            .get_one::<String>("out-dir")
            .map_or_else(|| PathBuf::from("."), PathBuf::from);
        let level = m
            .get_one::<String>("log-level")
            .map_or("info", |s| s.as_str());
        let log_level = LevelFilter::from_str(level)
            .with_context(|| format!("Invalid log level '{}'", level))?;
        Ok(Self {
            db_path,
            out_dir,
            bot_username: m.get_one::<String>("bot-username").cloned(),
            log_level,
        })
    }
}
