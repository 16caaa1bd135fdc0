// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{expenses, help, listings, reports};
use crate::db::Store;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub const UNRECOGNIZED: &str = "I don't understand your command.";
pub const GENERIC_FAILURE: &str = "Something went wrong, please try again.";

static COMMAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^/([A-Za-z_]+)(?:@([A-Za-z0-9_]+))?(?:\s+(.*))?$")
        .expect("command pattern is valid")
});

/// What goes back to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Document { path: PathBuf, caption: String },
}

impl Reply {
    pub fn text(s: impl Into<String>) -> Self {
        Reply::Text(s.into())
    }

    pub fn document(path: PathBuf, caption: impl Into<String>) -> Self {
        Reply::Document {
            path,
            caption: caption.into(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text(s) => Some(s),
            Reply::Document { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: String,
}

impl Command {
    /// Parses `/name[@bot] args...`. Commands addressed to a different bot are
    /// not ours and come back as `None`, like plain text.
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Self> {
        let caps = COMMAND_RE.captures(text.trim())?;
        if let (Some(target), Some(me)) = (caps.get(2), bot_username) {
            if !target.as_str().eq_ignore_ascii_case(me.trim_start_matches('@')) {
                return None;
            }
        }
        Some(Command {
            name: caps[1].to_lowercase(),
            args: caps.get(3).map_or("", |m| m.as_str()).trim().to_string(),
        })
    }
}

pub struct Dispatcher {
    store: Store,
    out_dir: PathBuf,
    bot_username: Option<String>,
    today: Option<NaiveDate>,
}

impl Dispatcher {
    pub fn new(store: Store, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            out_dir: out_dir.into(),
            bot_username: None,
            today: None,
        }
    }

    pub fn with_bot_username(mut self, name: impl Into<String>) -> Self {
        self.bot_username = Some(name.into());
        self
    }

    /// Pins "today" instead of reading the local clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Handles one chat message. Never fails: handler errors are logged and
    /// turned into a generic reply.
    pub fn dispatch(&mut self, text: &str) -> Reply {
        let Some(cmd) = Command::parse(text, self.bot_username.as_deref()) else {
            info!(text, "not a command");
            return Reply::text(UNRECOGNIZED);
        };
        debug!(command = %cmd.name, args = %cmd.args, "dispatching");
        match self.route(&cmd) {
            Ok(reply) => reply,
            Err(e) => {
                error!(command = %cmd.name, "handler failed: {e:#}");
                Reply::text(GENERIC_FAILURE)
            }
        }
    }

    fn route(&mut self, cmd: &Command) -> Result<Reply> {
        let today = self.today();
        let args = cmd.args.as_str();
        match cmd.name.as_str() {
            "start" => Ok(help::start()),
            "help" => Ok(help::help()),
            "expense_help" => Ok(help::expense_help()),
            "expense" => expenses::add(&mut self.store, args, today),
            "old_expense" => expenses::add_old(&mut self.store, args),
            "delete_last_expense" => expenses::delete_last(&mut self.store),
            "today_expenses" => listings::today(&self.store, today),
            "weekly_expenses" => listings::weekly(&self.store, today, &self.out_dir),
            "monthly_expenses" => listings::monthly(&self.store, args, today, &self.out_dir),
            "shared_expenses" => listings::shared(&self.store, args, today),
            "monthly_report" => reports::monthly(&self.store, args, &self.out_dir),
            "yearly_report" => reports::yearly(&self.store, args, &self.out_dir),
            _ => Ok(Reply::text(UNRECOGNIZED)),
        }
    }
}
