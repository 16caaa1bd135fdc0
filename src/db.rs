// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StoreError;
use crate::models::{Expense, NewExpense, Shared};
use crate::utils::{fmt_date, parse_date};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_NAME: &str = "spendbot";
const DB_FILE: &str = "expenses.sqlite";

const COLUMNS: &str = "id, name, category, shared, amount, date";

/// Where the bot keeps its ledger when no `--db` is given. The directory is
/// created by [`Store::open`], not here.
pub fn default_db_path() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_local_dir().join(DB_FILE))
        .context("No home directory to put the expense database in")
}

/// Owner of the SQLite handle. Opened once by the caller and passed to
/// whatever needs storage.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Create DB dir {}", parent.display()))?;
        }
        let conn =
            Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
        let store = Self::from_connection(conn)?;
        info!(path = %path.display(), "opened expense database");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn).context("Initialize schema")?;
        Ok(Self { conn })
    }

    /// Inserts the expense and, when shared, its mirror row. Both writes
    /// commit together or not at all.
    pub fn append(&mut self, expense: &NewExpense) -> Result<Expense, StoreError> {
        expense.validate()?;
        let date = fmt_date(expense.date);
        let shared = expense.shared.to_string();
        let amount = expense.amount.to_string();

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO expenses(name, category, shared, amount, date) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![expense.name, expense.category, shared, amount, date],
        )?;
        let id = tx.last_insert_rowid();
        if expense.shared.is_yes() {
            tx.execute(
                "INSERT INTO shared_expenses(expense_id, name, category, shared, amount, date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, expense.name, expense.category, shared, amount, date],
            )?;
        }
        tx.commit()?;
        debug!(id, shared = expense.shared.is_yes(), "appended expense");

        Ok(Expense {
            id,
            name: expense.name.clone(),
            category: expense.category.clone(),
            shared: expense.shared.clone(),
            amount: expense.amount,
            date: expense.date,
        })
    }

    /// Removes the last inserted expense. Its mirror row goes with it through
    /// the foreign key cascade. Returns `None` when there is nothing to delete.
    pub fn delete_most_recent(&mut self) -> Result<Option<Expense>, StoreError> {
        let tx = self.conn.transaction()?;
        let last = tx
            .query_row(
                &format!("SELECT {COLUMNS} FROM expenses ORDER BY id DESC LIMIT 1"),
                [],
                raw_row,
            )
            .optional()?;
        let Some(raw) = last else {
            return Ok(None);
        };
        let expense = raw.into_expense()?;
        tx.execute("DELETE FROM expenses WHERE id=?1", params![expense.id])?;
        tx.commit()?;
        debug!(id = expense.id, "deleted most recent expense");
        Ok(Some(expense))
    }

    pub fn query_by_exact_date(&self, date: NaiveDate) -> Result<Vec<Expense>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM expenses WHERE date=?1 ORDER BY id"))?;
        let rows = stmt.query_map(params![fmt_date(date)], raw_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?.into_expense()?);
        }
        Ok(out)
    }

    /// Inclusive range over the primary table. Stored dates are dd.mm.yyyy
    /// text, so they are parsed before comparing.
    pub fn query_by_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, StoreError> {
        self.range_from("expenses", start, end)
    }

    pub fn query_shared_by_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, StoreError> {
        self.range_from("shared_expenses", start, end)
    }

    pub fn count(&self) -> Result<i64, StoreError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))?)
    }

    pub fn count_shared(&self) -> Result<i64, StoreError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM shared_expenses", [], |r| r.get(0))?)
    }

    fn range_from(
        &self,
        table: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, StoreError> {
        // mirror rows expose the primary id so both tables read the same way
        let id_col = if table == "shared_expenses" { "expense_id" } else { "id" };
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {id_col}, name, category, shared, amount, date FROM {table} ORDER BY {id_col}"
        ))?;
        let rows = stmt.query_map([], raw_row)?;
        let mut out = Vec::new();
        for row in rows {
            let expense = row?.into_expense()?;
            if expense.date >= start && expense.date <= end {
                out.push(expense);
            }
        }
        Ok(out)
    }
}

struct RawRow {
    id: i64,
    name: String,
    category: String,
    shared: String,
    amount: String,
    date: String,
}

fn raw_row(r: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: r.get(0)?,
        name: r.get(1)?,
        category: r.get(2)?,
        shared: r.get(3)?,
        amount: r.get(4)?,
        date: r.get(5)?,
    })
}

impl RawRow {
    fn into_expense(self) -> Result<Expense, StoreError> {
        let date = parse_date(&self.date).map_err(|_| StoreError::CorruptDate(self.date.clone()))?;
        let amount = self
            .amount
            .parse::<Decimal>()
            .map_err(|_| StoreError::CorruptAmount(self.amount.clone()))?;
        Ok(Expense {
            id: self.id,
            name: self.name,
            category: self.category,
            shared: Shared::parse(&self.shared),
            amount,
            date,
        })
    }
}

fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        category TEXT NOT NULL,
        shared TEXT NOT NULL,
        amount TEXT NOT NULL,
        date TEXT NOT NULL, -- dd.mm.yyyy
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);

    CREATE TABLE IF NOT EXISTS shared_expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        expense_id INTEGER NOT NULL UNIQUE,
        name TEXT NOT NULL,
        category TEXT NOT NULL,
        shared TEXT NOT NULL,
        amount TEXT NOT NULL,
        date TEXT NOT NULL,
        FOREIGN KEY(expense_id) REFERENCES expenses(id) ON DELETE CASCADE
    );
    "#,
    )
}
