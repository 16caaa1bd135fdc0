// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::Window;
use crate::db::Store;
use crate::dispatcher::Reply;
use crate::models::Expense;
use crate::parser::parse_month_year;
use crate::utils::{chat_table, fmt_date, month_start, week_start};
use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

const MONTHLY_EXPENSES_PATTERN: &str = "/monthly_expenses [month year]";
const SHARED_EXPENSES_PATTERN: &str = "/shared_expenses [month year]";
const READ_FAILED: &str = "Something went wrong with reading your expenses";

pub fn today(store: &Store, today: NaiveDate) -> Result<Reply> {
    let rows = match store.query_by_exact_date(today) {
        Ok(rows) => rows,
        Err(e) => {
            error!("reading today's expenses failed: {e}");
            return Ok(Reply::text(READ_FAILED));
        }
    };
    if rows.is_empty() {
        return Ok(Reply::text("No expenses today"));
    }
    let data = rows
        .iter()
        .map(|e| {
            vec![
                e.name.clone(),
                e.category.clone(),
                e.shared.to_string(),
                e.amount.to_string(),
            ]
        })
        .collect();
    let table = chat_table(&["Name", "Category", "Shared", "Amount"], data);
    Ok(Reply::text(table.to_string()))
}

pub fn weekly(store: &Store, today: NaiveDate, out_dir: &Path) -> Result<Reply> {
    let start = week_start(today);
    let rows = match store.query_by_range(start, today) {
        Ok(rows) => rows,
        Err(e) => {
            error!("reading this week's expenses failed: {e}");
            return Ok(Reply::text(READ_FAILED));
        }
    };
    if rows.is_empty() {
        return Ok(Reply::text("No expenses this week"));
    }
    let path = write_rows(out_dir, "weekly_expenses.txt", &rows)?;
    info!(rows = rows.len(), "weekly expenses exported");
    Ok(Reply::document(
        path,
        format!("Expenses {} - {}", fmt_date(start), fmt_date(today)),
    ))
}

/// Without arguments: the current month up to today. With `<month> <year>`:
/// that whole month.
pub fn monthly(store: &Store, args: &str, today: NaiveDate, out_dir: &Path) -> Result<Reply> {
    let (start, end) = if args.is_empty() {
        let start = month_start(today.year(), today.month()).unwrap_or(today);
        (start, today)
    } else {
        match month_bounds(args, MONTHLY_EXPENSES_PATTERN) {
            Ok(bounds) => bounds,
            Err(msg) => return Ok(Reply::text(msg)),
        }
    };
    let rows = match store.query_by_range(start, end) {
        Ok(rows) => rows,
        Err(e) => {
            error!("reading monthly expenses failed: {e}");
            return Ok(Reply::text(READ_FAILED));
        }
    };
    if rows.is_empty() {
        return Ok(Reply::text("No expenses this month"));
    }
    let path = write_rows(out_dir, "monthly_expenses.txt", &rows)?;
    info!(rows = rows.len(), "monthly expenses exported");
    Ok(Reply::document(
        path,
        format!("Expenses {} - {}", fmt_date(start), fmt_date(end)),
    ))
}

/// Lists the shared ledger for a month together with my half of each entry.
pub fn shared(store: &Store, args: &str, today: NaiveDate) -> Result<Reply> {
    let (start, end) = if args.is_empty() {
        let current = Window::Month {
            month: today.month(),
            year: today.year(),
        };
        match current.bounds() {
            Some(bounds) => bounds,
            None => return Ok(Reply::text(READ_FAILED)),
        }
    } else {
        match month_bounds(args, SHARED_EXPENSES_PATTERN) {
            Ok(bounds) => bounds,
            Err(msg) => return Ok(Reply::text(msg)),
        }
    };
    let rows = match store.query_shared_by_range(start, end) {
        Ok(rows) => rows,
        Err(e) => {
            error!("reading shared expenses failed: {e}");
            return Ok(Reply::text(READ_FAILED));
        }
    };
    if rows.is_empty() {
        return Ok(Reply::text("No shared expenses this month"));
    }

    let mut mine = Decimal::ZERO;
    let mut data = Vec::with_capacity(rows.len());
    for e in &rows {
        let share = (e.amount / Decimal::TWO).normalize();
        mine = mine
            .checked_add(share)
            .context("Shared total does not fit")?;
        data.push(vec![
            fmt_date(e.date),
            e.name.clone(),
            e.category.clone(),
            e.amount.to_string(),
            share.to_string(),
        ]);
    }
    let table = chat_table(&["Date", "Name", "Category", "Amount", "My share"], data);
    Ok(Reply::text(format!("{}\nMy share: {}", table, mine.normalize())))
}

fn month_bounds(args: &str, pattern: &'static str) -> Result<(NaiveDate, NaiveDate), String> {
    let (month, year) = parse_month_year(args, pattern).map_err(|e| e.to_string())?;
    let window = Window::month(month, year).map_err(|e| e.to_string())?;
    window
        .bounds()
        .ok_or_else(|| format!("Month {} is outside the calendar", window))
}

fn write_rows(out_dir: &Path, file_name: &str, rows: &[Expense]) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Create output dir {}", out_dir.display()))?;
    let path = out_dir.join(file_name);
    let mut wtr = csv::Writer::from_path(&path)
        .with_context(|| format!("Create {}", path.display()))?;
    for e in rows {
        wtr.serialize(e.to_row())?;
    }
    wtr.flush()?;
    Ok(path)
}
