// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ValidationError;
use chrono::{Datelike, Days, NaiveDate};
use comfy_table::{CellAlignment, ContentArrangement, Table, presets::UTF8_BORDERS_ONLY};

/// On-disk and user-facing date format.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

pub fn fmt_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Widest line a phone chat shows without wrapping a monospace block.
const CHAT_WIDTH: u16 = 60;
const MONEY_COLUMNS: [&str; 2] = ["Amount", "My share"];

/// Listing table for a chat reply: borders only, wrapped to the chat width,
/// money columns right-aligned.
pub fn chat_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(CHAT_WIDTH)
        .set_header(headers.to_vec());
    for (i, h) in headers.iter().enumerate() {
        if MONEY_COLUMNS.contains(h) {
            if let Some(col) = t.column_mut(i) {
                col.set_cell_alignment(CellAlignment::Right);
            }
        }
    }
    t.add_rows(rows);
    t
}

pub fn month_start(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let last_day = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, last_day)
}

/// First day of the reporting week: the previous Sunday, or a full week back
/// when `today` is itself a Sunday.
pub fn week_start(today: NaiveDate) -> NaiveDate {
    let since_sunday = today.weekday().num_days_from_sunday();
    let back = if since_sunday == 0 { 7 } else { since_sunday };
    today
        .checked_sub_days(Days::new(u64::from(back)))
        .unwrap_or(today)
}
