// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::Window;
use crate::db::Store;
use crate::dispatcher::Reply;
use crate::parser::{parse_month_year, parse_single_year};
use crate::report;
use anyhow::Result;
use std::path::Path;
use tracing::warn;

const MONTHLY_REPORT_PATTERN: &str = "/monthly_report <month> <year>";
const YEARLY_REPORT_PATTERN: &str = "/yearly_report <year>";

pub fn monthly(store: &Store, args: &str, out_dir: &Path) -> Result<Reply> {
    let window = match parse_month_year(args, MONTHLY_REPORT_PATTERN)
        .and_then(|(month, year)| Window::month(month, year))
    {
        Ok(w) => w,
        Err(e) => {
            warn!(args, "rejected monthly report: {e}");
            return Ok(Reply::text(e.to_string()));
        }
    };
    let path = report::generate(store, window, out_dir)?;
    Ok(Reply::document(path, format!("Monthly report {}", window)))
}

pub fn yearly(store: &Store, args: &str, out_dir: &Path) -> Result<Reply> {
    let window = match parse_single_year(args, YEARLY_REPORT_PATTERN).and_then(Window::year) {
        Ok(w) => w,
        Err(e) => {
            warn!(args, "rejected yearly report: {e}");
            return Ok(Reply::text(e.to_string()));
        }
    };
    let path = report::generate(store, window, out_dir)?;
    Ok(Reply::document(path, format!("Yearly report {}", window)))
}
