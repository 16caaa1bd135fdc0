// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{SumOverflow, ValidationError};
use crate::models::Expense;
use crate::utils::{month_end, month_start};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

/// One spend as seen by the aggregations.
#[derive(Debug, Clone, PartialEq)]
pub struct Spend {
    pub date: NaiveDate,
    pub category: String,
    pub amount: Decimal,
}

impl Spend {
    pub fn new(date: NaiveDate, category: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date,
            category: category.into(),
            amount,
        }
    }
}

impl From<&Expense> for Spend {
    fn from(e: &Expense) -> Self {
        Spend::new(e.date, e.category.clone(), e.amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Month { month: u32, year: i32 },
    Year(i32),
}

impl Window {
    pub fn month(month: u32, year: i32) -> Result<Self, ValidationError> {
        if month_start(year, month).is_none() {
            return Err(ValidationError::InvalidMonth(month.to_string()));
        }
        Ok(Window::Month { month, year })
    }

    pub fn year(year: i32) -> Result<Self, ValidationError> {
        if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
            return Err(ValidationError::InvalidYear(year.to_string()));
        }
        Ok(Window::Year(year))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Window::Month { month, year } => date.month() == month && date.year() == year,
            Window::Year(year) => date.year() == year,
        }
    }

    /// First and last calendar day of the window.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            Window::Month { month, year } => Some((month_start(year, month)?, month_end(year, month)?)),
            Window::Year(year) => Some((
                NaiveDate::from_ymd_opt(year, 1, 1)?,
                NaiveDate::from_ymd_opt(year, 12, 31)?,
            )),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Window::Month { month, year } => write!(f, "{}/{}", month, year),
            Window::Year(year) => write!(f, "{}", year),
        }
    }
}

/// Records of one window, split for reporting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Windowed {
    /// Every record in the window at its original amount.
    pub full: Vec<Spend>,
    /// Shared records only, at half their amount.
    pub shared: Vec<Spend>,
}

pub fn windowed(records: &[Expense], window: Window) -> Windowed {
    let mut out = Windowed::default();
    for e in records.iter().filter(|e| window.contains(e.date)) {
        let spend = Spend::from(e);
        if e.shared.is_yes() {
            out.shared.push(Spend {
                amount: spend.amount / Decimal::TWO,
                ..spend.clone()
            });
        }
        out.full.push(spend);
    }
    out
}

/// Adds `amount` onto the bucket at `key`. Sums are checked so a pile of
/// large amounts comes back as an error instead of a panic.
fn accumulate<K: Ord>(
    buckets: &mut BTreeMap<K, Decimal>,
    key: K,
    amount: Decimal,
) -> Result<(), SumOverflow> {
    let total = buckets.entry(key).or_insert(Decimal::ZERO);
    *total = total.checked_add(amount).ok_or(SumOverflow)?;
    Ok(())
}

pub fn by_day(records: &[Spend]) -> Result<BTreeMap<u32, Decimal>, SumOverflow> {
    let mut days: BTreeMap<u32, Decimal> = (1..=31).map(|d| (d, Decimal::ZERO)).collect();
    for r in records {
        accumulate(&mut days, r.date.day(), r.amount)?;
    }
    Ok(days)
}

pub fn by_month(records: &[Spend]) -> Result<BTreeMap<u32, Decimal>, SumOverflow> {
    let mut months: BTreeMap<u32, Decimal> = (1..=12).map(|m| (m, Decimal::ZERO)).collect();
    for r in records {
        accumulate(&mut months, r.date.month(), r.amount)?;
    }
    Ok(months)
}

pub fn by_category(records: &[Spend]) -> Result<BTreeMap<String, Decimal>, SumOverflow> {
    let mut cats = BTreeMap::new();
    for r in records {
        accumulate(&mut cats, r.category.clone(), r.amount)?;
    }
    Ok(cats)
}
