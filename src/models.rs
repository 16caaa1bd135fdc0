// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ValidationError;
use crate::utils::fmt_date;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Whether an expense was paid jointly. Only `Yes` is mirrored and halved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shared {
    Yes,
    No,
    Other(String),
}

impl Shared {
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("yes") {
            Shared::Yes
        } else if s.eq_ignore_ascii_case("no") {
            Shared::No
        } else {
            Shared::Other(s.to_string())
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Shared::Yes)
    }

    /// True for the two keywords the parser understands as a flag.
    pub fn is_keyword(s: &str) -> bool {
        !matches!(Shared::parse(s), Shared::Other(_))
    }
}

impl fmt::Display for Shared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shared::Yes => f.write_str("yes"),
            Shared::No => f.write_str("no"),
            Shared::Other(s) => f.write_str(s),
        }
    }
}

/// Largest amount a single expense may carry.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// A parsed expense that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub name: String,
    pub category: String,
    pub shared: Shared,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl NewExpense {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge(self.amount));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub shared: Shared,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl Expense {
    pub fn to_row(&self) -> ExpenseRow {
        ExpenseRow {
            name: self.name.clone(),
            category: self.category.clone(),
            shared: self.shared.to_string(),
            amount: self.amount.to_string(),
            date: fmt_date(self.date),
        }
    }
}

/// Text-boundary form of an expense: the date is rendered as dd.mm.yyyy.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseRow {
    pub name: String,
    pub category: String,
    pub shared: String,
    pub amount: String,
    pub date: String,
}
