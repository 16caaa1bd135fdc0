// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turns command arguments into validated values.
//!
//! Expense arguments follow `<category> <name...> <shared> <amount> [date]`.
//! The category is read from the front, the fixed trailing fields from the
//! back, and whatever is left in the middle is the name.

use crate::error::ValidationError;
use crate::models::{MAX_AMOUNT, NewExpense, Shared};
use crate::utils::parse_date;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::collections::{HashMap, VecDeque};

pub const EXPENSE_PATTERN: &str = "/expense <category> <name> <shared> <amount>";
pub const OLD_EXPENSE_PATTERN: &str = "/old_expense <category> <name> <shared> <amount> <dd.mm.yyyy>";

static CATEGORIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("food", "food"),
        ("cosmetics", "cosmetics"),
        ("hc", "house cleaning"),
        ("eo", "eating out"),
        ("cravings", "cravings"),
        ("alcohol", "alcohol"),
    ])
});

/// Maps a category code to its canonical name; unknown codes pass through.
pub fn normalize_category(code: &str) -> String {
    let code = code.to_lowercase();
    match CATEGORIES.get(code.as_str()) {
        Some(name) => (*name).to_string(),
        None => code,
    }
}

/// Which form of the expense command is being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseForm {
    /// Dated with the supplied day.
    Today(NaiveDate),
    /// Carries its own trailing date.
    Dated,
}

impl ExpenseForm {
    fn pattern(self) -> &'static str {
        match self {
            ExpenseForm::Today(_) => EXPENSE_PATTERN,
            ExpenseForm::Dated => OLD_EXPENSE_PATTERN,
        }
    }

    fn trailing(self) -> &'static [Field] {
        match self {
            ExpenseForm::Today(_) => &[Field::Amount, Field::Shared],
            ExpenseForm::Dated => &[Field::Date, Field::Amount, Field::Shared],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Shared,
    Amount,
    Date,
}

#[derive(Default)]
struct Fields {
    shared: Option<Shared>,
    amount: Option<Decimal>,
    date: Option<NaiveDate>,
}

pub fn parse_expense(args: &str, form: ExpenseForm) -> Result<NewExpense, ValidationError> {
    let mut tokens: VecDeque<&str> = args.split_whitespace().collect();
    let trailing = form.trailing();
    // category + trailing fields; the name is checked separately
    if tokens.len() < 1 + trailing.len() {
        // "food yes": the flag is there but the amount never came
        if tokens.len() >= 2 && tokens.back().is_some_and(|t| Shared::is_keyword(t)) {
            return Err(ValidationError::MissingAmount);
        }
        return Err(ValidationError::Usage(form.pattern()));
    }

    let category = match tokens.pop_front() {
        Some(c) => normalize_category(c),
        None => return Err(ValidationError::Usage(form.pattern())),
    };

    let mut fields = Fields::default();
    for field in trailing {
        let Some(tok) = tokens.pop_back() else {
            return Err(ValidationError::Usage(form.pattern()));
        };
        match field {
            Field::Date => fields.date = Some(parse_date(tok)?),
            Field::Amount => fields.amount = Some(parse_amount(tok)?),
            Field::Shared => fields.shared = Some(Shared::parse(&tok.to_lowercase())),
        }
    }

    let name = tokens.into_iter().collect::<Vec<_>>().join(" ");
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    let date = match form {
        ExpenseForm::Today(today) => today,
        ExpenseForm::Dated => fields.date.ok_or(ValidationError::Usage(form.pattern()))?,
    };
    let expense = NewExpense {
        name,
        category,
        shared: fields.shared.ok_or(ValidationError::Usage(form.pattern()))?,
        amount: fields.amount.ok_or(ValidationError::MissingAmount)?,
        date,
    };
    expense.validate()?;
    Ok(expense)
}

pub fn parse_amount(tok: &str) -> Result<Decimal, ValidationError> {
    if Shared::is_keyword(tok) {
        return Err(ValidationError::MissingAmount);
    }
    let amount = tok
        .replace(',', ".")
        .parse::<Decimal>()
        .map_err(|_| ValidationError::InvalidAmount(tok.to_string()))?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(amount));
    }
    Ok(amount)
}

pub fn parse_month(tok: &str) -> Result<u32, ValidationError> {
    match tok.parse::<u32>() {
        Ok(m) if (1..=12).contains(&m) => Ok(m),
        _ => Err(ValidationError::InvalidMonth(tok.to_string())),
    }
}

pub fn parse_year(tok: &str) -> Result<i32, ValidationError> {
    match tok.parse::<i32>() {
        Ok(y) if (1..=9999).contains(&y) => Ok(y),
        _ => Err(ValidationError::InvalidYear(tok.to_string())),
    }
}

/// `<month> <year>`, exactly two tokens.
pub fn parse_month_year(args: &str, pattern: &'static str) -> Result<(u32, i32), ValidationError> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    match tokens.as_slice() {
        [m, y] => Ok((parse_month(m)?, parse_year(y)?)),
        _ => Err(ValidationError::Usage(pattern)),
    }
}

/// `<year>`, exactly one token.
pub fn parse_single_year(args: &str, pattern: &'static str) -> Result<i32, ValidationError> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    match tokens.as_slice() {
        [y] => parse_year(y),
        _ => Err(ValidationError::Usage(pattern)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_known_codes_only() {
        assert_eq!(normalize_category("hc"), "house cleaning");
        assert_eq!(normalize_category("EO"), "eating out");
        assert_eq!(normalize_category("pets"), "pets");
    }

    #[test]
    fn amount_errors_are_distinct() {
        assert_eq!(parse_amount("yes"), Err(ValidationError::MissingAmount));
        assert_eq!(
            parse_amount("ten"),
            Err(ValidationError::InvalidAmount("ten".into()))
        );
        assert_eq!(
            parse_amount("0"),
            Err(ValidationError::NonPositiveAmount(Decimal::ZERO))
        );
        assert_eq!(parse_amount("12,50").unwrap().to_string(), "12.50");
        assert_eq!(
            parse_amount("50000000000000000000000000000").map_err(|e| e.to_string()),
            Err("Invalid amount 50000000000000000000000000000. It must not be more than 1000000000.".into())
        );
        assert!(parse_amount("1000000000").is_ok());
    }

    #[test]
    fn month_bounds() {
        assert_eq!(parse_month("12"), Ok(12));
        assert!(parse_month("0").is_err());
        assert!(parse_month("13").is_err());
        assert!(parse_year("20x4").is_err());
    }
}
