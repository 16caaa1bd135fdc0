// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendbot::error::ValidationError;
use spendbot::models::Shared;
use spendbot::parser::{
    EXPENSE_PATTERN, ExpenseForm, OLD_EXPENSE_PATTERN, parse_expense, parse_month_year,
    parse_single_year,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
}

#[test]
fn old_expense_with_explicit_date() {
    let e = parse_expense("food milk yes 10 01.01.2022", ExpenseForm::Dated).unwrap();
    assert_eq!(e.name, "milk");
    assert_eq!(e.category, "food");
    assert_eq!(e.shared, Shared::Yes);
    assert_eq!(e.amount, Decimal::from(10));
    assert_eq!(e.date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
}

#[test]
fn expense_is_dated_today_and_category_normalized() {
    let e = parse_expense("eo lunch yes 40", ExpenseForm::Today(today())).unwrap();
    assert_eq!(e.category, "eating out");
    assert_eq!(e.name, "lunch");
    assert_eq!(e.date, today());
}

#[test]
fn multi_word_names_and_loose_whitespace() {
    let e = parse_expense(
        "  hc   floor \t cleaner   spray no  12.5 ",
        ExpenseForm::Today(today()),
    )
    .unwrap();
    assert_eq!(e.category, "house cleaning");
    assert_eq!(e.name, "floor cleaner spray");
    assert_eq!(e.shared, Shared::No);
    assert_eq!(e.amount, "12.5".parse::<Decimal>().unwrap());
}

#[test]
fn names_may_contain_flag_words() {
    let e = parse_expense("food yes man no 3", ExpenseForm::Today(today())).unwrap();
    assert_eq!(e.name, "yes man");
    assert_eq!(e.shared, Shared::No);
}

#[test]
fn shared_flag_is_case_insensitive_and_keeps_other_values() {
    let e = parse_expense("food milk YES 10", ExpenseForm::Today(today())).unwrap();
    assert_eq!(e.shared, Shared::Yes);
    let e = parse_expense("pets kibble maybe 10", ExpenseForm::Today(today())).unwrap();
    assert_eq!(e.shared, Shared::Other("maybe".into()));
    assert_eq!(e.category, "pets");
}

#[test]
fn amount_failures_are_told_apart() {
    let form = ExpenseForm::Today(today());
    assert_eq!(
        parse_expense("food milk yes", form),
        Err(ValidationError::MissingAmount)
    );
    assert_eq!(
        parse_expense("food yes", form),
        Err(ValidationError::MissingAmount)
    );
    assert_eq!(
        parse_expense("food milk yes lots", form),
        Err(ValidationError::InvalidAmount("lots".into()))
    );
    assert_eq!(
        parse_expense("food milk yes -100", form),
        Err(ValidationError::NonPositiveAmount(Decimal::from(-100)))
    );
}

#[test]
fn bad_dates_and_short_input() {
    assert_eq!(
        parse_expense("food milk yes 10 invalid_date", ExpenseForm::Dated),
        Err(ValidationError::InvalidDate("invalid_date".into()))
    );
    assert_eq!(
        parse_expense("food milk yes 10 30.02.2022", ExpenseForm::Dated),
        Err(ValidationError::InvalidDate("30.02.2022".into()))
    );
    assert_eq!(
        parse_expense("", ExpenseForm::Today(today())),
        Err(ValidationError::Usage(EXPENSE_PATTERN))
    );
    assert_eq!(
        parse_expense("food", ExpenseForm::Dated),
        Err(ValidationError::Usage(OLD_EXPENSE_PATTERN))
    );
    assert_eq!(
        parse_expense("food yes 10", ExpenseForm::Today(today())),
        Err(ValidationError::MissingName)
    );
}

#[test]
fn report_arguments() {
    assert_eq!(parse_month_year("3 2024", "p"), Ok((3, 2024)));
    assert_eq!(
        parse_month_year("13 2024", "p"),
        Err(ValidationError::InvalidMonth("13".into()))
    );
    assert_eq!(parse_month_year("2024", "p"), Err(ValidationError::Usage("p")));
    assert_eq!(parse_single_year("2023", "p"), Ok(2023));
    assert_eq!(
        parse_single_year("next", "p"),
        Err(ValidationError::InvalidYear("next".into()))
    );
}
