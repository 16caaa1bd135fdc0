// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use spendbot::db::{Store, default_db_path};
use spendbot::error::{StoreError, ValidationError};
use spendbot::models::{NewExpense, Shared};
use tempfile::tempdir;

fn d(s: &str) -> NaiveDate {
    spendbot::utils::parse_date(s).unwrap()
}

fn expense(name: &str, shared: Shared, amount: &str, date: &str) -> NewExpense {
    NewExpense {
        name: name.into(),
        category: "food".into(),
        shared,
        amount: amount.parse().unwrap(),
        date: d(date),
    }
}

#[test]
fn append_then_exact_date_keeps_amount() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .append(&expense("bread", Shared::No, "40.55", "15.03.2024"))
        .unwrap();

    let rows = store.query_by_exact_date(d("15.03.2024")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, "40.55".parse::<Decimal>().unwrap());
    assert_eq!(rows[0].name, "bread");
    assert!(store.query_by_exact_date(d("16.03.2024")).unwrap().is_empty());
}

#[test]
fn non_positive_amount_touches_nothing() {
    let mut store = Store::open_in_memory().unwrap();
    for amount in ["0", "-5"] {
        let err = store
            .append(&expense("bread", Shared::Yes, amount, "15.03.2024"))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Invalid(ValidationError::NonPositiveAmount(_))
        ));
    }
    assert_eq!(store.count().unwrap(), 0);
    assert_eq!(store.count_shared().unwrap(), 0);
}

#[test]
fn only_shared_expenses_are_mirrored() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .append(&expense("dinner", Shared::Yes, "80", "15.03.2024"))
        .unwrap();
    store
        .append(&expense("snack", Shared::No, "5", "15.03.2024"))
        .unwrap();
    store
        .append(&expense("gift", Shared::Other("maybe".into()), "20", "15.03.2024"))
        .unwrap();

    assert_eq!(store.count().unwrap(), 3);
    assert_eq!(store.count_shared().unwrap(), 1);
    let mirror = store
        .query_shared_by_range(d("01.03.2024"), d("31.03.2024"))
        .unwrap();
    assert_eq!(mirror.len(), 1);
    assert_eq!(mirror[0].name, "dinner");
    assert_eq!(mirror[0].shared, Shared::Yes);
}

#[test]
fn delete_on_empty_store_is_a_no_op() {
    let mut store = Store::open_in_memory().unwrap();
    assert_eq!(store.delete_most_recent().unwrap(), None);
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn delete_takes_last_inserted_and_its_mirror() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .append(&expense("later", Shared::No, "10", "20.03.2024"))
        .unwrap();
    store
        .append(&expense("earlier", Shared::Yes, "30", "01.03.2024"))
        .unwrap();
    assert_eq!(store.count_shared().unwrap(), 1);

    let gone = store.delete_most_recent().unwrap().unwrap();
    assert_eq!(gone.name, "earlier");
    assert_eq!(store.count().unwrap(), 1);
    assert_eq!(store.count_shared().unwrap(), 0);

    let left = store
        .query_by_range(d("01.01.2024"), d("31.12.2024"))
        .unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].name, "later");
}

#[test]
fn range_compares_calendar_dates() {
    let mut store = Store::open_in_memory().unwrap();
    // as text "02.04.2024" sorts inside 01.03..31.03, as a date it does not
    for (name, date) in [
        ("in", "15.03.2024"),
        ("april", "02.04.2024"),
        ("last year", "31.12.2023"),
        ("first", "01.03.2024"),
    ] {
        store
            .append(&expense(name, Shared::No, "1", date))
            .unwrap();
    }
    let rows = store
        .query_by_range(d("01.03.2024"), d("31.03.2024"))
        .unwrap();
    let names: Vec<&str> = rows.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["in", "first"]);
}

#[test]
fn dates_persist_as_day_month_year_text() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("expenses.sqlite");
    {
        let mut store = Store::open(&path).unwrap();
        store
            .append(&expense("milk", Shared::Yes, "10", "05.01.2022"))
            .unwrap();
    }

    let raw = Connection::open(&path).unwrap();
    let (date, shared): (String, String) = raw
        .query_row(
            "SELECT e.date, s.date FROM expenses e JOIN shared_expenses s ON s.expense_id = e.id",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(date, "05.01.2022");
    assert_eq!(shared, "05.01.2022");

    let reopened = Store::open(&path).unwrap();
    assert_eq!(reopened.count().unwrap(), 1);
}

#[test]
fn corrupt_stored_date_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("expenses.sqlite");
    let store = Store::open(&path).unwrap();
    let raw = Connection::open(&path).unwrap();
    raw.execute(
        "INSERT INTO expenses(name, category, shared, amount, date) VALUES ('x','food','no','1','2024-03-01')",
        [],
    )
    .unwrap();
    let err = store
        .query_by_range(d("01.01.2024"), d("31.12.2024"))
        .unwrap_err();
    assert!(matches!(err, StoreError::CorruptDate(s) if s == "2024-03-01"));
}

#[test]
fn append_is_all_or_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("expenses.sqlite");
    let mut store = Store::open(&path).unwrap();
    let raw = Connection::open(&path).unwrap();
    raw.execute_batch(
        "CREATE TRIGGER refuse_mirror BEFORE INSERT ON shared_expenses
         BEGIN SELECT RAISE(ABORT, 'mirror refused'); END;",
    )
    .unwrap();

    let err = store
        .append(&expense("lunch", Shared::Yes, "40", "13.03.2024"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Sqlite(_)));
    assert_eq!(store.count().unwrap(), 0);
    assert_eq!(store.count_shared().unwrap(), 0);

    // the trigger only touches the mirror
    store
        .append(&expense("bread", Shared::No, "3", "13.03.2024"))
        .unwrap();
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn default_path_sits_in_the_app_data_dir() {
    let path = default_db_path().unwrap();
    assert!(path.ends_with("spendbot/expenses.sqlite"), "{}", path.display());
}
