// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db::Store;
use crate::dispatcher::Reply;
use crate::error::StoreError;
use crate::parser::{ExpenseForm, parse_expense};
use crate::utils::fmt_date;
use anyhow::Result;
use chrono::NaiveDate;
use tracing::{error, info, warn};

pub fn add(store: &mut Store, args: &str, today: NaiveDate) -> Result<Reply> {
    record(
        store,
        args,
        ExpenseForm::Today(today),
        "Your expense has been added",
        "Something went wrong with adding your expense",
    )
}

pub fn add_old(store: &mut Store, args: &str) -> Result<Reply> {
    record(
        store,
        args,
        ExpenseForm::Dated,
        "Your old expense has been added",
        "Something went wrong with adding your old expense",
    )
}

fn record(
    store: &mut Store,
    args: &str,
    form: ExpenseForm,
    done: &str,
    failed: &str,
) -> Result<Reply> {
    let expense = match parse_expense(args, form) {
        Ok(e) => e,
        Err(e) => {
            warn!(args, "rejected expense: {e}");
            return Ok(Reply::text(e.to_string()));
        }
    };
    match store.append(&expense) {
        Ok(saved) => {
            info!(id = saved.id, category = %saved.category, "expense recorded");
            Ok(Reply::text(format!(
                "{}: {} ({}) {} on {}{}",
                done,
                saved.name,
                saved.category,
                saved.amount,
                fmt_date(saved.date),
                if saved.shared.is_yes() { ", shared" } else { "" }
            )))
        }
        Err(StoreError::Invalid(e)) => Ok(Reply::text(e.to_string())),
        Err(e) => {
            error!("storing expense failed: {e}");
            Ok(Reply::text(failed))
        }
    }
}

pub fn delete_last(store: &mut Store) -> Result<Reply> {
    match store.delete_most_recent() {
        Ok(Some(gone)) => {
            info!(id = gone.id, "deleted last expense");
            Ok(Reply::text(format!(
                "The last expense has been deleted: {} ({}) {} on {}",
                gone.name,
                gone.category,
                gone.amount,
                fmt_date(gone.date)
            )))
        }
        Ok(None) => Ok(Reply::text("There is no expense to delete")),
        Err(e) => {
            error!("deleting last expense failed: {e}");
            Ok(Reply::text(
                "Something went wrong with deleting the last expense",
            ))
        }
    }
}
