// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Problems with user input. The messages are sent back to the chat verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Not enough arguments. Pattern: {0}")]
    Usage(&'static str),
    #[error("Please provide a name for the expense")]
    MissingName,
    #[error("Please provide an amount for the expense")]
    MissingAmount,
    #[error("Invalid amount '{0}'. It should be a positive number.")]
    InvalidAmount(String),
    #[error("Invalid amount {0}. It must be greater than 0.")]
    NonPositiveAmount(Decimal),
    #[error("Invalid amount {0}. It must not be more than {max}.", max = crate::models::MAX_AMOUNT)]
    AmountTooLarge(Decimal),
    #[error("Invalid date '{0}'. Please enter a valid date in the format dd.mm.yyyy.")]
    InvalidDate(String),
    #[error("Invalid month '{0}'. Month should be a number between 1 and 12.")]
    InvalidMonth(String),
    #[error("Invalid year '{0}'. Year should be a number like 2024.")]
    InvalidYear(String),
}

/// A running total left the range `Decimal` can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("sum of amounts overflowed")]
pub struct SumOverflow;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("stored date '{0}' is not a dd.mm.yyyy date")]
    CorruptDate(String),
    #[error("stored amount '{0}' is not a decimal")]
    CorruptAmount(String),
}
