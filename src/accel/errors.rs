// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Error types for neighborhood scoring.
use arrow::error::ArrowError;
use thiserror::Error;

use crate::types::ItemId;

/// Result type for k-NN operations.
pub type Result<T> = std::result::Result<T, KnnError>;

/// Errors raised while building models or scoring.
///
/// Conditions local to one target item (unknown items, thin neighborhoods)
/// are not errors; scorers report them per item with
/// [`ScoreOutcome`](crate::types::ScoreOutcome).  An `Err` from a scoring call
/// means the model, data or configuration is unusable.
#[derive(Debug, Error)]
pub enum KnnError {
    #[error("undefined aggregate: {0}")]
    UndefinedAggregate(&'static str),
    #[error("item {0} has no mean in the item mean table")]
    MissingItemMean(ItemId),
    #[error("similarity between {entity} and {neighbor} is not a number")]
    InvalidSimilarity { entity: i64, neighbor: i64 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid rating data: {0}")]
    InvalidData(String),
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

#[macro_export]
macro_rules! ok_or_err {
    ($opt:expr, $variant:ident, $($arg:expr),*) => {
        $opt.ok_or_else(|| $crate::errors::KnnError::$variant(format!($($arg),*)))
    };
}

#[test]
fn test_messages() {
    assert_eq!(
        KnnError::MissingItemMean(42).to_string(),
        "item 42 has no mean in the item mean table"
    );
    assert_eq!(
        KnnError::InvalidSimilarity {
            entity: 1,
            neighbor: 2
        }
        .to_string(),
        "similarity between 1 and 2 is not a number"
    );
}

#[test]
fn test_ok_or_err() {
    let missing: Option<i32> = None;
    let res: Result<i32> = ok_or_err!(missing, InvalidData, "missing column '{}'", "user");
    match res {
        Err(KnnError::InvalidData(msg)) => assert_eq!(msg, "missing column 'user'"),
        _ => panic!("unexpected result"),
    }
}
