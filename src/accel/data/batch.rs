// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2025 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Extract ratings from Arrow record batches.
use arrow::{
    array::{Array, ArrayRef, AsArray},
    compute::{cast_with_options, CastOptions},
    datatypes::{Float64Type, Int64Type},
    record_batch::RecordBatch,
};
use arrow_schema::DataType;
use log::*;

use crate::errors::{KnnError, Result};
use crate::ok_or_err;
use crate::types::Rating;

/// Look up a column, rejecting nulls and types that fail `check`.
fn checked_column<'b>(
    batch: &'b RecordBatch,
    name: &str,
    tstr: &str,
    check: fn(&DataType) -> bool,
) -> Result<&'b ArrayRef> {
    let col = ok_or_err!(batch.column_by_name(name), InvalidData, "missing column '{}'", name)?;
    if !check(col.data_type()) {
        return Err(KnnError::InvalidData(format!(
            "invalid {} type {}, expected {}",
            name,
            col.data_type(),
            tstr
        )));
    }
    if col.null_count() > 0 {
        return Err(KnnError::InvalidData(format!(
            "column '{}' has {} nulls",
            name,
            col.null_count()
        )));
    }
    Ok(col)
}

/// Extract ratings from a batch with `user`, `item` and `rating` columns.
///
/// IDs may be any integer type and ratings any numeric type; they are
/// widened to `i64` and `f64` respectively.
pub fn ratings_from_batch(batch: &RecordBatch) -> Result<Vec<Rating>> {
    debug!("extracting {} ratings from record batch", batch.num_rows());
    let users = checked_column(batch, "user", "integer", DataType::is_integer)?;
    let items = checked_column(batch, "item", "integer", DataType::is_integer)?;
    let values = checked_column(batch, "rating", "numeric", DataType::is_numeric)?;

    // unsafe casts fail on overflow instead of nulling the value
    let opts = CastOptions {
        safe: false,
        ..Default::default()
    };
    let users = cast_with_options(users, &DataType::Int64, &opts)?;
    let items = cast_with_options(items, &DataType::Int64, &opts)?;
    let values = cast_with_options(values, &DataType::Float64, &opts)?;

    let users = users.as_primitive::<Int64Type>();
    let items = items.as_primitive::<Int64Type>();
    let values = values.as_primitive::<Float64Type>();

    Ok(users
        .values()
        .iter()
        .zip(items.values().iter())
        .zip(values.values().iter())
        .map(|((u, i), v)| Rating::new(*u, *i, *v))
        .collect())
}
