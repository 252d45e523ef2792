// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2025 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Sparse vector support and vector math.

mod rows;
mod vector;

pub use rows::SparseRows;
pub use vector::SparseVector;

use crate::errors::Result;

/// Arithmetic mean of a vector's values.
///
/// Fails with [`KnnError::UndefinedAggregate`][crate::errors::KnnError] on an
/// empty vector.
pub fn mean(v: &SparseVector) -> Result<f64> {
    v.mean()
}

/// Sum of `a[k] * b[k]` over the keys present in both vectors.
pub fn dot_product(a: &SparseVector, b: &SparseVector) -> f64 {
    a.dot(b)
}

/// Square root of the sum of squared values.
pub fn euclidean_norm(v: &SparseVector) -> f64 {
    v.norm()
}

/// Cosine similarity of two vectors given their precomputed norms.
///
/// Returns `None` when either norm is zero.
pub fn cosine_with_norms(a: &SparseVector, a_norm: f64, b: &SparseVector, b_norm: f64) -> Option<f64> {
    let denom = a_norm * b_norm;
    if denom > 0.0 {
        Some(a.dot(b) / denom)
    } else {
        None
    }
}

/// Cosine similarity of two vectors; `None` if either has zero norm.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> Option<f64> {
    cosine_with_norms(a, a.norm(), b, b.norm())
}
