// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Sparse key-value vectors.
use std::cmp::Ordering;

use crate::errors::{KnnError, Result};

/// A sparse vector of values keyed by entity ID.
///
/// Keys are kept sorted and unique, so that every reduction visits entries in
/// the same order no matter how the vector was assembled.  This makes sums,
/// dot products and norms bit-for-bit reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    keys: Vec<i64>,
    values: Vec<f64>,
}

impl SparseVector {
    /// Create an empty vector.
    pub fn new() -> SparseVector {
        SparseVector::default()
    }

    /// Build a vector from key-value pairs in any order.  If a key repeats,
    /// its last value wins.
    pub fn from_pairs<I: IntoIterator<Item = (i64, f64)>>(pairs: I) -> SparseVector {
        let mut entries: Vec<(usize, i64, f64)> = pairs
            .into_iter()
            .enumerate()
            .map(|(pos, (k, v))| (pos, k, v))
            .collect();
        entries.sort_unstable_by_key(|(pos, k, _v)| (*k, *pos));

        let mut keys: Vec<i64> = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());
        for (_pos, k, v) in entries {
            if keys.last() == Some(&k) {
                *values.last_mut().unwrap() = v;
            } else {
                keys.push(k);
                values.push(v);
            }
        }

        SparseVector { keys, values }
    }

    /// Build a vector from key and value arrays that are already sorted by
    /// key with no duplicates.
    pub(crate) fn from_sorted(keys: Vec<i64>, values: Vec<f64>) -> SparseVector {
        assert_eq!(keys.len(), values.len());
        debug_assert!(keys.windows(2).all(|w| w[0] < w[1]), "keys not sorted");
        SparseVector { keys, values }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Get the sorted keys.
    pub fn keys(&self) -> &[i64] {
        &self.keys
    }

    /// Get the values, in key order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    fn position(&self, key: i64) -> Option<usize> {
        self.keys.binary_search(&key).ok()
    }

    /// Look up the value for a key.
    pub fn get(&self, key: i64) -> Option<f64> {
        self.position(key).map(|i| self.values[i])
    }

    pub fn contains_key(&self, key: i64) -> bool {
        self.position(key).is_some()
    }

    /// Iterate over the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.keys.iter().copied().zip(self.values.iter().copied())
    }

    /// Sum of the values.
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Arithmetic mean of the values.  Empty vectors have no mean.
    pub fn mean(&self) -> Result<f64> {
        if self.is_empty() {
            Err(KnnError::UndefinedAggregate("mean of empty vector"))
        } else {
            Ok(self.sum() / self.len() as f64)
        }
    }

    /// Euclidean (L2) norm; zero for an empty vector.
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Dot product with another vector, over the keys they share.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let mut acc = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < self.keys.len() && j < other.keys.len() {
            match self.keys[i].cmp(&other.keys[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    acc += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }

    /// Subtract a constant from every value, in place.
    pub fn center(&mut self, mean: f64) {
        for v in self.values.iter_mut() {
            *v -= mean;
        }
    }

    /// Subtract its own mean from this vector, returning the mean.
    pub fn center_by_mean(&mut self) -> Result<f64> {
        let mean = self.mean()?;
        self.center(mean);
        Ok(mean)
    }

    /// Rewrite each value in place from its key and current value.  If the
    /// function fails, the vector is left partially rewritten.
    pub fn try_update<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(i64, f64) -> Result<f64>,
    {
        for (k, v) in self.keys.iter().zip(self.values.iter_mut()) {
            *v = f(*k, *v)?;
        }
        Ok(())
    }
}

impl FromIterator<(i64, f64)> for SparseVector {
    fn from_iter<T: IntoIterator<Item = (i64, f64)>>(iter: T) -> Self {
        SparseVector::from_pairs(iter)
    }
}
