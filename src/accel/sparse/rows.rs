// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Compressed sparse row storage.
use super::SparseVector;

/// A compressed sparse row matrix whose columns are entity IDs.
///
/// Rows are addressed by position; the caller keeps the mapping from row
/// position to entity.  Within each row, columns are sorted and unique.
#[derive(Debug, Clone, Default)]
pub struct SparseRows {
    row_ptrs: Vec<usize>,
    col_keys: Vec<i64>,
    values: Vec<f64>,
}

impl SparseRows {
    /// Assemble rows from coordinate entries `(row, column key, value)`.
    ///
    /// Entries must not repeat a (row, column) pair.
    pub fn from_coo(n_rows: usize, entries: &[(usize, i64, f64)]) -> SparseRows {
        let nnz = entries.len();

        // step 1: count row sizes, placing counts in rps[r+1].
        let mut row_ptrs = vec![0usize; n_rows + 1];
        for (r, _, _) in entries {
            row_ptrs[r + 1] += 1;
        }

        // step 2: convert counts into offsets
        for i in 1..=n_rows {
            row_ptrs[i] += row_ptrs[i - 1];
        }

        // step 3: scatter entries into their rows
        let mut fill = row_ptrs.clone();
        let mut slots: Vec<(i64, f64)> = vec![(0, 0.0); nnz];
        for (r, c, v) in entries {
            slots[fill[*r]] = (*c, *v);
            fill[*r] += 1;
        }

        // step 4: sort each row by column
        for r in 0..n_rows {
            slots[row_ptrs[r]..row_ptrs[r + 1]].sort_unstable_by_key(|(c, _)| *c);
        }

        let (col_keys, values) = slots.into_iter().unzip();
        SparseRows {
            row_ptrs,
            col_keys,
            values,
        }
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.row_ptrs.len().saturating_sub(1)
    }

    /// Get the number of stored values.
    pub fn nnz(&self) -> usize {
        self.col_keys.len()
    }

    /// Get the extent in the underlying arrays for a row.
    pub fn extent(&self, row: usize) -> (usize, usize) {
        (self.row_ptrs[row], self.row_ptrs[row + 1])
    }

    /// Get the column keys for a row.
    pub fn row_cols(&self, row: usize) -> &[i64] {
        let (start, end) = self.extent(row);
        &self.col_keys[start..end]
    }

    /// Get the values for a row.
    pub fn row_vals(&self, row: usize) -> &[f64] {
        let (start, end) = self.extent(row);
        &self.values[start..end]
    }

    /// Copy a row out as an owned sparse vector.
    pub fn row(&self, row: usize) -> SparseVector {
        SparseVector::from_sorted(self.row_cols(row).to_vec(), self.row_vals(row).to_vec())
    }
}

#[test]
fn test_empty_rows() {
    let rows = SparseRows::from_coo(3, &[]);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows.nnz(), 0);
    assert!(rows.row(1).is_empty());
}

#[test]
fn test_rows_sorted() {
    let rows = SparseRows::from_coo(
        2,
        &[(1, 30, 1.0), (0, 12, 2.0), (1, 10, 3.0), (0, 5, 4.0), (1, 20, 5.0)],
    );
    assert_eq!(rows.len(), 2);
    assert_eq!(rows.nnz(), 5);
    assert_eq!(rows.extent(0), (0, 2));
    assert_eq!(rows.row_cols(0), &[5, 12]);
    assert_eq!(rows.row_vals(0), &[4.0, 2.0]);
    assert_eq!(rows.row_cols(1), &[10, 20, 30]);
    assert_eq!(rows.row_vals(1), &[3.0, 5.0, 1.0]);
    assert_eq!(rows.row(1).get(20), Some(5.0));
}
