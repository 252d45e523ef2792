// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! In-memory rating matrix.
use arrow::record_batch::RecordBatch;
use log::*;
use rustc_hash::FxHashMap;

use crate::errors::{KnnError, Result};
use crate::sparse::{SparseRows, SparseVector};
use crate::types::{ItemId, Rating, UserId};

use super::batch::ratings_from_batch;
use super::RatingSource;

/// Row-major view of one orientation of the rating matrix.
#[derive(Debug, Clone, Default)]
struct EntityRows {
    ids: Vec<i64>,
    index: FxHashMap<i64, usize>,
    rows: SparseRows,
}

impl EntityRows {
    /// Build rows from `(row entity, column entity, value)` triples.
    fn build(entries: &[(i64, i64, f64)]) -> EntityRows {
        let mut ids: Vec<i64> = entries.iter().map(|(r, _, _)| *r).collect();
        ids.sort_unstable();
        ids.dedup();
        let index: FxHashMap<i64, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

        let coo: Vec<(usize, i64, f64)> = entries
            .iter()
            .map(|(r, c, v)| (index[r], *c, *v))
            .collect();
        let rows = SparseRows::from_coo(ids.len(), &coo);

        EntityRows { ids, index, rows }
    }

    fn vector(&self, id: i64) -> SparseVector {
        match self.index.get(&id) {
            Some(row) => self.rows.row(*row),
            None => SparseVector::new(),
        }
    }

    fn contains(&self, id: i64) -> bool {
        self.index.contains_key(&id)
    }
}

/// Ratings held in memory, indexed by both user and item.
#[derive(Debug, Clone, Default)]
pub struct RatingMatrix {
    users: EntityRows,
    items: EntityRows,
}

impl RatingMatrix {
    /// Build a rating matrix from individual ratings.
    ///
    /// If a user rated the same item more than once, the last rating wins.
    /// Non-finite rating values are rejected.
    pub fn from_ratings<I>(ratings: I) -> Result<RatingMatrix>
    where
        I: IntoIterator<Item = Rating>,
    {
        let mut cells: FxHashMap<(UserId, ItemId), f64> = FxHashMap::default();
        for r in ratings {
            if !r.value.is_finite() {
                return Err(KnnError::InvalidData(format!(
                    "rating of item {} by user {} is not finite",
                    r.item, r.user
                )));
            }
            cells.insert((r.user, r.item), r.value);
        }

        let ui: Vec<(i64, i64, f64)> = cells.iter().map(|((u, i), v)| (*u, *i, *v)).collect();
        let iu: Vec<(i64, i64, f64)> = ui.iter().map(|(u, i, v)| (*i, *u, *v)).collect();

        let users = EntityRows::build(&ui);
        let items = EntityRows::build(&iu);
        debug!(
            "built {}x{} rating matrix with {} ratings",
            users.ids.len(),
            items.ids.len(),
            users.rows.nnz()
        );

        Ok(RatingMatrix { users, items })
    }

    /// Build a rating matrix from an Arrow record batch with `user`, `item`
    /// and `rating` columns.
    pub fn from_record_batch(batch: &RecordBatch) -> Result<RatingMatrix> {
        let ratings = ratings_from_batch(batch)?;
        RatingMatrix::from_ratings(ratings)
    }

    pub fn n_users(&self) -> usize {
        self.users.ids.len()
    }

    pub fn n_items(&self) -> usize {
        self.items.ids.len()
    }

    pub fn n_ratings(&self) -> usize {
        self.users.rows.nnz()
    }

    pub fn has_user(&self, user: UserId) -> bool {
        self.users.contains(user)
    }

    pub fn has_item(&self, item: ItemId) -> bool {
        self.items.contains(item)
    }

    /// Iterate over all ratings, ordered by user and then item.
    pub fn ratings(&self) -> impl Iterator<Item = Rating> + '_ {
        self.users.ids.iter().enumerate().flat_map(move |(row, u)| {
            let cols = self.users.rows.row_cols(row);
            let vals = self.users.rows.row_vals(row);
            cols.iter()
                .zip(vals.iter())
                .map(move |(i, v)| Rating::new(*u, *i, *v))
        })
    }
}

impl RatingSource for RatingMatrix {
    fn user_ratings(&self, user: UserId) -> SparseVector {
        self.users.vector(user)
    }

    fn item_ratings(&self, item: ItemId) -> SparseVector {
        self.items.vector(item)
    }

    fn user_ids(&self) -> Vec<UserId> {
        self.users.ids.clone()
    }

    fn item_ids(&self) -> Vec<ItemId> {
        self.items.ids.clone()
    }
}
