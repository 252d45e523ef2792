// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Damped item mean ratings.
use log::*;
use rustc_hash::FxHashMap;

use crate::config::DampedMeanConfig;
use crate::data::RatingSource;
use crate::errors::{KnnError, Result};
use crate::types::ItemId;

use super::ItemMeans;

/// Per-item mean ratings, damped toward the global mean.
///
/// Each item's mean is `(sum + d * global) / (count + d)`: the item's ratings
/// plus `d` fictitious ratings at the global mean.
#[derive(Debug, Clone, Default)]
pub struct DampedItemMeans {
    means: FxHashMap<ItemId, f64>,
    global_mean: f64,
    damping: f64,
}

impl DampedItemMeans {
    /// Compute damped means for every item in a rating source.
    ///
    /// Fails with [`KnnError::UndefinedAggregate`] if there are no ratings.
    pub fn compute<R: RatingSource + ?Sized>(
        source: &R,
        config: &DampedMeanConfig,
    ) -> Result<DampedItemMeans> {
        config.validate()?;
        let damping = config.damping;

        let items = source.item_ids();
        let mut totals = Vec::with_capacity(items.len());
        let mut global_sum = 0.0;
        let mut global_count = 0usize;
        for item in items {
            let ratings = source.item_ratings(item);
            if ratings.is_empty() {
                continue;
            }
            let sum = ratings.sum();
            global_sum += sum;
            global_count += ratings.len();
            totals.push((item, sum, ratings.len()));
        }

        if global_count == 0 {
            return Err(KnnError::UndefinedAggregate("mean of empty rating set"));
        }
        let global_mean = global_sum / global_count as f64;
        debug!(
            "computing damped means for {} items (global mean {:.3}, damping {})",
            totals.len(),
            global_mean,
            damping
        );

        let means = totals
            .into_iter()
            .map(|(item, sum, n)| (item, (sum + damping * global_mean) / (n as f64 + damping)))
            .collect();

        Ok(DampedItemMeans {
            means,
            global_mean,
            damping,
        })
    }

    /// Wrap an explicit table of item means.
    pub fn from_means<I>(means: I, global_mean: f64) -> DampedItemMeans
    where
        I: IntoIterator<Item = (ItemId, f64)>,
    {
        DampedItemMeans {
            means: means.into_iter().collect(),
            global_mean,
            damping: 0.0,
        }
    }

    pub fn global_mean(&self) -> f64 {
        self.global_mean
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn len(&self) -> usize {
        self.means.len()
    }

    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }
}

impl ItemMeans for DampedItemMeans {
    fn item_mean(&self, item: ItemId) -> Option<f64> {
        self.means.get(&item).copied()
    }
}
