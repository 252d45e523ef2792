// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Item-item scoring.
use log::*;

use crate::config::ItemScorerConfig;
use crate::data::RatingSource;
use crate::errors::{KnnError, Result};
use crate::model::{ItemMeans, ItemSimilarities};
use crate::ranking::RankedNeighbors;
use crate::sparse::SparseVector;
use crate::types::{unique_targets, ItemId, ScoreOutcome, UserId};

use super::accum::NeighborAccumulator;
use super::ItemScorer;

/// Item-item collaborative filtering over precomputed neighbors.
///
/// A target item's prediction is its mean plus the similarity-weighted
/// average of the user's mean-centered ratings for the most similar items
/// they have rated.
pub struct ItemItemScorer<R, M, S> {
    source: R,
    means: M,
    sims: S,
    config: ItemScorerConfig,
}

impl<R, M, S> ItemItemScorer<R, M, S>
where
    R: RatingSource,
    M: ItemMeans,
    S: ItemSimilarities,
{
    pub fn new(source: R, means: M, sims: S, config: ItemScorerConfig) -> Result<Self> {
        config.validate()?;
        Ok(ItemItemScorer {
            source,
            means,
            sims,
            config,
        })
    }

    pub fn config(&self) -> &ItemScorerConfig {
        &self.config
    }

    /// Get a user's ratings centered by item means.
    fn centered_ratings(&self, user: UserId) -> Result<SparseVector> {
        let mut ratings = self.source.user_ratings(user);
        ratings.try_update(|item, r| {
            self.means
                .item_mean(item)
                .map(|m| r - m)
                .ok_or(KnnError::MissingItemMean(item))
        })?;
        Ok(ratings)
    }

    /// Rank an item's neighbors, checking that each has a mean.
    fn ranked_neighbors(&self, item: ItemId) -> Result<RankedNeighbors> {
        let nbrs = self.sims.neighbors(item);
        if let Some((n, _)) = nbrs.iter().find(|(n, _)| self.means.item_mean(*n).is_none()) {
            return Err(KnnError::MissingItemMean(*n));
        }
        RankedNeighbors::rank(item, nbrs.iter().copied())
    }

    fn score_item(&self, ratings: &SparseVector, item: ItemId) -> Result<ScoreOutcome> {
        let mean = match self.means.item_mean(item) {
            Some(m) => m,
            None => return Ok(ScoreOutcome::UnknownItem),
        };

        let ranked = self.ranked_neighbors(item)?;
        let mut acc = NeighborAccumulator::new();
        let accepted = ranked.take_accepted(self.config.neighborhood_size, |(j, sim)| {
            ratings.get(j).map(|r| (sim, r))
        });
        for (sim, r) in accepted {
            acc.add_value(sim, r);
        }

        Ok(acc.finish(mean, 1))
    }
}

impl<R, M, S> ItemScorer for ItemItemScorer<R, M, S>
where
    R: RatingSource + Sync,
    M: ItemMeans + Sync,
    S: ItemSimilarities + Sync,
{
    fn score_details(&self, user: UserId, items: &[ItemId]) -> Result<Vec<(ItemId, ScoreOutcome)>> {
        let targets = unique_targets(items);
        let ratings = self.centered_ratings(user)?;
        debug!(
            "scoring {} items for user {} with {} ratings",
            targets.len(),
            user,
            ratings.len()
        );

        if ratings.is_empty() {
            // no ratings, no mean-centered profile
            return Ok(targets
                .into_iter()
                .map(|i| (i, ScoreOutcome::UndefinedAggregate))
                .collect());
        }

        let mut out = Vec::with_capacity(targets.len());
        for item in targets {
            let outcome = self.score_item(&ratings, item)?;
            trace!("user {} item {}: {:?}", user, item, outcome);
            out.push((item, outcome));
        }
        Ok(out)
    }
}
