// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Neighborhood-based collaborative filtering scorers.
use rayon::prelude::*;

use crate::errors::Result;
use crate::types::{collect_scores, ItemId, ScoreMap, ScoreOutcome, UserId};

mod accum;
mod item_score;
mod user_score;

pub use item_score::ItemItemScorer;
pub use user_score::{UserProfile, UserProfileCache, UserUserScorer};

/// Interface for rating predictors.
pub trait ItemScorer: Sync {
    /// Score target items for a user, reporting the outcome for each distinct
    /// target in first-seen order.
    ///
    /// Missing data and thin neighborhoods are reported per item; an `Err`
    /// means the model or data is broken.
    fn score_details(&self, user: UserId, items: &[ItemId]) -> Result<Vec<(ItemId, ScoreOutcome)>>;

    /// Predict ratings for target items.  Items that cannot be scored are
    /// absent from the result.
    fn score(&self, user: UserId, items: &[ItemId]) -> Result<ScoreMap> {
        let details = self.score_details(user, items)?;
        Ok(collect_scores(&details))
    }

    /// Score several independent queries in parallel.
    fn score_batch(&self, queries: &[(UserId, Vec<ItemId>)]) -> Result<Vec<ScoreMap>> {
        queries
            .par_iter()
            .map(|(user, items)| self.score(*user, items))
            .collect()
    }
}
