// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2025 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Neighborhood-based collaborative filtering for LensKit.
//!
//! Two rating predictors are provided, both implementing [`ItemScorer`]:
//!
//! - [`ItemItemScorer`] scores items from a user's mean-centered ratings of
//!   similar items, using precomputed item means and neighbor lists.
//! - [`UserUserScorer`] scores items from the ratings of the users most
//!   similar to the active user (cosine similarity of mean-centered vectors).
//!
//! Items that cannot be scored are left out of the results rather than given
//! a placeholder score.

pub mod config;
pub mod data;
pub mod errors;
pub mod knn;
pub mod model;
pub mod parallel;
pub mod ranking;
pub mod sparse;
pub mod types;

pub use config::{DampedMeanConfig, ItemScorerConfig, UserScorerConfig};
pub use data::{RatingMatrix, RatingSource};
pub use errors::{KnnError, Result};
pub use knn::{ItemItemScorer, ItemScorer, UserProfile, UserProfileCache, UserUserScorer};
pub use model::{DampedItemMeans, ItemMeans, ItemSimilarities, SimilarityTable};
pub use ranking::{RankedNeighbors, TakeAccepted, TakeAcceptedExt};
pub use sparse::SparseVector;
pub use types::{ItemId, Rating, ScoreMap, ScoreOutcome, UserId};
