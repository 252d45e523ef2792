// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! User-user scoring.
use std::borrow::Cow;

use log::*;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::config::UserScorerConfig;
use crate::data::RatingSource;
use crate::errors::Result;
use crate::ranking::{RankedNeighbors, TakeAcceptedExt};
use crate::sparse::{cosine_with_norms, SparseVector};
use crate::types::{unique_targets, ItemId, ScoreOutcome, UserId};

use super::accum::NeighborAccumulator;
use super::ItemScorer;

/// A user's mean-centered rating vector.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    /// The user's mean rating.
    pub mean: f64,
    /// The ratings with the mean subtracted.
    pub centered: SparseVector,
    /// The norm of the centered ratings.
    pub norm: f64,
}

impl UserProfile {
    /// Center a rating vector.  Users with no ratings have no profile.
    pub fn from_ratings(mut ratings: SparseVector) -> Option<UserProfile> {
        let mean = ratings.center_by_mean().ok()?;
        let norm = ratings.norm();
        Some(UserProfile {
            mean,
            centered: ratings,
            norm,
        })
    }
}

/// Precomputed profiles for every user in a rating source.
#[derive(Debug, Clone, Default)]
pub struct UserProfileCache {
    profiles: FxHashMap<UserId, UserProfile>,
}

impl UserProfileCache {
    pub fn build<R: RatingSource + Sync>(source: &R) -> UserProfileCache {
        let users = source.user_ids();
        debug!("precomputing profiles for {} users", users.len());
        let profiles = users
            .into_par_iter()
            .filter_map(|u| UserProfile::from_ratings(source.user_ratings(u)).map(|p| (u, p)))
            .collect();
        UserProfileCache { profiles }
    }

    pub fn get(&self, user: UserId) -> Option<&UserProfile> {
        self.profiles.get(&user)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Ranked candidate neighbors for one active user.
struct Neighborhood<'a> {
    /// The active user's mean rating.
    mean: f64,
    ranked: RankedNeighbors,
    /// Profiles of the positively-similar candidates.
    profiles: FxHashMap<UserId, Cow<'a, UserProfile>>,
}

/// User-user collaborative filtering with cosine similarity over
/// mean-centered rating vectors.
pub struct UserUserScorer<R> {
    source: R,
    config: UserScorerConfig,
    cache: Option<UserProfileCache>,
}

impl<R> UserUserScorer<R>
where
    R: RatingSource + Sync,
{
    /// Create a scorer that computes user profiles as it needs them.
    pub fn new(source: R, config: UserScorerConfig) -> Result<Self> {
        config.validate()?;
        Ok(UserUserScorer {
            source,
            config,
            cache: None,
        })
    }

    /// Create a scorer that precomputes every user's profile.
    ///
    /// Scores are identical to those of [`UserUserScorer::new`].
    pub fn with_profile_cache(source: R, config: UserScorerConfig) -> Result<Self> {
        config.validate()?;
        let cache = UserProfileCache::build(&source);
        Ok(UserUserScorer {
            source,
            config,
            cache: Some(cache),
        })
    }

    pub fn config(&self) -> &UserScorerConfig {
        &self.config
    }

    /// Get a user's profile, from the cache if there is one.
    pub fn profile(&self, user: UserId) -> Option<Cow<'_, UserProfile>> {
        match &self.cache {
            Some(cache) => cache.get(user).map(Cow::Borrowed),
            None => UserProfile::from_ratings(self.source.user_ratings(user)).map(Cow::Owned),
        }
    }

    /// Rank every other user by similarity to `user`.
    ///
    /// Users whose centered vectors have zero norm are not candidates; if the
    /// active user is one of them, or has no ratings, the ranking is empty.
    pub fn neighbors(&self, user: UserId) -> Result<RankedNeighbors> {
        Ok(self
            .neighborhood(user)?
            .map(|n| n.ranked)
            .unwrap_or_default())
    }

    /// Build the active user's neighborhood, or `None` if the user has no
    /// ratings or a zero-norm profile.
    fn neighborhood(&self, user: UserId) -> Result<Option<Neighborhood<'_>>> {
        let active = match self.profile(user) {
            Some(p) if p.norm > 0.0 => p,
            _ => return Ok(None),
        };

        let candidates: Vec<(UserId, f64, Cow<'_, UserProfile>)> = self
            .source
            .user_ids()
            .into_par_iter()
            .filter(|v| *v != user)
            .filter_map(|v| {
                let prof = self.profile(v)?;
                let sim = cosine_with_norms(&active.centered, active.norm, &prof.centered, prof.norm)?;
                Some((v, sim, prof))
            })
            .collect();

        let ranked = RankedNeighbors::rank(user, candidates.iter().map(|(v, s, _)| (*v, *s)))?;
        let profiles = candidates
            .into_iter()
            .filter(|(_, s, _)| *s > 0.0)
            .map(|(v, _, p)| (v, p))
            .collect();
        debug!(
            "user {}: ranked {} candidate neighbors",
            user,
            ranked.len()
        );

        Ok(Some(Neighborhood {
            mean: active.mean,
            ranked,
            profiles,
        }))
    }
}

/// Aggregate the deviations of the top positively-similar neighbors that have
/// a deviation for the target.
fn aggregate_neighbors<F>(
    base: f64,
    ranked: &RankedNeighbors,
    max_nbrs: usize,
    min_nbrs: usize,
    deviation: F,
) -> ScoreOutcome
where
    F: Fn(UserId) -> Option<f64>,
{
    let mut acc = NeighborAccumulator::new();
    let accepted = ranked
        .iter()
        .take_while(|(_v, sim)| *sim > 0.0)
        .take_accepted(max_nbrs, |(v, sim)| deviation(v).map(|d| (sim, d)));
    for (sim, d) in accepted {
        acc.add_value(sim, d);
    }

    if acc.len() < min_nbrs {
        ScoreOutcome::InsufficientNeighbors {
            found: acc.len(),
            required: min_nbrs,
        }
    } else {
        acc.finish(base, min_nbrs)
    }
}

impl<R> ItemScorer for UserUserScorer<R>
where
    R: RatingSource + Sync,
{
    fn score_details(&self, user: UserId, items: &[ItemId]) -> Result<Vec<(ItemId, ScoreOutcome)>> {
        let targets = unique_targets(items);
        let required = self.config.min_neighbors;
        let nbhd = match self.neighborhood(user)? {
            Some(n) if !n.ranked.is_empty() => n,
            _ => {
                debug!("user {} has no candidate neighbors", user);
                return Ok(targets
                    .into_iter()
                    .map(|i| (i, ScoreOutcome::InsufficientNeighbors { found: 0, required }))
                    .collect());
            }
        };

        debug!("scoring {} items for user {}", targets.len(), user);
        let out = targets
            .into_iter()
            .map(|item| {
                let outcome = aggregate_neighbors(
                    nbhd.mean,
                    &nbhd.ranked,
                    self.config.neighborhood_size,
                    required,
                    |v| nbhd.profiles.get(&v).and_then(|p| p.centered.get(item)),
                );
                trace!("user {} item {}: {:?}", user, item, outcome);
                (item, outcome)
            })
            .collect();
        Ok(out)
    }
}
