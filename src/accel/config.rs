// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Scorer and model configuration.
use serde::{Deserialize, Serialize};

use crate::errors::{KnnError, Result};

pub const DEFAULT_ITEM_NEIGHBORS: usize = 20;
pub const DEFAULT_USER_NEIGHBORS: usize = 30;
pub const DEFAULT_USER_MIN_NEIGHBORS: usize = 2;

fn default_item_neighbors() -> usize {
    DEFAULT_ITEM_NEIGHBORS
}

fn default_user_neighbors() -> usize {
    DEFAULT_USER_NEIGHBORS
}

fn default_user_min_neighbors() -> usize {
    DEFAULT_USER_MIN_NEIGHBORS
}

/// Configuration for item-item scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemScorerConfig {
    /// Maximum number of neighbors used for a prediction.
    #[serde(default = "default_item_neighbors")]
    pub neighborhood_size: usize,
}

impl Default for ItemScorerConfig {
    fn default() -> Self {
        ItemScorerConfig {
            neighborhood_size: DEFAULT_ITEM_NEIGHBORS,
        }
    }
}

impl ItemScorerConfig {
    pub fn with_neighborhood_size(neighborhood_size: usize) -> Self {
        ItemScorerConfig { neighborhood_size }
    }

    /// Parse a configuration from JSON, filling in defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: ItemScorerConfig = serde_json::from_str(json)
            .map_err(|e| KnnError::InvalidConfig(format!("item scorer: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.neighborhood_size == 0 {
            return Err(KnnError::InvalidConfig(
                "item scorer neighborhood size must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration for user-user scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserScorerConfig {
    /// Maximum number of neighbors used for a prediction.
    #[serde(default = "default_user_neighbors")]
    pub neighborhood_size: usize,
    /// Minimum number of neighbors required to make a prediction.
    #[serde(default = "default_user_min_neighbors")]
    pub min_neighbors: usize,
}

impl Default for UserScorerConfig {
    fn default() -> Self {
        UserScorerConfig {
            neighborhood_size: DEFAULT_USER_NEIGHBORS,
            min_neighbors: DEFAULT_USER_MIN_NEIGHBORS,
        }
    }
}

impl UserScorerConfig {
    pub fn new(neighborhood_size: usize, min_neighbors: usize) -> Self {
        UserScorerConfig {
            neighborhood_size,
            min_neighbors,
        }
    }

    /// Parse a configuration from JSON, filling in defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: UserScorerConfig = serde_json::from_str(json)
            .map_err(|e| KnnError::InvalidConfig(format!("user scorer: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.neighborhood_size == 0 {
            return Err(KnnError::InvalidConfig(
                "user scorer neighborhood size must be positive".into(),
            ));
        }
        if self.min_neighbors == 0 || self.min_neighbors > self.neighborhood_size {
            return Err(KnnError::InvalidConfig(format!(
                "minimum neighbors {} must be between 1 and neighborhood size {}",
                self.min_neighbors, self.neighborhood_size
            )));
        }
        Ok(())
    }
}

/// Configuration for damped item means.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DampedMeanConfig {
    /// Number of fictitious global-mean ratings added to each item.
    #[serde(default)]
    pub damping: f64,
}

impl DampedMeanConfig {
    pub fn with_damping(damping: f64) -> Self {
        DampedMeanConfig { damping }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: DampedMeanConfig = serde_json::from_str(json)
            .map_err(|e| KnnError::InvalidConfig(format!("damped mean: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(KnnError::InvalidConfig(format!(
                "damping must be finite and non-negative, got {}",
                self.damping
            )));
        }
        Ok(())
    }
}
