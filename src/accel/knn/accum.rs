// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2025 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Accumulator for neighbor contributions in k-NN.
use crate::errors::{KnnError, Result};
use crate::types::ScoreOutcome;

/// Accumulate similarity-weighted values from accepted neighbors.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NeighborAccumulator {
    count: usize,
    weighted_sum: f64,
    total_weight: f64,
    abs_weight: f64,
}

impl NeighborAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a neighbor's value with its similarity weight.
    pub fn add_value(&mut self, weight: f64, value: f64) {
        self.count += 1;
        self.weighted_sum += weight * value;
        self.total_weight += weight;
        self.abs_weight += weight.abs();
    }

    /// Number of neighbors accumulated.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn weighted_sum(&self) -> f64 {
        self.weighted_sum
    }

    /// Weighted average of the accumulated values.
    ///
    /// A weight total within rounding error of zero, relative to the summed
    /// weight magnitudes, has no usable average.
    pub fn average(&self) -> Result<f64> {
        if self.count == 0 {
            return Err(KnnError::UndefinedAggregate("weighted average of no neighbors"));
        }
        if self.total_weight().abs() <= f64::EPSILON * self.abs_weight {
            return Err(KnnError::UndefinedAggregate("weighted average with zero weight"));
        }
        let avg = self.weighted_sum() / self.total_weight();
        if avg.is_finite() {
            Ok(avg)
        } else {
            Err(KnnError::UndefinedAggregate("weighted average overflowed"))
        }
    }

    /// Finish a prediction by offsetting the weighted average from `base`,
    /// requiring at least `min_nbrs` neighbors.
    pub fn finish(&self, base: f64, min_nbrs: usize) -> ScoreOutcome {
        if self.count == 0 {
            return ScoreOutcome::NoNeighbors;
        }
        if self.count < min_nbrs {
            return ScoreOutcome::InsufficientNeighbors {
                found: self.count,
                required: min_nbrs,
            };
        }
        match self.average() {
            Ok(avg) => ScoreOutcome::Scored {
                score: base + avg,
                neighbors: self.count,
            },
            Err(_) => ScoreOutcome::UndefinedAggregate,
        }
    }
}
