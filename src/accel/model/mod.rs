// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Precomputed item models used by item-based scoring.

mod means;
mod similarity;

pub use means::DampedItemMeans;
pub use similarity::SimilarityTable;

use crate::types::ItemId;

/// Table of per-item mean ratings.
pub trait ItemMeans {
    /// Get the mean rating for an item, if it has one.
    fn item_mean(&self, item: ItemId) -> Option<f64>;
}

/// Table of precomputed item neighbors.
pub trait ItemSimilarities {
    /// Get the neighbors of an item with their similarities, in no particular
    /// order.  Unknown items have no neighbors.
    fn neighbors(&self, item: ItemId) -> &[(ItemId, f64)];
}

impl<M: ItemMeans + ?Sized> ItemMeans for &M {
    fn item_mean(&self, item: ItemId) -> Option<f64> {
        (**self).item_mean(item)
    }
}

impl<S: ItemSimilarities + ?Sized> ItemSimilarities for &S {
    fn neighbors(&self, item: ItemId) -> &[(ItemId, f64)] {
        (**self).neighbors(item)
    }
}
