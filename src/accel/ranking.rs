// This file is part of LensKit.
// Copyright (C) 2018-2023 Boise State University.
// Copyright (C) 2023-2026 Drexel University.
// Licensed under the MIT license, see LICENSE.md for details.
// SPDX-License-Identifier: MIT

//! Similarity-ranked neighbor lists.
use std::cmp::Reverse;

use ordered_float::NotNan;

use crate::errors::{KnnError, Result};

/// Neighbors of an entity, ordered by decreasing weight.
///
/// Ties keep the order in which the candidates were supplied, so ranking the
/// same input twice yields the same sequence.
#[derive(Debug, Clone, Default)]
pub struct RankedNeighbors {
    entries: Vec<(i64, NotNan<f64>)>,
}

impl RankedNeighbors {
    /// Rank the candidate neighbors of `entity`.  A NaN weight is an error.
    pub fn rank<I>(entity: i64, candidates: I) -> Result<RankedNeighbors>
    where
        I: IntoIterator<Item = (i64, f64)>,
    {
        let mut entries = candidates
            .into_iter()
            .map(|(n, w)| {
                NotNan::new(w)
                    .map(|w| (n, w))
                    .map_err(|_| KnnError::InvalidSimilarity {
                        entity,
                        neighbor: n,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        // sort_by_key is stable
        entries.sort_by_key(|(_n, w)| Reverse(*w));
        Ok(RankedNeighbors { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the neighbors from most to least similar.  Each call starts
    /// from the top of the ranking.
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.entries.iter().map(|(n, w)| (*n, w.into_inner()))
    }

    /// Scan the ranking, keeping neighbors accepted by `accept` and stopping
    /// after `limit` of them.
    pub fn take_accepted<B, F>(&self, limit: usize, accept: F) -> TakeAccepted<impl Iterator<Item = (i64, f64)> + '_, F>
    where
        F: FnMut((i64, f64)) -> Option<B>,
    {
        self.iter().take_accepted(limit, accept)
    }
}

/// Iterator that filter-maps its source and stops after a fixed number of
/// accepted entries.
///
/// Once `limit` entries are accepted, the source is not advanced again.
pub struct TakeAccepted<I, F> {
    iter: I,
    accept: F,
    remaining: usize,
}

impl<I, B, F> Iterator for TakeAccepted<I, F>
where
    I: Iterator,
    F: FnMut(I::Item) -> Option<B>,
{
    type Item = B;

    fn next(&mut self) -> Option<B> {
        if self.remaining == 0 {
            return None;
        }
        for entry in self.iter.by_ref() {
            if let Some(out) = (self.accept)(entry) {
                self.remaining -= 1;
                return Some(out);
            }
        }
        self.remaining = 0;
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_lo, hi) = self.iter.size_hint();
        let hi = hi.map_or(self.remaining, |h| h.min(self.remaining));
        (0, Some(hi))
    }
}

/// Extension trait providing [`TakeAccepted`] on iterators.
pub trait TakeAcceptedExt: Iterator + Sized {
    fn take_accepted<B, F>(self, limit: usize, accept: F) -> TakeAccepted<Self, F>
    where
        F: FnMut(Self::Item) -> Option<B>,
    {
        TakeAccepted {
            iter: self,
            accept,
            remaining: limit,
        }
    }
}

impl<I: Iterator> TakeAcceptedExt for I {}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_rank_descending() {
        let ranked = RankedNeighbors::rank(0, vec![(1, 0.2), (2, 0.9), (3, -0.5), (4, 0.4)]).unwrap();
        let ids: Vec<i64> = ranked.iter().map(|(n, _)| n).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_rank_ties_stable() {
        let ranked = RankedNeighbors::rank(0, vec![(7, 0.5), (3, 0.5), (5, 0.5)]).unwrap();
        let ids: Vec<i64> = ranked.iter().map(|(n, _)| n).collect();
        assert_eq!(ids, vec![7, 3, 5]);
    }

    #[test]
    fn test_rank_nan() {
        let res = RankedNeighbors::rank(10, vec![(1, 0.2), (2, f64::NAN)]);
        assert!(matches!(
            res,
            Err(KnnError::InvalidSimilarity {
                entity: 10,
                neighbor: 2
            })
        ));
    }

    #[test]
    fn test_rank_empty() {
        let ranked = RankedNeighbors::rank(0, Vec::new()).unwrap();
        assert!(ranked.is_empty());
        assert_eq!(ranked.take_accepted(5, Some).count(), 0);
    }

    #[test]
    fn test_take_accepted_limit() {
        let ranked = RankedNeighbors::rank(0, (0..100).map(|i| (i, i as f64))).unwrap();
        let taken: Vec<i64> = ranked
            .take_accepted(3, |(n, _w)| if n % 2 == 0 { Some(n) } else { None })
            .collect();
        assert_eq!(taken, vec![98, 96, 94]);
    }

    #[test]
    fn test_take_accepted_stops_scanning() {
        let scanned = Cell::new(0);
        let taken: Vec<i64> = (0..100)
            .take_accepted(2, |i| {
                scanned.set(scanned.get() + 1);
                if i >= 10 {
                    Some(i)
                } else {
                    None
                }
            })
            .collect();
        assert_eq!(taken, vec![10, 11]);
        assert_eq!(scanned.get(), 12);
    }

    #[test]
    fn test_take_accepted_restartable() {
        let ranked = RankedNeighbors::rank(0, vec![(1, 0.3), (2, 0.2), (3, 0.1)]).unwrap();
        let first: Vec<_> = ranked.take_accepted(2, Some).collect();
        let second: Vec<_> = ranked.take_accepted(2, Some).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    proptest! {
        #[test]
        fn test_rank_idempotent(weights in prop::collection::vec(-1.0f64..1.0, 0..80)) {
            let cands: Vec<(i64, f64)> = weights.iter().enumerate().map(|(i, w)| (i as i64, *w)).collect();
            let a: Vec<_> = RankedNeighbors::rank(0, cands.clone()).unwrap().iter().collect();
            let b: Vec<_> = RankedNeighbors::rank(0, cands).unwrap().iter().collect();
            prop_assert_eq!(&a, &b);
            prop_assert!(a.windows(2).all(|w| w[0].1 >= w[1].1));
        }

        #[test]
        fn test_take_accepted_bounded(n in 0usize..200, limit in 0usize..40) {
            let count = (0..n as i64).take_accepted(limit, Some).count();
            prop_assert_eq!(count, n.min(limit));
        }
    }
}
