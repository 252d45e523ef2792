//! Precomputed item neighbor lists.
use rustc_hash::FxHashMap;

use crate::types::ItemId;

use super::ItemSimilarities;

/// Item neighbor lists, as produced by an offline similarity computation.
#[derive(Debug, Clone, Default)]
pub struct SimilarityTable {
    neighbors: FxHashMap<ItemId, Vec<(ItemId, f64)>>,
}

impl SimilarityTable {
    pub fn new() -> SimilarityTable {
        SimilarityTable::default()
    }

    /// Build a table from `(item, neighbor, similarity)` triples.
    pub fn from_triples<I>(triples: I) -> SimilarityTable
    where
        I: IntoIterator<Item = (ItemId, ItemId, f64)>,
    {
        let mut table = SimilarityTable::new();
        for (item, nbr, sim) in triples {
            table.add(item, nbr, sim);
        }
        table
    }

    /// Add one neighbor to an item's list.  An item is never its own
    /// neighbor; self-pairs are ignored.
    pub fn add(&mut self, item: ItemId, neighbor: ItemId, sim: f64) {
        if item != neighbor {
            self.neighbors.entry(item).or_default().push((neighbor, sim));
        }
    }

    /// Replace an item's neighbor list.
    pub fn insert<I>(&mut self, item: ItemId, neighbors: I)
    where
        I: IntoIterator<Item = (ItemId, f64)>,
    {
        let list = neighbors.into_iter().filter(|(n, _)| *n != item).collect();
        self.neighbors.insert(item, list);
    }

    /// Number of items with neighbor lists.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

impl ItemSimilarities for SimilarityTable {
    fn neighbors(&self, item: ItemId) -> &[(ItemId, f64)] {
        self.neighbors.get(&item).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[test]
fn test_from_triples() {
    let table = SimilarityTable::from_triples(vec![(1, 2, 0.5), (1, 3, 0.25), (2, 1, 0.5)]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.neighbors(1), &[(2, 0.5), (3, 0.25)]);
    assert_eq!(table.neighbors(2), &[(1, 0.5)]);
}

#[test]
fn test_self_pairs_dropped() {
    let mut table = SimilarityTable::from_triples(vec![(1, 1, 1.0), (1, 2, 0.5)]);
    assert_eq!(table.neighbors(1), &[(2, 0.5)]);
    table.insert(3, vec![(3, 1.0), (4, 0.1)]);
    assert_eq!(table.neighbors(3), &[(4, 0.1)]);
}

#[test]
fn test_unknown_item() {
    let table = SimilarityTable::new();
    assert!(table.neighbors(7).is_empty());
}
