//! Basic data types shared by the scorers.
use rustc_hash::FxHashMap;

/// User identifiers.
pub type UserId = i64;
/// Item identifiers.
pub type ItemId = i64;

/// Predicted ratings, keyed by item.  Items without a prediction are absent.
pub type ScoreMap = FxHashMap<ItemId, f64>;

/// A single rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub user: UserId,
    pub item: ItemId,
    pub value: f64,
}

impl Rating {
    pub fn new(user: UserId, item: ItemId, value: f64) -> Rating {
        Rating { user, item, value }
    }
}

impl From<(UserId, ItemId, f64)> for Rating {
    fn from((user, item, value): (UserId, ItemId, f64)) -> Rating {
        Rating { user, item, value }
    }
}

/// The result of attempting to score one target item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreOutcome {
    /// A prediction, with the number of neighbors that contributed to it.
    Scored { score: f64, neighbors: usize },
    /// The item is not known to the model.
    UnknownItem,
    /// No usable neighbor was found.
    NoNeighbors,
    /// Too few usable neighbors were found.
    InsufficientNeighbors { found: usize, required: usize },
    /// The aggregate had no defined value (empty mean, zero weight sum).
    UndefinedAggregate,
}

impl ScoreOutcome {
    /// Get the score, if one was produced.
    pub fn score(&self) -> Option<f64> {
        match self {
            ScoreOutcome::Scored { score, .. } => Some(*score),
            _ => None,
        }
    }
}

/// Collect the scored outcomes into a score map.
pub fn collect_scores(outcomes: &[(ItemId, ScoreOutcome)]) -> ScoreMap {
    outcomes
        .iter()
        .filter_map(|(i, o)| o.score().map(|s| (*i, s)))
        .collect()
}

/// Deduplicate target items, keeping first-seen order.
pub(crate) fn unique_targets(items: &[ItemId]) -> Vec<ItemId> {
    let mut seen = rustc_hash::FxHashSet::default();
    items.iter().copied().filter(|i| seen.insert(*i)).collect()
}

#[test]
fn test_collect_scores_drops_omissions() {
    let outcomes = vec![
        (
            1,
            ScoreOutcome::Scored {
                score: 3.5,
                neighbors: 2,
            },
        ),
        (2, ScoreOutcome::NoNeighbors),
        (3, ScoreOutcome::UnknownItem),
    ];
    let scores = collect_scores(&outcomes);
    assert_eq!(scores.len(), 1);
    assert_eq!(scores.get(&1), Some(&3.5));
    assert!(!scores.contains_key(&2));
}

#[test]
fn test_unique_targets() {
    assert_eq!(unique_targets(&[5, 3, 5, 1, 3]), vec![5, 3, 1]);
}
