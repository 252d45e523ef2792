//! End-to-end scoring tests over in-memory rating data.
use float_cmp::approx_eq;
use proptest::prelude::*;

use lenskit_knn::{
    DampedItemMeans, DampedMeanConfig, ItemItemScorer, ItemScorer, ItemScorerConfig, Rating,
    RatingMatrix, RatingSource, ScoreOutcome, SimilarityTable, UserScorerConfig, UserUserScorer,
};

#[test]
fn test_item_item_single_neighbor() {
    let rm = RatingMatrix::from_ratings(vec![Rating::new(1, 2, 5.0)]).unwrap();
    let means = DampedItemMeans::from_means(vec![(1, 3.0), (2, 4.0)], 3.5);
    let sims = SimilarityTable::from_triples(vec![(1, 2, 0.8)]);
    let scorer = ItemItemScorer::new(&rm, &means, &sims, ItemScorerConfig::default()).unwrap();

    let scores = scorer.score(1, &[1]).unwrap();
    assert_eq!(scores.len(), 1);
    assert!(approx_eq!(f64, scores[&1], 4.0, epsilon = 1e-12));
}

#[test]
fn test_item_item_with_computed_means() {
    // item 10: (5 + 3) / 2 = 4, item 20: 2 / 1 = 2
    let rm = RatingMatrix::from_ratings(vec![
        Rating::new(1, 10, 5.0),
        Rating::new(2, 10, 3.0),
        Rating::new(2, 20, 2.0),
    ])
    .unwrap();
    let means = DampedItemMeans::compute(&rm, &DampedMeanConfig::default()).unwrap();
    let sims = SimilarityTable::from_triples(vec![(20, 10, 0.5)]);
    let scorer = ItemItemScorer::new(&rm, &means, &sims, ItemScorerConfig::default()).unwrap();

    // user 1 rated item 10 one above its mean
    let scores = scorer.score(1, &[20]).unwrap();
    assert!(approx_eq!(f64, scores[&20], 3.0, epsilon = 1e-12));
}

#[test]
fn test_user_without_ratings_gets_nothing() {
    let rm = RatingMatrix::from_ratings(vec![Rating::new(1, 2, 5.0), Rating::new(2, 1, 3.0)]).unwrap();
    let means = DampedItemMeans::compute(&rm, &DampedMeanConfig::default()).unwrap();
    let sims = SimilarityTable::from_triples(vec![(1, 2, 0.8), (2, 1, 0.8)]);
    let item = ItemItemScorer::new(&rm, &means, &sims, ItemScorerConfig::default()).unwrap();
    let user = UserUserScorer::new(&rm, UserScorerConfig::default()).unwrap();

    assert!(item.score(77, &[1, 2]).unwrap().is_empty());
    assert!(user.score(77, &[1, 2]).unwrap().is_empty());
}

#[test]
fn test_item_item_default_cap() {
    // user 1 rated 25 neighbors of item 0, each one above its mean
    let rm = RatingMatrix::from_ratings((1..=25).map(|i| Rating::new(1, i, 4.0))).unwrap();
    let means = DampedItemMeans::from_means((0..=25).map(|i| (i, 3.0)), 3.0);
    let sims = SimilarityTable::from_triples((1..=25).map(|i| (0, i, 1.0 / i as f64)));
    let scorer = ItemItemScorer::new(&rm, &means, &sims, ItemScorerConfig::default()).unwrap();

    let details = scorer.score_details(1, &[0]).unwrap();
    match details[0].1 {
        ScoreOutcome::Scored { score, neighbors } => {
            assert_eq!(neighbors, 20);
            assert!(approx_eq!(f64, score, 4.0, epsilon = 1e-12));
        }
        o => panic!("unexpected outcome {:?}", o),
    }
}

#[test]
fn test_batch_matches_single() {
    let rm = dense_ratings(12, 8);
    let scorer = UserUserScorer::new(&rm, UserScorerConfig::default()).unwrap();
    let queries: Vec<(i64, Vec<i64>)> = (0..12).map(|u| (u, (0..8).collect())).collect();
    let batch = scorer.score_batch(&queries).unwrap();
    assert_eq!(batch.len(), queries.len());
    for ((u, items), scores) in queries.iter().zip(batch.iter()) {
        assert_eq!(&scorer.score(*u, items).unwrap(), scores);
    }
}

/// Deterministic ratings for `nu` users over `ni` items.
fn dense_ratings(nu: i64, ni: i64) -> RatingMatrix {
    let ratings = (0..nu).flat_map(|u| {
        (0..ni)
            .filter(move |i| (u + i) % 3 != 0)
            .map(move |i| Rating::new(u, i, ((u * 7 + i * 3) % 5 + 1) as f64))
    });
    RatingMatrix::from_ratings(ratings).unwrap()
}

/// Similarities between every pair of rated items.
fn full_similarities(rm: &RatingMatrix) -> SimilarityTable {
    let items = rm.item_ids();
    let mut table = SimilarityTable::new();
    for i in &items {
        for j in &items {
            table.add(*i, *j, ((i * 31 + j * 17) % 13) as f64 / 6.0 - 1.0);
        }
    }
    table
}

fn rating_strategy() -> impl Strategy<Value = Vec<Rating>> {
    prop::collection::vec((0i64..80, 0i64..40, 1u8..=5), 0..1500).prop_map(|rs| {
        rs.into_iter()
            .map(|(u, i, r)| Rating::new(u, i, r as f64))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_item_item_bounds(ratings in rating_strategy(), user in 0i64..80) {
        let rm = RatingMatrix::from_ratings(ratings).unwrap();
        prop_assume!(rm.n_ratings() > 0);
        let means = DampedItemMeans::compute(&rm, &DampedMeanConfig::with_damping(5.0)).unwrap();
        let sims = full_similarities(&rm);
        let scorer = ItemItemScorer::new(&rm, &means, &sims, ItemScorerConfig::default()).unwrap();

        let targets: Vec<i64> = (0..40).collect();
        for (_item, outcome) in scorer.score_details(user, &targets).unwrap() {
            if let ScoreOutcome::Scored { score, neighbors } = outcome {
                prop_assert!(neighbors >= 1 && neighbors <= 20);
                prop_assert!(score.is_finite());
            }
        }
        for score in scorer.score(user, &targets).unwrap().values() {
            prop_assert!(score.is_finite());
        }
    }

    #[test]
    fn test_user_user_bounds(ratings in rating_strategy(), user in 0i64..80) {
        let rm = RatingMatrix::from_ratings(ratings).unwrap();
        let scorer = UserUserScorer::new(&rm, UserScorerConfig::default()).unwrap();

        let nbrs = scorer.neighbors(user).unwrap();
        prop_assert!(nbrs.iter().all(|(v, _)| v != user));

        let targets: Vec<i64> = (0..40).collect();
        for (item, outcome) in scorer.score_details(user, &targets).unwrap() {
            match outcome {
                ScoreOutcome::Scored { score, neighbors } => {
                    prop_assert!(neighbors >= 2 && neighbors <= 30);
                    prop_assert!(score.is_finite());
                    // every accepted neighbor is positively similar and rated the item
                    let qualifying = nbrs
                        .iter()
                        .filter(|(v, s)| *s > 0.0 && rm.user_ratings(*v).contains_key(item))
                        .count();
                    prop_assert_eq!(neighbors, qualifying.min(30));
                }
                ScoreOutcome::InsufficientNeighbors { found, required } => {
                    prop_assert!(found < required);
                }
                o => prop_assert!(false, "unexpected outcome {:?}", o),
            }
        }
    }

    #[test]
    fn test_user_user_cache_agrees(ratings in rating_strategy(), user in 0i64..80) {
        let rm = RatingMatrix::from_ratings(ratings).unwrap();
        let live = UserUserScorer::new(&rm, UserScorerConfig::default()).unwrap();
        let cached = UserUserScorer::with_profile_cache(&rm, UserScorerConfig::default()).unwrap();
        let targets: Vec<i64> = (0..40).collect();
        prop_assert_eq!(
            live.score_details(user, &targets).unwrap(),
            cached.score_details(user, &targets).unwrap()
        );
    }
}
