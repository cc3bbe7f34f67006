use std::sync::Arc;

use lod_core::{CacheEntry, Granularity};
use lod_retrieval::{ParallelScorer, SequentialScorer, SimilarityIndex};
use proptest::prelude::*;
use test_fixtures::make_entry_with_vector;

const DIMS: usize = 12;

fn arb_vector() -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-1.0f32..1.0, DIMS)
}

// ── Ranking determinism across scorers ───────────────────────────────────

proptest! {
    #[test]
    fn sequential_and_parallel_rank_identically(
        vectors in proptest::collection::vec((arb_vector(), 0.0f64..=1.0), 0..120),
        query in arb_vector(),
        top_k in 1usize..50,
    ) {
        let entries: Vec<CacheEntry> = vectors
            .into_iter()
            .enumerate()
            .map(|(i, (v, p))| make_entry_with_vector(&format!("e{i:03}"), v, p))
            .collect();
        let refs: Vec<&CacheEntry> = entries.iter().collect();

        let seq = SimilarityIndex::new(Arc::new(SequentialScorer))
            .rank(&query, &refs, top_k, Granularity::Tile);
        let par = SimilarityIndex::new(Arc::new(ParallelScorer::new(1)))
            .rank(&query, &refs, top_k, Granularity::Tile);

        prop_assert_eq!(seq.len(), par.len());
        for ((id_s, score_s), (id_p, score_p)) in seq.iter().zip(&par) {
            prop_assert_eq!(id_s, id_p);
            prop_assert!((score_s - score_p).abs() <= 1e-6);
        }
    }
}

// ── Output is sorted and bounded ─────────────────────────────────────────

proptest! {
    #[test]
    fn scores_descend_and_stay_in_range(
        vectors in proptest::collection::vec(arb_vector(), 1..60),
        query in arb_vector(),
    ) {
        let entries: Vec<CacheEntry> = vectors
            .into_iter()
            .enumerate()
            .map(|(i, v)| make_entry_with_vector(&format!("e{i}"), v, 0.5))
            .collect();
        let refs: Vec<&CacheEntry> = entries.iter().collect();
        let ranked = SimilarityIndex::default().rank(&query, &refs, refs.len(), Granularity::Block);

        prop_assert_eq!(ranked.len(), refs.len());
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].1 >= pair[1].1);
        }
        for (_, score) in &ranked {
            prop_assert!(score.is_finite());
            prop_assert!((-1.0..=1.0).contains(score));
        }
    }
}

#[test]
fn zero_query_against_any_candidate_scores_zero() {
    let entries: Vec<CacheEntry> = (0..5)
        .map(|i| make_entry_with_vector(&format!("e{i}"), vec![0.1 * i as f32; DIMS], 0.5))
        .collect();
    let refs: Vec<&CacheEntry> = entries.iter().collect();
    for level in Granularity::ALL {
        for (_, score) in SimilarityIndex::default().rank(&[0.0; DIMS], &refs, 5, level) {
            assert_eq!(score, 0.0);
        }
    }
}
