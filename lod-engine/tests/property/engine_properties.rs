use std::sync::Arc;

use lod_core::{Granularity, IngestRequest, LodConfig, RetrieveRequest};
use lod_embeddings::HashingEmbedder;
use lod_engine::CacheEngine;
use proptest::prelude::*;

const DIMS: usize = 32;

fn engine(max_entries: usize) -> CacheEngine {
    let mut config = LodConfig::default();
    config.cache.embedding_dim = DIMS;
    config.cache.max_entries = max_entries;
    config.cache.max_text_len = 500;
    CacheEngine::new(config, Arc::new(HashingEmbedder::new(DIMS))).expect("engine")
}

fn arb_level() -> impl Strategy<Value = Granularity> {
    prop::sample::select(Granularity::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn arbitrary_text_ingests_within_bounds(
        texts in proptest::collection::vec(".{0,300}", 1..12),
        max_entries in 1usize..6,
    ) {
        let engine = engine(max_entries);
        for text in texts {
            let entry = engine.ingest(IngestRequest::new(text)).expect("ingest never fails with a working embedder");
            prop_assert_eq!(entry.compressed.level(Granularity::Glyph).len(), 7);
            prop_assert_eq!(entry.compressed.level(Granularity::Tile).len(), 7);
            prop_assert!(entry.compressed.level(Granularity::Block).len() <= 35);
            prop_assert!(entry.compressed.level(Granularity::Section).len() <= 175);
            prop_assert!(entry.compressed.level(Granularity::Document).len() <= 875);
            let c = entry.prediction_confidence.value();
            let p = entry.retrieval_priority.value();
            prop_assert!((0.0..=1.0).contains(&c));
            prop_assert!((0.0..=1.0).contains(&p));
            prop_assert!(engine.len() <= max_entries);
        }
    }

    #[test]
    fn retrieve_scores_are_finite_and_sorted(
        texts in proptest::collection::vec("[a-z ]{0,80}", 1..10),
        query in ".{0,40}",
        level in arb_level(),
        top_k in 0usize..8,
    ) {
        let engine = engine(16);
        for text in texts {
            engine.ingest(IngestRequest::new(text)).expect("ingest");
        }
        let results = engine
            .retrieve(RetrieveRequest::new(query).at_level(level).top_k(top_k))
            .expect("retrieve");
        prop_assert!(results.len() <= top_k);
        for r in &results.results {
            prop_assert!(r.score.is_finite());
            prop_assert!((-1.0..=1.0).contains(&r.score));
            prop_assert_eq!(r.level, level);
        }
        for pair in results.results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}
