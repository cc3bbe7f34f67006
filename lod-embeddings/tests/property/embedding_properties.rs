use std::sync::Arc;

use lod_core::Granularity;
use lod_embeddings::{EmbeddingService, HashingEmbedder};
use proptest::prelude::*;

const DIMS: usize = 48;

proptest! {
    #[test]
    fn service_output_is_unit_length_or_zero(text in ".{0,200}") {
        let service = EmbeddingService::new(Arc::new(HashingEmbedder::new(DIMS)), 64);
        let v = service.embed(&text, Granularity::Section).expect("hashing embedder never fails");
        prop_assert_eq!(v.len(), DIMS);
        prop_assert!(v.iter().all(|x| x.is_finite()));
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        prop_assert!(norm == 0.0 || (norm - 1.0).abs() < 1e-4);
    }

    #[test]
    fn memoized_result_matches_fresh_result(text in "[a-z ]{0,80}", level in 0usize..5) {
        let g = Granularity::ALL[level];
        let service = EmbeddingService::new(Arc::new(HashingEmbedder::new(DIMS)), 64);
        let fresh = service.embed(&text, g).expect("embed");
        prop_assert!(service.is_cached(&text, g));
        let memo = service.embed(&text, g).expect("embed");
        prop_assert_eq!(fresh, memo);
    }
}
