//! Batch scorers. Both call [`cosine_similarity`] per candidate, so their
//! outputs are bit-identical.

use lod_core::traits::IBatchScorer;
use rayon::prelude::*;

use crate::similarity::cosine_similarity;

/// Plain CPU loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialScorer;

impl IBatchScorer for SequentialScorer {
    fn score_batch(&self, query: &[f32], candidates: &[&[f32]]) -> Vec<f64> {
        candidates
            .iter()
            .map(|c| cosine_similarity(query, c))
            .collect()
    }

    fn name(&self) -> &str {
        "sequential"
    }
}

/// Data-parallel scorer on the rayon pool. Batches smaller than
/// `min_parallel` run inline to skip scheduling overhead.
#[derive(Debug, Clone, Copy)]
pub struct ParallelScorer {
    min_parallel: usize,
}

impl ParallelScorer {
    pub fn new(min_parallel: usize) -> Self {
        Self { min_parallel }
    }
}

impl Default for ParallelScorer {
    fn default() -> Self {
        Self::new(256)
    }
}

impl IBatchScorer for ParallelScorer {
    fn score_batch(&self, query: &[f32], candidates: &[&[f32]]) -> Vec<f64> {
        if candidates.len() < self.min_parallel {
            return SequentialScorer.score_batch(query, candidates);
        }
        candidates
            .par_iter()
            .map(|c| cosine_similarity(query, c))
            .collect()
    }

    fn name(&self) -> &str {
        "parallel"
    }
}
