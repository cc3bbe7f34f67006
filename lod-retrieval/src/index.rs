use std::cmp::Ordering;
use std::sync::Arc;

use lod_core::traits::IBatchScorer;
use lod_core::{CacheEntry, EntryId, Granularity};
use tracing::{debug, warn};

use crate::scorer::SequentialScorer;

/// Ranks candidates by cosine similarity at one level.
///
/// Order: score descending, then retrieval priority descending, then id
/// ascending, so equal inputs always produce equal output.
#[derive(Clone)]
pub struct SimilarityIndex {
    scorer: Arc<dyn IBatchScorer>,
}

struct Scored<'a> {
    entry: &'a CacheEntry,
    score: f64,
}

fn rank_order(a: &Scored<'_>, b: &Scored<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| {
            b.entry
                .retrieval_priority
                .value()
                .total_cmp(&a.entry.retrieval_priority.value())
        })
        .then_with(|| a.entry.id.cmp(&b.entry.id))
}

impl SimilarityIndex {
    pub fn new(scorer: Arc<dyn IBatchScorer>) -> Self {
        Self { scorer }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Top `top_k` candidates for `query` at `level`.
    ///
    /// O(n·D) scoring plus O(n) selection and O(k log k) ordering.
    pub fn rank(
        &self,
        query: &[f32],
        candidates: &[&CacheEntry],
        top_k: usize,
        level: Granularity,
    ) -> Vec<(EntryId, f64)> {
        if candidates.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let vectors: Vec<&[f32]> = candidates.iter().map(|c| c.embeddings.get(level)).collect();
        let mut scores = self.scorer.score_batch(query, &vectors);
        if scores.len() != candidates.len() {
            warn!(
                scorer = self.scorer.name(),
                expected = candidates.len(),
                actual = scores.len(),
                "scorer returned wrong batch size, rescoring sequentially"
            );
            scores = SequentialScorer.score_batch(query, &vectors);
        }

        let mut scored: Vec<Scored> = candidates
            .iter()
            .zip(scores)
            .map(|(&entry, score)| Scored {
                entry,
                score: if score.is_finite() { score } else { 0.0 },
            })
            .collect();

        if top_k < scored.len() {
            scored.select_nth_unstable_by(top_k, rank_order);
            scored.truncate(top_k);
        }
        scored.sort_by(rank_order);

        debug!(
            level = %level,
            candidates = candidates.len(),
            returned = scored.len(),
            "ranked candidates"
        );

        scored
            .into_iter()
            .map(|s| (s.entry.id.clone(), s.score))
            .collect()
    }
}

impl Default for SimilarityIndex {
    fn default() -> Self {
        Self::new(Arc::new(SequentialScorer))
    }
}
