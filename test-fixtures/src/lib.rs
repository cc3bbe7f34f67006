//! Shared builders and fake collaborators for LOD cache tests.
//!
//! Entries built here bypass the compressor and embedder so tests can pin
//! scores, timestamps, and vectors exactly.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use lod_core::errors::{EmbeddingError, RenderError};
use lod_core::traits::{IEmbedder, IRenderer};
use lod_core::{
    CacheEntry, CompressedRepresentation, CompressionStats, EmbeddingSet, EntryId, Granularity,
    Score, VisualAsset,
};

/// Fixed reference instant so ordering by `created_at` is reproducible.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Unit vector with a single hot component.
pub fn one_hot(dims: usize, hot: usize) -> Vec<f32> {
    let mut v = vec![0.0; dims];
    if dims > 0 {
        v[hot % dims] = 1.0;
    }
    v
}

/// Normalize a hand-written vector.
pub fn unit(v: &[f32]) -> Vec<f32> {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
        return v.to_vec();
    }
    v.iter().map(|x| x / norm).collect()
}

/// An entry whose value score is `priority * confidence`, created
/// `age_secs` after [`epoch`].
pub fn make_entry(id: &str, priority: f64, confidence: f64, age_secs: i64) -> CacheEntry {
    let created = epoch() + Duration::seconds(age_secs);
    let compressed = CompressedRepresentation::new(std::array::from_fn(|_| vec![0u8; 7]));
    CacheEntry {
        id: EntryId::from(id),
        source_text: format!("source text for {id}"),
        compression_stats: CompressionStats::compute(21, &compressed, false),
        compressed,
        embeddings: EmbeddingSet::new(std::array::from_fn(|_| one_hot(8, 0))),
        created_at: created,
        last_accessed: created,
        access_count: 0,
        prediction_confidence: Score::new(confidence),
        retrieval_priority: Score::new(priority),
    }
}

/// An entry with the same vector at every level.
pub fn make_entry_with_vector(id: &str, vector: Vec<f32>, priority: f64) -> CacheEntry {
    let mut entry = make_entry(id, priority, 1.0, 0);
    entry.embeddings = EmbeddingSet::new(std::array::from_fn(|_| vector.clone()));
    entry
}

/// Embedder that always fails.
pub struct FailingEmbedder {
    pub dims: usize,
}

impl IEmbedder for FailingEmbedder {
    fn embed(&self, _text: &str, _g: Granularity) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::ProviderFailed {
            provider: "failing".to_string(),
            reason: "model server unreachable".to_string(),
        })
    }

    fn dimensions(&self) -> usize {
        self.dims
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Wraps an embedder and counts calls.
pub struct CountingEmbedder<E> {
    inner: E,
    calls: AtomicUsize,
}

impl<E: IEmbedder> CountingEmbedder<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<E: IEmbedder> IEmbedder for CountingEmbedder<E> {
    fn embed(&self, text: &str, g: Granularity) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed(text, g)
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Renderer that always fails.
pub struct FailingRenderer;

impl IRenderer for FailingRenderer {
    fn render(&self, granularity: Granularity, _bytes: &[u8]) -> Result<VisualAsset, RenderError> {
        Err(RenderError::RenderFailed {
            granularity,
            reason: "renderer offline".to_string(),
        })
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Short legal-domain corpus used across integration tests.
pub fn legal_corpus() -> Vec<&'static str> {
    vec![
        "The defendant breached the supply contract by missing three deliveries.",
        "Statute of limitations for written agreements is six years in this jurisdiction.",
        "Evidence of prior negligence was excluded by the trial court.",
        "The kernel scheduler preempts threads when the time slice expires.",
        "Quarterly revenue rose 12 percent to 4.2 million on strong demand.",
    ]
}
