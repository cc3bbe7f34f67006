use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CompressedRepresentation, CompressionStats, EmbeddingSet, IngestContext, Score};

/// Content-addressed entry key: blake3 over `(text, context)`, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Stable key for a text and its ingest context. Every field is length
    /// prefixed so adjacent fields cannot alias each other.
    pub fn from_content(text: &str, context: &IngestContext) -> Self {
        let mut hasher = blake3::Hasher::new();
        write_field(&mut hasher, Some(text));
        write_field(&mut hasher, context.session_id.as_deref());
        write_field(&mut hasher, context.query_context.as_deref());
        match &context.search_metadata {
            Some(meta) => {
                hasher.update(&[1]);
                write_field(&mut hasher, meta.document_type.as_deref());
                write_field(&mut hasher, meta.case_id.as_deref());
                hasher.update(&(meta.tags.len() as u64).to_le_bytes());
                for tag in &meta.tags {
                    write_field(&mut hasher, Some(tag));
                }
            }
            None => {
                hasher.update(&[0]);
            }
        }
        Self(hasher.finalize().to_hex().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn write_field(hasher: &mut blake3::Hasher, field: Option<&str>) {
    match field {
        Some(value) => {
            hasher.update(&[1]);
            hasher.update(&(value.len() as u64).to_le_bytes());
            hasher.update(value.as_bytes());
        }
        None => {
            hasher.update(&[0]);
        }
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The unit of storage: one ingested text at every level of detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub id: EntryId,
    /// Source text, truncated to the configured maximum length.
    pub source_text: String,
    pub compressed: CompressedRepresentation,
    pub embeddings: EmbeddingSet,
    pub created_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
    pub access_count: u64,
    pub prediction_confidence: Score,
    pub retrieval_priority: Score,
    pub compression_stats: CompressionStats,
}

impl CacheEntry {
    /// `retrieval_priority × prediction_confidence`, the eviction key.
    pub fn value_score(&self) -> f64 {
        self.retrieval_priority.value() * self.prediction_confidence.value()
    }

    /// Record a cache hit.
    pub fn record_access(&mut self, now: DateTime<Utc>) {
        self.access_count = self.access_count.saturating_add(1);
        self.last_accessed = now;
    }
}
