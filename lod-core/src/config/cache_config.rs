use serde::{Deserialize, Serialize};

use super::defaults;

/// Capacity, packing, and retrieval knobs for the cache engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of live entries.
    pub max_entries: usize,
    /// Minimum prediction confidence for an ingest to be served from cache.
    pub hit_threshold: f64,
    /// Tile-unit capacity per level, finest first.
    pub unit_capacities: [usize; 5],
    /// Dimensionality of every embedding vector.
    pub embedding_dim: usize,
    /// Embedding dimensions folded into one tile unit.
    pub chunk_dims: usize,
    /// Source text is truncated to this many characters before compression.
    pub max_text_len: usize,
    /// Characters of source text returned with each ranked result.
    pub excerpt_len: usize,
    /// Result count used when a request does not specify `top_k`.
    pub default_top_k: usize,
    /// Optional time-to-live for entries, in seconds.
    pub ttl_secs: Option<u64>,
    /// Bound on memoized embeddings.
    pub embedding_cache_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: defaults::DEFAULT_MAX_ENTRIES,
            hit_threshold: defaults::DEFAULT_HIT_THRESHOLD,
            unit_capacities: defaults::DEFAULT_UNITS,
            embedding_dim: defaults::DEFAULT_EMBEDDING_DIM,
            chunk_dims: defaults::DEFAULT_CHUNK_DIMS,
            max_text_len: defaults::DEFAULT_MAX_TEXT_LEN,
            excerpt_len: defaults::DEFAULT_EXCERPT_LEN,
            default_top_k: defaults::DEFAULT_TOP_K,
            ttl_secs: None,
            embedding_cache_entries: defaults::DEFAULT_EMBEDDING_CACHE_ENTRIES,
        }
    }
}
