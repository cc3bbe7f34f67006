//! In-memory embedding memo using moka.
//!
//! TinyLFU admission policy, size-bounded eviction. Sound only because
//! embedders are required to be deterministic.

use lod_core::Granularity;
use moka::sync::Cache;

/// Memoized embeddings keyed by `blake3(granularity ‖ text)`.
pub struct EmbeddingCache {
    cache: Cache<String, Vec<f32>>,
}

impl EmbeddingCache {
    /// Create a new cache with the given max entry count.
    pub fn new(max_entries: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_entries).build(),
        }
    }

    /// Cache key for a text embedded at a granularity.
    pub fn key(text: &str, granularity: Granularity) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(granularity.as_str().as_bytes());
        hasher.update(&[0]);
        hasher.update(text.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, embedding: Vec<f32>) {
        self.cache.insert(key, embedding);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    /// Approximate number of entries (moka reports eventually).
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
