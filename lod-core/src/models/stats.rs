use serde::{Deserialize, Serialize};

/// Point-in-time engine statistics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub total_original_bytes: u64,
    pub total_compressed_bytes: u64,
    /// Mean of per-entry compression ratios; 0 when empty.
    pub avg_ratio: f64,
    pub hit_count: u64,
    pub miss_count: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub retrievals: u64,
    pub prefetch_enqueued: u64,
    pub prefetch_dropped: u64,
    pub render_failures: u64,
}
