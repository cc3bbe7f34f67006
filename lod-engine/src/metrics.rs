//! Lifetime counters shared by foreground calls and the prefetch worker.

use std::sync::atomic::{AtomicU64, Ordering};

use lod_core::CacheStats;

/// Monotonic counters. `clear` drops entries but keeps these.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    expirations: AtomicU64,
    retrievals: AtomicU64,
    prefetch_enqueued: AtomicU64,
    prefetch_dropped: AtomicU64,
    render_failures: AtomicU64,
}

fn bump(counter: &AtomicU64, by: u64) {
    if by > 0 {
        counter.fetch_add(by, Ordering::Relaxed);
    }
}

impl CacheMetrics {
    pub fn record_hit(&self) {
        bump(&self.hits, 1);
    }

    pub fn record_miss(&self) {
        bump(&self.misses, 1);
    }

    pub fn record_evictions(&self, count: usize) {
        bump(&self.evictions, count as u64);
    }

    pub fn record_expirations(&self, count: usize) {
        bump(&self.expirations, count as u64);
    }

    pub fn record_retrieval(&self) {
        bump(&self.retrievals, 1);
    }

    pub fn record_prefetch_enqueued(&self) {
        bump(&self.prefetch_enqueued, 1);
    }

    pub fn record_prefetch_dropped(&self) {
        bump(&self.prefetch_dropped, 1);
    }

    pub fn record_render_failure(&self) {
        bump(&self.render_failures, 1);
    }

    /// Copy the counters into `stats`. Entry-derived fields are left alone.
    pub fn fill(&self, stats: &mut CacheStats) {
        stats.hit_count = self.hits.load(Ordering::Relaxed);
        stats.miss_count = self.misses.load(Ordering::Relaxed);
        stats.evictions = self.evictions.load(Ordering::Relaxed);
        stats.expirations = self.expirations.load(Ordering::Relaxed);
        stats.retrievals = self.retrievals.load(Ordering::Relaxed);
        stats.prefetch_enqueued = self.prefetch_enqueued.load(Ordering::Relaxed);
        stats.prefetch_dropped = self.prefetch_dropped.load(Ordering::Relaxed);
        stats.render_failures = self.render_failures.load(Ordering::Relaxed);
    }
}
