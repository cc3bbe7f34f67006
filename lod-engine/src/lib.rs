//! # lod-engine
//!
//! The cache engine façade. [`CacheEngine`] ingests text into compressed
//! level-of-detail entries, ranks them against queries, evicts by value
//! score, and feeds a bounded background prefetch queue.

pub mod engine;
pub mod metrics;
pub mod prefetch;
pub mod render;
pub mod scoring;
pub mod tracing_setup;

pub use engine::{CacheEngine, CacheEngineBuilder};
pub use metrics::CacheMetrics;
pub use prefetch::PrefetchJob;
pub use render::TileSvgRenderer;
pub use tracing_setup::init_tracing;
