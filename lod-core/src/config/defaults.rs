//! Default values for every configuration field.

use crate::constants::DEFAULT_UNIT_CAPACITIES;

pub const DEFAULT_MAX_ENTRIES: usize = 1000;
pub const DEFAULT_HIT_THRESHOLD: f64 = 0.8;
pub const DEFAULT_UNITS: [usize; 5] = DEFAULT_UNIT_CAPACITIES;
pub const DEFAULT_EMBEDDING_DIM: usize = 384;
pub const DEFAULT_CHUNK_DIMS: usize = 4;
pub const DEFAULT_MAX_TEXT_LEN: usize = 10_000;
pub const DEFAULT_EXCERPT_LEN: usize = 160;
pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_EMBEDDING_CACHE_ENTRIES: u64 = 10_000;

pub const DEFAULT_LENGTH_WEIGHT: f64 = 0.3;
pub const DEFAULT_CONTEXT_WEIGHT: f64 = 0.4;
pub const DEFAULT_METADATA_WEIGHT: f64 = 0.3;
pub const DEFAULT_LENGTH_NORM: f64 = 1000.0;
pub const DEFAULT_CONTEXT_PRESENT: f64 = 0.8;
pub const DEFAULT_CONTEXT_ABSENT: f64 = 0.5;
pub const DEFAULT_METADATA_PRESENT: f64 = 0.9;
pub const DEFAULT_METADATA_ABSENT: f64 = 0.6;
pub const DEFAULT_RECENCY_WEIGHT: f64 = 0.4;
pub const DEFAULT_SESSION_WEIGHT: f64 = 0.3;
pub const DEFAULT_DOMAIN_WEIGHT: f64 = 0.3;
pub const DEFAULT_SESSION_BOUND: f64 = 0.8;
pub const DEFAULT_SESSION_UNBOUND: f64 = 0.5;
pub const DEFAULT_DOMAIN_KEYWORDS: &[&str] = &[
    "contract",
    "liability",
    "evidence",
    "precedent",
    "statute",
    "plaintiff",
    "defendant",
    "court",
    "agreement",
];

pub const DEFAULT_PREFETCH_ENABLED: bool = true;
pub const DEFAULT_PREFETCH_QUEUE_CAPACITY: usize = 256;

pub const DEFAULT_LOG_LEVEL: &str = "info";
