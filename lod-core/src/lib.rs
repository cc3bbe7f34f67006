//! # lod-core
//!
//! Foundation crate for the level-of-detail semantic cache.
//! Defines the data model, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod granularity;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{ConfigureOptions, LodConfig};
pub use errors::{LodError, LodResult};
pub use granularity::Granularity;
pub use models::{
    CacheEntry, CacheStats, CompressedRepresentation, CompressionStats, EmbeddingSet, EntryId,
    IngestContext, IngestRequest, RankedResult, RankedResults, RetrieveRequest, Score,
    SearchMetadata, StructuralFilter, VisualAsset,
};
