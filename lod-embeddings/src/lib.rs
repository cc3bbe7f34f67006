//! # lod-embeddings
//!
//! Wraps the external [`IEmbedder`](lod_core::traits::IEmbedder) collaborator
//! with dimension validation, L2 normalization, and a memoizing cache.

pub mod cache;
pub mod normalize;
pub mod providers;
pub mod service;

pub use cache::EmbeddingCache;
pub use providers::HashingEmbedder;
pub use service::EmbeddingService;
