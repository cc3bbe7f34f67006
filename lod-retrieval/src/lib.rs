//! # lod-retrieval
//!
//! Ranks cached entries against a query embedding at one granularity.
//! Scoring is delegated to an [`IBatchScorer`](lod_core::traits::IBatchScorer);
//! every shipped scorer uses the same kernel so rankings never depend on
//! which one is installed.

pub mod index;
pub mod scorer;
pub mod similarity;

pub use index::SimilarityIndex;
pub use scorer::{ParallelScorer, SequentialScorer};
pub use similarity::cosine_similarity;
