//! # lod-compression
//!
//! Turns text plus per-level embeddings into five fixed-size packed buffers.
//! [`FeaturePacker`] builds one 7-byte [`TileUnit`]; [`HierarchicalCompressor`]
//! slices text per [`Granularity`](lod_core::Granularity) and concatenates
//! units up to each level's capacity.

pub mod compressor;
pub mod features;
pub mod levels;
pub mod packing;

pub use compressor::HierarchicalCompressor;
pub use features::PatternClass;
pub use packing::{pack14, unpack14, FeaturePacker, TileUnit, UnpackedUnit};
