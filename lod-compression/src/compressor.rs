use lod_core::config::CacheConfig;
use lod_core::constants::TILE_UNIT_BYTES;
use lod_core::{CompressedRepresentation, EmbeddingSet, Granularity};
use tracing::debug;

use crate::levels;
use crate::packing::FeaturePacker;

/// Builds a [`CompressedRepresentation`] from text and its per-level
/// embeddings.
///
/// Algorithm, per level from finest to coarsest:
/// 1. Cut the level's text span (first char, 3/15/75 words, whole text).
/// 2. Split the level's embedding into `chunk_dims`-wide chunks.
/// 3. Keep at most `unit_capacity` chunks; the rest are dropped, never wrapped.
/// 4. Spread the span's words over the kept units and pack each
///    (text segment, chunk) pair into one 7-byte tile unit.
#[derive(Debug, Clone)]
pub struct HierarchicalCompressor {
    unit_capacities: [usize; 5],
    packer: FeaturePacker,
}

impl HierarchicalCompressor {
    pub fn new(unit_capacities: [usize; 5], chunk_dims: usize) -> Self {
        Self {
            unit_capacities,
            packer: FeaturePacker::new(chunk_dims.max(1)),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.unit_capacities, config.chunk_dims)
    }

    pub fn unit_capacity(&self, granularity: Granularity) -> usize {
        self.unit_capacities[granularity.index()]
    }

    /// Compress every level. Never fails; short or empty text packs whatever
    /// is available.
    pub fn compress(&self, text: &str, embeddings: &EmbeddingSet) -> CompressedRepresentation {
        let levels =
            Granularity::ALL.map(|g| self.compress_level(text, embeddings.get(g), g));
        CompressedRepresentation::new(levels)
    }

    /// Pack one level. The buffer never exceeds `unit_capacity * 7` bytes.
    pub fn compress_level(&self, text: &str, embedding: &[f32], granularity: Granularity) -> Vec<u8> {
        let span = levels::span(text, granularity);
        let chunk_dims = self.packer.chunk_dims();
        let available = levels::chunk_count(embedding.len(), chunk_dims);
        let capacity = self.unit_capacity(granularity).max(1);
        let units = available.min(capacity);

        if available > capacity {
            debug!(
                level = %granularity,
                available,
                capacity,
                "dropping embedding chunks beyond level capacity"
            );
        }

        let segments = levels::segment(span, units);
        let mut out = Vec::with_capacity(units * TILE_UNIT_BYTES);
        for (i, segment) in segments.iter().enumerate() {
            let start = (i * chunk_dims).min(embedding.len());
            let end = (start + chunk_dims).min(embedding.len());
            let unit = self.packer.pack_unit(segment, &embedding[start..end]);
            out.extend_from_slice(unit.as_bytes());
        }
        out
    }
}

impl Default for HierarchicalCompressor {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
