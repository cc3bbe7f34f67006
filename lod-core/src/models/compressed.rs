use serde::{Deserialize, Serialize};

use crate::constants::TILE_UNIT_BYTES;
use crate::granularity::Granularity;

/// One packed byte buffer per granularity, finest first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompressedRepresentation {
    levels: [Vec<u8>; 5],
}

impl CompressedRepresentation {
    pub fn new(levels: [Vec<u8>; 5]) -> Self {
        Self { levels }
    }

    /// Packed bytes for one level.
    pub fn level(&self, granularity: Granularity) -> &[u8] {
        &self.levels[granularity.index()]
    }

    /// Number of whole tile units stored at a level.
    pub fn unit_count(&self, granularity: Granularity) -> usize {
        self.level(granularity).len() / TILE_UNIT_BYTES
    }

    /// Sum of all level buffer lengths.
    pub fn total_len(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Granularity, &[u8])> {
        Granularity::ALL
            .into_iter()
            .map(move |g| (g, self.level(g)))
    }
}

/// Size accounting for one entry, recomputed at insertion.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CompressionStats {
    /// Byte length of the text as supplied, before truncation.
    pub original_size: usize,
    /// Sum of level buffer lengths.
    pub compressed_size: usize,
    /// `original_size / compressed_size`; 0 when nothing was packed.
    pub ratio: f64,
    /// Whether the source text was cut to `max_text_len` before compression.
    pub truncated: bool,
}

impl CompressionStats {
    pub fn compute(original_size: usize, compressed: &CompressedRepresentation, truncated: bool) -> Self {
        let compressed_size = compressed.total_len();
        let ratio = if compressed_size == 0 {
            0.0
        } else {
            original_size as f64 / compressed_size as f64
        };
        Self {
            original_size,
            compressed_size,
            ratio,
            truncated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_sum_level_lengths() {
        let rep = CompressedRepresentation::new([
            vec![0; 7],
            vec![0; 7],
            vec![0; 35],
            vec![0; 70],
            vec![0; 140],
        ]);
        let stats = CompressionStats::compute(518, &rep, false);
        assert_eq!(stats.compressed_size, 259);
        assert!((stats.ratio - 2.0).abs() < 1e-12);
        assert_eq!(rep.unit_count(Granularity::Section), 10);
    }

    #[test]
    fn empty_representation_has_zero_ratio() {
        let stats = CompressionStats::compute(10, &CompressedRepresentation::default(), false);
        assert_eq!(stats.ratio, 0.0);
    }
}
