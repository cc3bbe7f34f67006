use serde::{Deserialize, Serialize};

use crate::granularity::Granularity;

/// One embedding vector per granularity, all with the same dimensionality.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmbeddingSet {
    vectors: [Vec<f32>; 5],
}

impl EmbeddingSet {
    pub fn new(vectors: [Vec<f32>; 5]) -> Self {
        Self { vectors }
    }

    pub fn get(&self, granularity: Granularity) -> &[f32] {
        &self.vectors[granularity.index()]
    }

    /// Dimensionality of the vectors (taken from the glyph level).
    pub fn dimensions(&self) -> usize {
        self.vectors[0].len()
    }

    /// True when every level has exactly `dims` components.
    pub fn is_uniform(&self, dims: usize) -> bool {
        self.vectors.iter().all(|v| v.len() == dims)
    }
}
