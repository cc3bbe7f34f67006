//! Feature-hashing TF-IDF embedder.
//!
//! Generates fixed-dimension vectors by hashing terms into buckets weighted by
//! term frequency. Deterministic and dependency-free; used when no model
//! server is wired in and throughout the test suite.

use std::collections::HashMap;

use lod_core::errors::EmbeddingError;
use lod_core::traits::IEmbedder;
use lod_core::Granularity;

/// Deterministic hashing embedder. Ignores granularity so queries and
/// entries at the same level share one vector space.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Hash a term into a bucket index using FNV-1a.
    fn bucket(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h % dims as u64) as usize
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .collect()
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        let tokens = Self::tokenize(text);
        if tokens.is_empty() || self.dimensions == 0 {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        for (term, count) in &tf {
            // Longer terms are rarer; short ones are likely stopwords.
            let idf = 1.0 + (term.chars().count() as f32).ln();
            vec[Self::bucket(term, self.dimensions)] += (count / total) * idf;
        }

        crate::normalize::l2_normalize(&mut vec);
        vec
    }
}

impl IEmbedder for HashingEmbedder {
    fn embed(&self, text: &str, _granularity: Granularity) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.vector(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing-tfidf"
    }
}
