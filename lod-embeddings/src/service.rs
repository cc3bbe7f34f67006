//! EmbeddingService: the single path from raw text to a stored vector.
//!
//! Every vector leaving this service has the configured dimensionality, only
//! finite components, and unit length (or is all zeros).

use std::sync::Arc;

use lod_core::errors::EmbeddingError;
use lod_core::traits::IEmbedder;
use lod_core::{EmbeddingSet, Granularity};
use tracing::{debug, info, warn};

use crate::cache::EmbeddingCache;
use crate::normalize;

pub struct EmbeddingService {
    provider: Arc<dyn IEmbedder>,
    cache: EmbeddingCache,
}

impl EmbeddingService {
    pub fn new(provider: Arc<dyn IEmbedder>, cache_entries: u64) -> Self {
        info!(
            provider = provider.name(),
            dims = provider.dimensions(),
            cache_entries,
            "EmbeddingService initialized"
        );
        Self {
            provider,
            cache: EmbeddingCache::new(cache_entries),
        }
    }

    /// Embed `text` at `granularity`, served from the memo when possible.
    ///
    /// # Errors
    /// Provider failure, wrong dimensionality, or non-finite output.
    pub fn embed(&self, text: &str, granularity: Granularity) -> Result<Vec<f32>, EmbeddingError> {
        let key = EmbeddingCache::key(text, granularity);
        if let Some(vec) = self.cache.get(&key) {
            debug!(level = %granularity, "embedding cache hit");
            return Ok(vec);
        }

        let mut embedding = self.provider.embed(text, granularity).map_err(|e| {
            warn!(provider = self.provider.name(), error = %e, "embedder failed");
            e
        })?;
        normalize::validate_dimensions(&embedding, self.provider.dimensions())?;
        normalize::validate_finite(&embedding, self.provider.name())?;
        normalize::l2_normalize(&mut embedding);

        self.cache.insert(key, embedding.clone());
        Ok(embedding)
    }

    /// Embed one span per level, finest first.
    pub fn embed_levels(&self, spans: [&str; 5]) -> Result<EmbeddingSet, EmbeddingError> {
        let mut vectors: [Vec<f32>; 5] = Default::default();
        for (g, span) in Granularity::ALL.into_iter().zip(spans) {
            vectors[g.index()] = self.embed(span, g)?;
        }
        Ok(EmbeddingSet::new(vectors))
    }

    /// Precompute `text` at each listed level. Returns how many were newly
    /// embedded; failures are logged and skipped.
    pub fn warm(&self, text: &str, levels: &[Granularity]) -> usize {
        let mut computed = 0;
        for &g in levels {
            if self.is_cached(text, g) {
                continue;
            }
            match self.embed(text, g) {
                Ok(_) => computed += 1,
                Err(e) => warn!(level = %g, error = %e, "prefetch embedding failed"),
            }
        }
        computed
    }

    pub fn is_cached(&self, text: &str, granularity: Granularity) -> bool {
        self.cache.contains(&EmbeddingCache::key(text, granularity))
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::HashingEmbedder;

    fn service() -> EmbeddingService {
        EmbeddingService::new(Arc::new(HashingEmbedder::new(64)), 1000)
    }

    #[test]
    fn embed_returns_configured_dims() {
        let v = service().embed("test query", Granularity::Tile).unwrap();
        assert_eq!(v.len(), 64);
    }

    #[test]
    fn reports_provider_identity() {
        let svc = service();
        assert_eq!(svc.provider_name(), "hashing-tfidf");
        assert_eq!(svc.dimensions(), 64);
    }

    #[test]
    fn embed_memoizes() {
        let svc = service();
        assert!(!svc.is_cached("memo", Granularity::Block));
        let a = svc.embed("memo", Granularity::Block).unwrap();
        assert!(svc.is_cached("memo", Granularity::Block));
        let b = svc.embed("memo", Granularity::Block).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn embed_levels_fills_every_level() {
        let set = service()
            .embed_levels(["a", "a b c", "a b c d", "a b c d e", "a b c d e f"])
            .unwrap();
        assert!(set.is_uniform(64));
    }

    #[test]
    fn warm_skips_cached_levels() {
        let svc = service();
        svc.embed("warm", Granularity::Tile).unwrap();
        let computed = svc.warm("warm", &[Granularity::Tile, Granularity::Block]);
        assert_eq!(computed, 1);
    }
}
