use crate::errors::EmbeddingError;
use crate::granularity::Granularity;

/// External embedding collaborator.
///
/// Must be deterministic for identical input within a process lifetime;
/// results are memoized on that assumption.
pub trait IEmbedder: Send + Sync {
    /// Embed a text that was cut to `granularity`'s span.
    fn embed(&self, text: &str, granularity: Granularity) -> Result<Vec<f32>, EmbeddingError>;

    /// The dimensionality of vectors produced by this embedder.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
