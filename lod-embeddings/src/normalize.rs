//! Vector hygiene applied to every embedding before it is stored or compared.

use lod_core::errors::EmbeddingError;

/// Validate that an embedding has the expected dimensions.
///
/// # Errors
/// Returns `DimensionMismatch` if dimensions don't match.
pub fn validate_dimensions(embedding: &[f32], expected: usize) -> Result<(), EmbeddingError> {
    if embedding.len() != expected {
        return Err(EmbeddingError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        });
    }
    Ok(())
}

/// Reject NaN or infinite components.
pub fn validate_finite(embedding: &[f32], provider: &str) -> Result<(), EmbeddingError> {
    if embedding.iter().all(|x| x.is_finite()) {
        Ok(())
    } else {
        Err(EmbeddingError::NonFinite {
            provider: provider.to_string(),
        })
    }
}

/// Scale to unit length in place. Zero vectors are left as zero.
pub fn l2_normalize(embedding: &mut [f32]) {
    let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for v in embedding.iter_mut() {
            *v /= norm;
        }
    }
}
