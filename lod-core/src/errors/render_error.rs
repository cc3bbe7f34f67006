use crate::granularity::Granularity;

/// Failures of the optional visual renderer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("render failed at {granularity}: {reason}")]
    RenderFailed {
        granularity: Granularity,
        reason: String,
    },
}
