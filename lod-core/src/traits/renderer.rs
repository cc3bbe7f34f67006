use crate::errors::RenderError;
use crate::granularity::Granularity;
use crate::models::VisualAsset;

/// Optional visualization collaborator. Failures never fail ingest or retrieve.
pub trait IRenderer: Send + Sync {
    fn render(&self, granularity: Granularity, bytes: &[u8]) -> Result<VisualAsset, RenderError>;

    fn name(&self) -> &str;
}
