mod batch_scorer;
mod embedder;
mod renderer;

pub use batch_scorer::IBatchScorer;
pub use embedder::IEmbedder;
pub use renderer::IRenderer;
