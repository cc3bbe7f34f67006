mod config_error;
mod embedding_error;
mod render_error;
mod store_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use render_error::RenderError;
pub use store_error::StoreError;

/// Top-level error for every public cache operation.
#[derive(Debug, thiserror::Error)]
pub enum LodError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("ingest failed: {reason}")]
    IngestFailed { reason: String },

    #[error("cache capacity exhausted")]
    CapacityExhausted,

    #[error("entry not found: {id}")]
    EntryNotFound { id: String },
}

pub type LodResult<T> = Result<T, LodError>;
