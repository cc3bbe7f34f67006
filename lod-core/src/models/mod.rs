mod compressed;
mod context;
mod embedding_set;
mod entry;
mod retrieval;
mod score;
mod stats;
mod visual;

pub use compressed::{CompressedRepresentation, CompressionStats};
pub use context::{IngestContext, IngestRequest, SearchMetadata};
pub use embedding_set::EmbeddingSet;
pub use entry::{CacheEntry, EntryId};
pub use retrieval::{RankedResult, RankedResults, RetrieveRequest, StructuralFilter};
pub use score::Score;
pub use stats::CacheStats;
pub use visual::VisualAsset;
