use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{CacheEntry, EntryId, VisualAsset};
use crate::granularity::Granularity;

/// Caller-supplied structural predicate applied to ranked candidates.
pub type StructuralFilter = Arc<dyn Fn(&CacheEntry) -> bool + Send + Sync>;

/// Input to `retrieve`.
#[derive(Clone, Default)]
pub struct RetrieveRequest {
    pub query: String,
    pub level: Granularity,
    /// `None` uses the configured default.
    pub top_k: Option<usize>,
    pub structural_filter: Option<StructuralFilter>,
    /// Ask the renderer for a visual of each result's matched level.
    pub render: bool,
}

impl RetrieveRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn at_level(mut self, level: Granularity) -> Self {
        self.level = level;
        self
    }

    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&CacheEntry) -> bool + Send + Sync + 'static,
    {
        self.structural_filter = Some(Arc::new(filter));
        self
    }

    pub fn with_render(mut self) -> Self {
        self.render = true;
        self
    }
}

impl fmt::Debug for RetrieveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetrieveRequest")
            .field("query", &self.query)
            .field("level", &self.level)
            .field("top_k", &self.top_k)
            .field("structural_filter", &self.structural_filter.is_some())
            .field("render", &self.render)
            .finish()
    }
}

/// One ranked hit with its contextual payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub id: EntryId,
    /// Cosine similarity at the matched level.
    pub score: f64,
    pub level: Granularity,
    /// Source text truncated to the configured excerpt length.
    pub excerpt: String,
    pub retrieval_priority: f64,
    pub access_count: u64,
    pub visual: Option<VisualAsset>,
}

/// Output of `retrieve`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankedResults {
    pub results: Vec<RankedResult>,
    /// Set when at least one requested render failed.
    pub partial: bool,
}

impl RankedResults {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn ids(&self) -> Vec<&EntryId> {
        self.results.iter().map(|r| &r.id).collect()
    }
}
