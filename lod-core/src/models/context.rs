use serde::{Deserialize, Serialize};

/// Structured search metadata that may accompany an ingest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchMetadata {
    pub document_type: Option<String>,
    pub case_id: Option<String>,
    pub tags: Vec<String>,
}

/// Recognized context fields for an ingest. Unknown fields are rejected at
/// deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestContext {
    pub session_id: Option<String>,
    pub query_context: Option<String>,
    pub search_metadata: Option<SearchMetadata>,
}

impl IngestContext {
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_query_context(mut self, query_context: impl Into<String>) -> Self {
        self.query_context = Some(query_context.into());
        self
    }

    pub fn with_search_metadata(mut self, metadata: SearchMetadata) -> Self {
        self.search_metadata = Some(metadata);
        self
    }

    /// A query or session context was supplied.
    pub fn has_context(&self) -> bool {
        self.session_id.is_some() || self.query_context.is_some()
    }

    pub fn is_session_bound(&self) -> bool {
        self.session_id.is_some()
    }

    pub fn has_search_metadata(&self) -> bool {
        self.search_metadata.is_some()
    }
}

/// Input to `ingest`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestRequest {
    pub text: String,
    pub context: IngestContext,
}

impl IngestRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: IngestContext::default(),
        }
    }

    pub fn with_context(mut self, context: IngestContext) -> Self {
        self.context = context;
        self
    }
}
