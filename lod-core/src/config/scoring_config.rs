use serde::{Deserialize, Serialize};

use super::defaults;

/// Weights and signal levels for prediction confidence and retrieval priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub length_weight: f64,
    pub context_weight: f64,
    pub metadata_weight: f64,
    /// Text length (chars) at which the length signal saturates.
    pub length_norm: f64,
    pub context_present: f64,
    pub context_absent: f64,
    pub metadata_present: f64,
    pub metadata_absent: f64,
    pub recency_weight: f64,
    pub session_weight: f64,
    pub domain_weight: f64,
    pub session_bound: f64,
    pub session_unbound: f64,
    /// Lowercase keywords that mark text as domain-relevant.
    pub domain_keywords: Vec<String>,
}

impl ScoringConfig {
    /// Every numeric field with its name, for validation.
    pub(crate) fn numeric_fields(&self) -> [(&'static str, f64); 13] {
        [
            ("length_weight", self.length_weight),
            ("context_weight", self.context_weight),
            ("metadata_weight", self.metadata_weight),
            ("length_norm", self.length_norm),
            ("context_present", self.context_present),
            ("context_absent", self.context_absent),
            ("metadata_present", self.metadata_present),
            ("metadata_absent", self.metadata_absent),
            ("recency_weight", self.recency_weight),
            ("session_weight", self.session_weight),
            ("domain_weight", self.domain_weight),
            ("session_bound", self.session_bound),
            ("session_unbound", self.session_unbound),
        ]
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            length_weight: defaults::DEFAULT_LENGTH_WEIGHT,
            context_weight: defaults::DEFAULT_CONTEXT_WEIGHT,
            metadata_weight: defaults::DEFAULT_METADATA_WEIGHT,
            length_norm: defaults::DEFAULT_LENGTH_NORM,
            context_present: defaults::DEFAULT_CONTEXT_PRESENT,
            context_absent: defaults::DEFAULT_CONTEXT_ABSENT,
            metadata_present: defaults::DEFAULT_METADATA_PRESENT,
            metadata_absent: defaults::DEFAULT_METADATA_ABSENT,
            recency_weight: defaults::DEFAULT_RECENCY_WEIGHT,
            session_weight: defaults::DEFAULT_SESSION_WEIGHT,
            domain_weight: defaults::DEFAULT_DOMAIN_WEIGHT,
            session_bound: defaults::DEFAULT_SESSION_BOUND,
            session_unbound: defaults::DEFAULT_SESSION_UNBOUND,
            domain_keywords: defaults::DEFAULT_DOMAIN_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}
