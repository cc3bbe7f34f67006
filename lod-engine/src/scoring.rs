//! Prediction confidence and retrieval priority heuristics.
//!
//! Both are weighted sums of bounded signals, clamped to `[0, 1]` by
//! [`Score`]. Each is monotonic in its signals: richer context, longer text,
//! or more domain vocabulary never lowers a score.

use lod_core::config::ScoringConfig;
use lod_core::{IngestContext, Score};

/// Recency signal of a freshly built entry.
const NEW_ENTRY_RECENCY: f64 = 1.0;

/// `length_weight·min(chars/length_norm, 1) + context_weight·ctx + metadata_weight·meta`.
pub fn prediction_confidence(text: &str, context: &IngestContext, config: &ScoringConfig) -> Score {
    let length = length_signal(text, config.length_norm);
    let richness = if context.has_context() {
        config.context_present
    } else {
        config.context_absent
    };
    let metadata = if context.has_search_metadata() {
        config.metadata_present
    } else {
        config.metadata_absent
    };
    Score::new(
        config.length_weight * length
            + config.context_weight * richness
            + config.metadata_weight * metadata,
    )
}

/// `recency_weight·1 + session_weight·session + domain_weight·domain_hit`.
pub fn retrieval_priority(text: &str, context: &IngestContext, config: &ScoringConfig) -> Score {
    let session = if context.is_session_bound() {
        config.session_bound
    } else {
        config.session_unbound
    };
    let domain = if has_domain_keyword(text, &config.domain_keywords) {
        1.0
    } else {
        0.0
    };
    Score::new(
        config.recency_weight * NEW_ENTRY_RECENCY
            + config.session_weight * session
            + config.domain_weight * domain,
    )
}

fn length_signal(text: &str, length_norm: f64) -> f64 {
    if length_norm <= 0.0 {
        return 1.0;
    }
    (text.chars().count() as f64 / length_norm).min(1.0)
}

/// Whether any whitespace/punctuation-delimited word matches a keyword,
/// ignoring case.
pub fn has_domain_keyword(text: &str, keywords: &[String]) -> bool {
    if keywords.is_empty() {
        return false;
    }
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .any(|word| keywords.iter().any(|k| k.eq_ignore_ascii_case(word)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lod_core::SearchMetadata;

    fn rich_context() -> IngestContext {
        IngestContext::default()
            .with_session("s-1")
            .with_search_metadata(SearchMetadata {
                document_type: Some("brief".to_string()),
                ..Default::default()
            })
    }

    #[test]
    fn bare_empty_text_has_minimal_confidence() {
        let c = prediction_confidence("", &IngestContext::default(), &ScoringConfig::default());
        // 0.3·0 + 0.4·0.5 + 0.3·0.6
        assert!((c.value() - 0.38).abs() < 1e-9);
    }

    #[test]
    fn long_text_with_full_context_crosses_default_threshold() {
        let text = "a".repeat(1000);
        let c = prediction_confidence(&text, &rich_context(), &ScoringConfig::default());
        assert!((c.value() - 0.89).abs() < 1e-9);
        assert!(c.value() > 0.8);
    }

    #[test]
    fn confidence_is_monotonic_in_length() {
        let cfg = ScoringConfig::default();
        let ctx = IngestContext::default();
        let short = prediction_confidence("short", &ctx, &cfg);
        let long = prediction_confidence(&"word ".repeat(300), &ctx, &cfg);
        assert!(long > short);
    }

    #[test]
    fn priority_rewards_session_and_domain() {
        let cfg = ScoringConfig::default();
        let plain = retrieval_priority("weather report", &IngestContext::default(), &cfg);
        let bound = retrieval_priority(
            "the Court ruled on the contract",
            &IngestContext::default().with_session("s"),
            &cfg,
        );
        // 0.4 + 0.3·0.5 + 0
        assert!((plain.value() - 0.55).abs() < 1e-9);
        // 0.4 + 0.3·0.8 + 0.3
        assert!((bound.value() - 0.94).abs() < 1e-9);
    }

    #[test]
    fn keyword_match_is_whole_word() {
        let keywords = vec!["court".to_string()];
        assert!(has_domain_keyword("Supreme COURT.", &keywords));
        assert!(!has_domain_keyword("courtyard", &keywords));
        assert!(!has_domain_keyword("court", &[]));
    }

    #[test]
    fn oversized_weights_are_clamped() {
        let cfg = ScoringConfig {
            length_weight: 5.0,
            ..ScoringConfig::default()
        };
        let c = prediction_confidence(&"x".repeat(2000), &rich_context(), &cfg);
        assert_eq!(c.value(), 1.0);
    }
}
