//! Lossy feature extraction for one tile unit: pattern class, semantic
//! magnitude, text density, and an order-sensitive embedding signature.
//!
//! Every function here returns values already inside the packed field range.

use lod_core::constants::MAX_14BIT;

const LEGAL_TERMS: &[&str] = &[
    "agreement", "article", "breach", "clause", "contract", "counsel", "court", "defendant",
    "evidence", "hereby", "judge", "jurisdiction", "law", "liability", "plaintiff",
    "precedent", "section", "shall", "statute", "tort",
];

const TECHNICAL_TERMS: &[&str] = &[
    "algorithm", "api", "byte", "cache", "compile", "config", "data", "database", "error",
    "function", "kernel", "memory", "network", "process", "protocol", "query", "server",
    "system", "thread", "vector",
];

const NARRATIVE_TERMS: &[&str] = &[
    "felt", "had", "he", "her", "his", "once", "said", "saw", "she", "story", "then", "they",
    "told", "walked", "was", "were", "when",
];

/// Content category of a text slice, stored in byte 0 of a tile unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PatternClass {
    Legal = 0,
    Technical = 1,
    Narrative = 2,
    Numeric = 3,
    Mixed = 4,
}

impl PatternClass {
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Inverse of [`PatternClass::id`]. Ids outside the known range (reserved
    /// for extension) map to `None`.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Legal),
            1 => Some(Self::Technical),
            2 => Some(Self::Narrative),
            3 => Some(Self::Numeric),
            4 => Some(Self::Mixed),
            _ => None,
        }
    }
}

/// Lowercase alphanumeric tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .collect()
}

/// Argmax of keyword overlap per category. No hits, or a tie at the top,
/// yields `Mixed`.
pub fn classify(text: &str) -> PatternClass {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return PatternClass::Mixed;
    }

    let hits = |terms: &[&str]| {
        tokens
            .iter()
            .filter(|t| terms.binary_search(&t.as_str()).is_ok())
            .count()
    };
    let numeric = tokens
        .iter()
        .filter(|t| t.chars().all(|c| c.is_ascii_digit()))
        .count();

    let scores = [
        (PatternClass::Legal, hits(LEGAL_TERMS)),
        (PatternClass::Technical, hits(TECHNICAL_TERMS)),
        (PatternClass::Narrative, hits(NARRATIVE_TERMS)),
        (PatternClass::Numeric, numeric),
    ];

    let best = scores.iter().map(|(_, s)| *s).max().unwrap_or(0);
    if best == 0 {
        return PatternClass::Mixed;
    }
    let mut leaders = scores.iter().filter(|(_, s)| *s == best);
    match (leaders.next(), leaders.next()) {
        (Some((class, _)), None) => *class,
        _ => PatternClass::Mixed,
    }
}

/// Scale a `[0, 1]` statistic onto the 14-bit range.
pub fn quantize_unit(value: f64) -> u16 {
    if !value.is_finite() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * MAX_14BIT as f64).round() as u16
}

/// Mean absolute component of `slice`, zero-padded to `expected_len`.
pub fn semantic_magnitude(slice: &[f32], expected_len: usize) -> u16 {
    let len = expected_len.max(slice.len());
    if len == 0 {
        return 0;
    }
    let sum: f64 = slice
        .iter()
        .filter(|x| x.is_finite())
        .map(|x| x.abs() as f64)
        .sum();
    quantize_unit(sum / len as f64)
}

/// Share of characters that are alphanumeric. Empty text is 0.
pub fn density(text: &str) -> u16 {
    let total = text.chars().count();
    if total == 0 {
        return 0;
    }
    let dense = text.chars().filter(|c| c.is_alphanumeric()).count();
    quantize_unit(dense as f64 / total as f64)
}

/// Rolling position-weighted reduction of `slice` modulo 2^14.
///
/// Components are clamped to [-1, 1] and quantized to 8 bits first; missing
/// components up to `expected_len` count as zero.
pub fn embedding_signature(slice: &[f32], expected_len: usize) -> u16 {
    let len = expected_len.max(slice.len());
    let modulus = MAX_14BIT as u32 + 1;
    let mut acc: u32 = 0;
    for i in 0..len {
        let x = slice.get(i).copied().filter(|x| x.is_finite()).unwrap_or(0.0);
        let q = ((x.clamp(-1.0, 1.0) + 1.0) * 127.5).round() as u32;
        acc = (acc * 31 + q * (i as u32 % modulus + 1)) % modulus;
    }
    acc as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_lists_are_sorted_for_binary_search() {
        for list in [LEGAL_TERMS, TECHNICAL_TERMS, NARRATIVE_TERMS] {
            let mut sorted = list.to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, list);
        }
    }

    #[test]
    fn classifies_by_keyword_overlap() {
        assert_eq!(
            classify("The plaintiff signed the contract in court"),
            PatternClass::Legal
        );
        assert_eq!(
            classify("the server cache evicts memory under load"),
            PatternClass::Technical
        );
        assert_eq!(classify("she said it was late"), PatternClass::Narrative);
        assert_eq!(classify("42 17 2024 and 9"), PatternClass::Numeric);
    }

    #[test]
    fn empty_or_tied_is_mixed() {
        assert_eq!(classify(""), PatternClass::Mixed);
        assert_eq!(classify("colorless green ideas"), PatternClass::Mixed);
        assert_eq!(classify("contract server"), PatternClass::Mixed);
    }

    #[test]
    fn class_id_round_trips() {
        for id in 0..5u8 {
            assert_eq!(PatternClass::from_id(id).unwrap().id(), id);
        }
        assert!(PatternClass::from_id(99).is_none());
    }

    #[test]
    fn magnitude_pads_short_slices() {
        let full = semantic_magnitude(&[0.5, 0.5], 2);
        let padded = semantic_magnitude(&[0.5, 0.5], 4);
        assert_eq!(full, quantize_unit(0.5));
        assert_eq!(padded, quantize_unit(0.25));
        assert_eq!(semantic_magnitude(&[], 0), 0);
    }

    #[test]
    fn density_handles_empty_text() {
        assert_eq!(density(""), 0);
        assert_eq!(density("abc"), MAX_14BIT);
        assert!(density("a b") < MAX_14BIT);
    }

    #[test]
    fn signature_is_order_sensitive() {
        let a = embedding_signature(&[0.1, 0.9, -0.3], 3);
        let b = embedding_signature(&[0.9, 0.1, -0.3], 3);
        assert_ne!(a, b);
        assert!(a <= MAX_14BIT && b <= MAX_14BIT);
    }

    #[test]
    fn non_finite_components_are_ignored() {
        assert_eq!(
            semantic_magnitude(&[f32::NAN, 0.5], 2),
            semantic_magnitude(&[0.0, 0.5], 2)
        );
        assert_eq!(
            embedding_signature(&[f32::INFINITY], 1),
            embedding_signature(&[0.0], 1)
        );
    }
}
