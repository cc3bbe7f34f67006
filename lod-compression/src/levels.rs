//! Text spans per granularity and the splitting helpers the compressor uses.

use lod_core::Granularity;

/// Cut `text` to at most `max_chars` characters. Returns the kept prefix and
/// whether anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}

/// Prefix of `text` ending after its `n`-th whitespace-separated word.
/// Returns everything up to the last word when there are fewer than `n`.
pub fn first_words(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    let mut count = 0;
    let mut in_word = false;
    let mut end = 0;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if in_word {
                in_word = false;
                count += 1;
                if count == n {
                    return &text[..end];
                }
            }
        } else {
            in_word = true;
            end = i + c.len_utf8();
        }
    }
    &text[..end]
}

/// The text a level is built from. Leading whitespace is skipped; shorter
/// text than the nominal span yields whatever is available.
pub fn span(text: &str, granularity: Granularity) -> &str {
    let text = text.trim_start();
    match granularity {
        Granularity::Glyph => text
            .chars()
            .next()
            .map(|c| &text[..c.len_utf8()])
            .unwrap_or(""),
        Granularity::Document => text.trim_end(),
        level => first_words(text, level.word_span().unwrap_or(usize::MAX)),
    }
}

/// Number of `chunk_dims`-wide chunks in a vector of `len` components.
/// Always at least one so every level packs a unit even for empty input.
pub fn chunk_count(len: usize, chunk_dims: usize) -> usize {
    if chunk_dims == 0 {
        return 1;
    }
    len.div_ceil(chunk_dims).max(1)
}

/// Split `span` into `parts` consecutive word groups of near-equal size.
/// Groups past the last word are empty. `parts == 1` returns the span as is.
pub fn segment(span: &str, parts: usize) -> Vec<&str> {
    if parts <= 1 {
        return vec![span];
    }
    let words: Vec<(usize, usize)> = word_bounds(span);
    let total = words.len();
    (0..parts)
        .map(|i| {
            let start = i * total / parts;
            let end = (i + 1) * total / parts;
            if start >= end {
                ""
            } else {
                &span[words[start].0..words[end - 1].1]
            }
        })
        .collect()
}

fn word_bounds(text: &str) -> Vec<(usize, usize)> {
    let mut bounds = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                bounds.push((s, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        bounds.push((s, text.len()));
    }
    bounds
}
