use lod_compression::{FeaturePacker, HierarchicalCompressor, PatternClass, TileUnit};
use lod_core::{EmbeddingSet, Granularity};

fn set_from(f: impl Fn(usize, usize) -> f32, dims: usize) -> EmbeddingSet {
    EmbeddingSet::new(std::array::from_fn(|level| {
        (0..dims).map(|i| f(level, i)).collect()
    }))
}

fn long_text(words: usize) -> String {
    (0..words)
        .map(|i| format!("word{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Capacity bound ───────────────────────────────────────────────────────

#[test]
fn large_embeddings_are_dropped_not_wrapped() {
    // 1024 dims / 4 = 256 chunks, far beyond the document capacity of 125.
    let compressor = HierarchicalCompressor::new([1, 1, 5, 25, 125], 4);
    let set = set_from(|_, i| (i as f32 / 1024.0) - 0.5, 1024);
    let rep = compressor.compress(&long_text(2000), &set);

    assert_eq!(rep.level(Granularity::Document).len(), 875);
    assert_eq!(rep.level(Granularity::Section).len(), 175);

    // The kept units are the first chunks, in order: recompressing a
    // truncated embedding yields the same document buffer.
    let truncated = set_from(|_, i| (i as f32 / 1024.0) - 0.5, 500);
    let rep_truncated = compressor.compress(&long_text(2000), &truncated);
    assert_eq!(
        rep.level(Granularity::Document),
        rep_truncated.level(Granularity::Document)
    );
}

#[test]
fn custom_capacities_are_honored() {
    let compressor = HierarchicalCompressor::new([1, 1, 2, 3, 4], 4);
    let set = set_from(|_, _| 0.1, 384);
    let rep = compressor.compress(&long_text(300), &set);
    assert_eq!(rep.unit_count(Granularity::Block), 2);
    assert_eq!(rep.unit_count(Granularity::Section), 3);
    assert_eq!(rep.unit_count(Granularity::Document), 4);
    assert_eq!(rep.total_len(), (1 + 1 + 2 + 3 + 4) * 7);
}

// ── Feature content ──────────────────────────────────────────────────────

#[test]
fn tile_unit_carries_pattern_class_of_span() {
    let compressor = HierarchicalCompressor::default();
    let set = set_from(|_, _| 0.05, 384);
    let rep = compressor.compress("plaintiff contract court and many other words", &set);

    let tile = TileUnit::split_level(rep.level(Granularity::Tile));
    let unpacked = FeaturePacker::unpack_unit(&tile[0]);
    assert_eq!(unpacked.pattern_class, PatternClass::Legal.id());
}

#[test]
fn levels_differ_when_embeddings_differ() {
    let compressor = HierarchicalCompressor::default();
    let set = set_from(|level, i| ((level * 7 + i) % 13) as f32 / 13.0, 384);
    let rep = compressor.compress("one two three four five six", &set);
    assert_ne!(
        rep.level(Granularity::Glyph),
        rep.level(Granularity::Tile),
        "distinct embeddings should give distinct signatures"
    );
}

#[test]
fn unicode_text_does_not_panic() {
    let compressor = HierarchicalCompressor::default();
    let set = set_from(|_, _| 0.2, 384);
    let rep = compressor.compress("日本語 の テキスト 🚀 emoji ünïcödé", &set);
    assert_eq!(rep.level(Granularity::Glyph).len(), 7);
}

#[test]
fn short_embedding_is_zero_padded() {
    let compressor = HierarchicalCompressor::default();
    let set = set_from(|_, _| 0.5, 2);
    let rep = compressor.compress("tiny", &set);
    for g in Granularity::ALL {
        assert_eq!(rep.level(g).len(), 7);
    }
}
