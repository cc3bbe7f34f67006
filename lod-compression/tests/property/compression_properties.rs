use lod_compression::{pack14, unpack14, FeaturePacker, HierarchicalCompressor, UnpackedUnit};
use lod_core::{EmbeddingSet, Granularity};
use proptest::prelude::*;

fn arb_embedding_set() -> impl Strategy<Value = EmbeddingSet> {
    (0usize..600).prop_flat_map(|dims| {
        proptest::collection::vec(proptest::collection::vec(-1.0f32..1.0, dims), 5).prop_map(
            |mut vecs| {
                EmbeddingSet::new(std::array::from_fn(|i| std::mem::take(&mut vecs[i])))
            },
        )
    })
}

// ── pack14 round trip over the whole 14-bit domain ───────────────────────

#[test]
fn pack14_round_trips_every_value() {
    for v in 0u16..=0x3FFF {
        let (hi, lo) = pack14(v);
        assert!(hi <= 0x7F && lo <= 0x7F);
        assert_eq!(unpack14(hi, lo), v);
    }
}

// ── Capacity bound for all inputs ────────────────────────────────────────

proptest! {
    #[test]
    fn level_lengths_respect_capacity(text in ".{0,400}", set in arb_embedding_set()) {
        let compressor = HierarchicalCompressor::default();
        let rep = compressor.compress(&text, &set);

        prop_assert_eq!(rep.level(Granularity::Glyph).len(), 7);
        prop_assert_eq!(rep.level(Granularity::Tile).len(), 7);
        prop_assert!(rep.level(Granularity::Block).len() <= 35);
        prop_assert!(rep.level(Granularity::Section).len() <= 175);
        prop_assert!(rep.level(Granularity::Document).len() <= 875);
        for (_, bytes) in rep.iter() {
            prop_assert_eq!(bytes.len() % 7, 0);
            prop_assert!(bytes.iter().all(|&b| b <= 0x7F));
        }
    }
}

// ── Field packing is lossless ────────────────────────────────────────────

proptest! {
    #[test]
    fn unpack_inverts_pack(
        class in 0u8..128,
        magnitude in 0u16..=0x3FFF,
        density in 0u16..=0x3FFF,
        signature in 0u16..=0x3FFF,
    ) {
        let fields = UnpackedUnit {
            pattern_class: class,
            semantic_magnitude: magnitude,
            density,
            embedding_signature: signature,
        };
        prop_assert_eq!(FeaturePacker::unpack_unit(&fields.pack()), fields);
    }
}

// ── pack_unit never panics ───────────────────────────────────────────────

proptest! {
    #[test]
    fn pack_unit_accepts_any_input(
        text in ".{0,64}",
        embedding in proptest::collection::vec(any::<f32>(), 0..16),
    ) {
        let unit = FeaturePacker::new(4).pack_unit(&text, &embedding);
        prop_assert!(unit.as_bytes().iter().all(|&b| b <= 0x7F));
    }
}
