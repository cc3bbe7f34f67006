use lod_core::constants::{MAX_14BIT, MAX_7BIT, TILE_UNIT_BYTES};

use crate::features;

/// Split a 14-bit value into two 7-bit bytes, big-endian. Values above
/// 16383 are clamped first.
pub fn pack14(value: u16) -> (u8, u8) {
    let v = value.min(MAX_14BIT);
    (((v >> 7) as u8) & MAX_7BIT, (v as u8) & MAX_7BIT)
}

/// Exact inverse of [`pack14`].
pub fn unpack14(hi: u8, lo: u8) -> u16 {
    (((hi & MAX_7BIT) as u16) << 7) | (lo & MAX_7BIT) as u16
}

/// One 7-byte packed feature record. Every byte holds a 7-bit value.
///
/// Layout: `[class, magnitude_hi, magnitude_lo, density_hi, density_lo,
/// signature_hi, signature_lo]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileUnit([u8; TILE_UNIT_BYTES]);

impl TileUnit {
    /// Wrap raw bytes, masking each to 7 bits.
    pub fn from_bytes(bytes: [u8; TILE_UNIT_BYTES]) -> Self {
        Self(bytes.map(|b| b & MAX_7BIT))
    }

    pub fn as_bytes(&self) -> &[u8; TILE_UNIT_BYTES] {
        &self.0
    }

    /// Decode all units in a level buffer. A trailing partial unit is ignored.
    pub fn split_level(bytes: &[u8]) -> Vec<TileUnit> {
        bytes
            .chunks_exact(TILE_UNIT_BYTES)
            .map(|chunk| {
                let mut raw = [0u8; TILE_UNIT_BYTES];
                raw.copy_from_slice(chunk);
                TileUnit::from_bytes(raw)
            })
            .collect()
    }
}

/// Quantized feature values of a tile unit, as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnpackedUnit {
    pub pattern_class: u8,
    pub semantic_magnitude: u16,
    pub density: u16,
    pub embedding_signature: u16,
}

impl UnpackedUnit {
    /// Pack already-quantized fields. Out-of-range fields are clamped.
    pub fn pack(&self) -> TileUnit {
        let (mag_hi, mag_lo) = pack14(self.semantic_magnitude);
        let (den_hi, den_lo) = pack14(self.density);
        let (sig_hi, sig_lo) = pack14(self.embedding_signature);
        TileUnit([
            self.pattern_class.min(MAX_7BIT),
            mag_hi,
            mag_lo,
            den_hi,
            den_lo,
            sig_hi,
            sig_lo,
        ])
    }

    /// Exact inverse of [`UnpackedUnit::pack`] for in-range fields.
    pub fn unpack(unit: &TileUnit) -> Self {
        let b = unit.as_bytes();
        Self {
            pattern_class: b[0] & MAX_7BIT,
            semantic_magnitude: unpack14(b[1], b[2]),
            density: unpack14(b[3], b[4]),
            embedding_signature: unpack14(b[5], b[6]),
        }
    }
}

/// Builds tile units from a text slice and an embedding chunk.
#[derive(Debug, Clone, Copy)]
pub struct FeaturePacker {
    chunk_dims: usize,
}

impl FeaturePacker {
    /// `chunk_dims` is the expected embedding slice length; shorter slices
    /// are zero-padded.
    pub fn new(chunk_dims: usize) -> Self {
        Self { chunk_dims }
    }

    pub fn chunk_dims(&self) -> usize {
        self.chunk_dims
    }

    /// Extract and quantize features. Pure; never panics on empty input.
    pub fn pack_unit(&self, text: &str, embedding: &[f32]) -> TileUnit {
        UnpackedUnit {
            pattern_class: features::classify(text).id(),
            semantic_magnitude: features::semantic_magnitude(embedding, self.chunk_dims),
            density: features::density(text),
            embedding_signature: features::embedding_signature(embedding, self.chunk_dims),
        }
        .pack()
    }

    pub fn unpack_unit(unit: &TileUnit) -> UnpackedUnit {
        UnpackedUnit::unpack(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::PatternClass;

    #[test]
    fn pack14_splits_big_endian() {
        assert_eq!(pack14(0), (0, 0));
        assert_eq!(pack14(0x3FFF), (0x7F, 0x7F));
        assert_eq!(pack14(200), (1, 72));
        assert_eq!(unpack14(1, 72), 200);
    }

    #[test]
    fn pack14_clamps_overflow() {
        assert_eq!(pack14(u16::MAX), (0x7F, 0x7F));
    }

    #[test]
    fn every_byte_is_seven_bit() {
        let packer = FeaturePacker::new(4);
        let unit = packer.pack_unit("contract clause 12", &[1.0, -1.0, 0.5, 0.25]);
        assert!(unit.as_bytes().iter().all(|&b| b <= 0x7F));
    }

    #[test]
    fn empty_inputs_pack_zeroed_statistics() {
        let packer = FeaturePacker::new(4);
        let unpacked = FeaturePacker::unpack_unit(&packer.pack_unit("", &[]));
        assert_eq!(unpacked.pattern_class, PatternClass::Mixed.id());
        assert_eq!(unpacked.semantic_magnitude, 0);
        assert_eq!(unpacked.density, 0);
    }

    #[test]
    fn unpack_inverts_pack_for_in_range_fields() {
        let fields = UnpackedUnit {
            pattern_class: 3,
            semantic_magnitude: 16383,
            density: 1,
            embedding_signature: 8192,
        };
        assert_eq!(UnpackedUnit::unpack(&fields.pack()), fields);
    }

    #[test]
    fn from_bytes_masks_high_bit() {
        let unit = TileUnit::from_bytes([0xFF; 7]);
        assert!(unit.as_bytes().iter().all(|&b| b == 0x7F));
    }

    #[test]
    fn split_level_ignores_partial_unit() {
        assert_eq!(TileUnit::split_level(&[0u8; 16]).len(), 2);
    }
}
