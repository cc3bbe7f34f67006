//! Reference [`IRenderer`]: one SVG cell per tile unit.

use std::fmt::Write as _;

use lod_compression::{PatternClass, TileUnit, UnpackedUnit};
use lod_core::constants::{MAX_14BIT, TILE_UNIT_BYTES};
use lod_core::errors::RenderError;
use lod_core::traits::IRenderer;
use lod_core::{Granularity, VisualAsset};

const CELL: usize = 12;

/// Draws a level buffer as a horizontal strip. Hue encodes the pattern
/// class; opacity encodes semantic magnitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileSvgRenderer;

fn class_hue(class: u8) -> u16 {
    match PatternClass::from_id(class) {
        Some(PatternClass::Legal) => 210,
        Some(PatternClass::Technical) => 130,
        Some(PatternClass::Narrative) => 30,
        Some(PatternClass::Numeric) => 280,
        Some(PatternClass::Mixed) | None => 0,
    }
}

impl IRenderer for TileSvgRenderer {
    fn render(&self, granularity: Granularity, bytes: &[u8]) -> Result<VisualAsset, RenderError> {
        if bytes.len() % TILE_UNIT_BYTES != 0 {
            return Err(RenderError::RenderFailed {
                granularity,
                reason: format!("{} bytes is not a whole number of tile units", bytes.len()),
            });
        }
        let units = TileUnit::split_level(bytes);
        let width = units.len().max(1) * CELL;

        let mut body = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{CELL}" data-level="{granularity}">"#
        );
        for (i, unit) in units.iter().enumerate() {
            let fields = UnpackedUnit::unpack(unit);
            let opacity = f64::from(fields.semantic_magnitude) / f64::from(MAX_14BIT);
            // Writing into a String cannot fail.
            let _ = write!(
                body,
                r#"<rect x="{}" y="0" width="{CELL}" height="{CELL}" fill="hsl({},60%,50%)" fill-opacity="{:.3}"/>"#,
                i * CELL,
                class_hue(fields.pattern_class),
                opacity.max(0.05),
            );
        }
        body.push_str("</svg>");

        Ok(VisualAsset {
            granularity,
            mime_type: "image/svg+xml".to_string(),
            body,
        })
    }

    fn name(&self) -> &str {
        "tile-svg"
    }
}
