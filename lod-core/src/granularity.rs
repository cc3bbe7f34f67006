use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_UNIT_CAPACITIES;
use crate::errors::ConfigError;

/// One of the five detail resolutions a text is compressed at, finest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Glyph,
    #[default]
    Tile,
    Block,
    Section,
    Document,
}

impl Granularity {
    /// All levels in ascending (finest → coarsest) order.
    pub const ALL: [Granularity; 5] = [
        Granularity::Glyph,
        Granularity::Tile,
        Granularity::Block,
        Granularity::Section,
        Granularity::Document,
    ];

    /// Position of this level in [`Granularity::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Default number of 7-byte tile units this level may hold.
    pub fn default_unit_capacity(self) -> usize {
        DEFAULT_UNIT_CAPACITIES[self.index()]
    }

    /// Nominal text span in words. `None` means "first character" for
    /// `Glyph` and "everything" for `Document`.
    pub fn word_span(self) -> Option<usize> {
        match self {
            Granularity::Glyph | Granularity::Document => None,
            Granularity::Tile => Some(3),
            Granularity::Block => Some(15),
            Granularity::Section => Some(75),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Glyph => "glyph",
            Granularity::Tile => "tile",
            Granularity::Block => "block",
            Granularity::Section => "section",
            Granularity::Document => "document",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "glyph" => Ok(Granularity::Glyph),
            "tile" => Ok(Granularity::Tile),
            "block" => Ok(Granularity::Block),
            "section" => Ok(Granularity::Section),
            "document" => Ok(Granularity::Document),
            other => Err(ConfigError::Parse {
                message: format!("unknown granularity '{other}'"),
            }),
        }
    }
}
