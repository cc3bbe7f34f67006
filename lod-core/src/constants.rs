/// LOD cache version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Size of one packed tile unit in bytes.
pub const TILE_UNIT_BYTES: usize = 7;

/// Largest value a single 7-bit field can hold.
pub const MAX_7BIT: u8 = 0x7F;

/// Largest value a 14-bit field (two 7-bit bytes) can hold.
pub const MAX_14BIT: u16 = 0x3FFF;

/// Number of granularity levels.
pub const LEVEL_COUNT: usize = 5;

/// Default unit capacity per level, finest first.
pub const DEFAULT_UNIT_CAPACITIES: [usize; LEVEL_COUNT] = [1, 1, 5, 25, 125];
