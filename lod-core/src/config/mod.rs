pub mod cache_config;
pub mod defaults;
pub mod observability_config;
pub mod prefetch_config;
pub mod scoring_config;

pub use cache_config::CacheConfig;
pub use observability_config::ObservabilityConfig;
pub use prefetch_config::PrefetchConfig;
pub use scoring_config::ScoringConfig;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Top-level configuration, loadable from TOML. Every section falls back to
/// its defaults when omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodConfig {
    pub cache: CacheConfig,
    pub scoring: ScoringConfig,
    pub prefetch: PrefetchConfig,
    pub observability: ObservabilityConfig,
}

/// Partial runtime update accepted by `configure`. Absent fields keep their
/// current values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigureOptions {
    pub max_entries: Option<usize>,
    pub hit_threshold: Option<f64>,
    pub unit_capacities: Option<[usize; 5]>,
    pub embedding_dim: Option<usize>,
}

impl LodConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config: LodConfig = toml::from_str(source).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every cross-field rule. Called on construction and on every
    /// `configure`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cache = &self.cache;
        if cache.max_entries == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "max_entries".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&cache.hit_threshold) {
            return Err(ConfigError::HitThresholdOutOfRange {
                value: cache.hit_threshold,
            });
        }
        validate_unit_capacities(&cache.unit_capacities)?;
        if cache.embedding_dim == 0 {
            return Err(ConfigError::ZeroDimension {
                field: "embedding_dim".to_string(),
            });
        }
        if cache.chunk_dims == 0 {
            return Err(ConfigError::ZeroDimension {
                field: "chunk_dims".to_string(),
            });
        }
        if cache.max_text_len == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "max_text_len".to_string(),
            });
        }
        if self.prefetch.queue_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "prefetch.queue_capacity".to_string(),
            });
        }
        for (field, value) in self.scoring.numeric_fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    field: field.to_string(),
                    value,
                });
            }
        }
        if self.scoring.length_norm == 0.0 {
            return Err(ConfigError::InvalidWeight {
                field: "length_norm".to_string(),
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Merge `options` into a copy of this config and validate the result.
    /// `self` is untouched when validation fails.
    pub fn merged(&self, options: &ConfigureOptions) -> Result<LodConfig, ConfigError> {
        let mut next = self.clone();
        if let Some(max_entries) = options.max_entries {
            next.cache.max_entries = max_entries;
        }
        if let Some(threshold) = options.hit_threshold {
            next.cache.hit_threshold = threshold;
        }
        if let Some(capacities) = options.unit_capacities {
            next.cache.unit_capacities = capacities;
        }
        if let Some(dim) = options.embedding_dim {
            next.cache.embedding_dim = dim;
        }
        next.validate()?;
        Ok(next)
    }
}

fn validate_unit_capacities(capacities: &[usize; 5]) -> Result<(), ConfigError> {
    if capacities.iter().any(|&c| c == 0) {
        return Err(ConfigError::InvalidUnitCapacities {
            reason: "every level needs at least one unit".to_string(),
        });
    }
    if capacities[0] != 1 || capacities[1] != 1 {
        return Err(ConfigError::InvalidUnitCapacities {
            reason: "glyph and tile levels hold exactly one unit".to_string(),
        });
    }
    if capacities.windows(2).any(|w| w[1] < w[0]) {
        return Err(ConfigError::InvalidUnitCapacities {
            reason: "capacities must not shrink from finer to coarser levels".to_string(),
        });
    }
    Ok(())
}
