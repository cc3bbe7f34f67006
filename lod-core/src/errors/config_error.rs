/// Invalid configuration or `configure` options.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    ZeroCapacity { field: String },

    #[error("hit_threshold must be within [0, 1], got {value}")]
    HitThresholdOutOfRange { value: f64 },

    #[error("invalid unit capacities: {reason}")]
    InvalidUnitCapacities { reason: String },

    #[error("{field} must be greater than zero")]
    ZeroDimension { field: String },

    #[error("embedding dimension mismatch: configured {expected}, embedder produces {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid scoring weight {field}: {value}")]
    InvalidWeight { field: String, value: f64 },

    #[error("config parse error: {message}")]
    Parse { message: String },
}
