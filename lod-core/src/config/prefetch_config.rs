use serde::{Deserialize, Serialize};

use super::defaults;

/// Background prefetch queue configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefetchConfig {
    pub enabled: bool,
    /// Jobs beyond this many pending are dropped.
    pub queue_capacity: usize,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_PREFETCH_ENABLED,
            queue_capacity: defaults::DEFAULT_PREFETCH_QUEUE_CAPACITY,
        }
    }
}
