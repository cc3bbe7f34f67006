use serde::{Deserialize, Serialize};

use crate::granularity::Granularity;

/// Output of the optional renderer collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualAsset {
    pub granularity: Granularity,
    pub mime_type: String,
    pub body: String,
}
