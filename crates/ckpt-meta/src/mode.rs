use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How the override JSON combines with the host-provided inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataMode {
    /// The override JSON is the whole header.
    #[default]
    Replace,
    /// Prompt and extra info form the base; the override JSON wins collisions.
    MergeMinimal,
}

impl FromStr for MetadataMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "replace" => Ok(MetadataMode::Replace),
            "merge_minimal" | "merge" => Ok(MetadataMode::MergeMinimal),
            _ => Err(Error::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for MetadataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataMode::Replace => write!(f, "replace"),
            MetadataMode::MergeMinimal => write!(f, "merge_minimal"),
        }
    }
}
