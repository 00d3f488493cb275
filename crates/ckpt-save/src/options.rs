//! Save options
//!
//! Mirrors the inputs a host passes to a save. Options are parsed from
//! in-memory text; nothing here reads or writes configuration files.

use serde::{Deserialize, Serialize};

use ckpt_fs::FilenameMode;
use ckpt_meta::MetadataMode;

use crate::{Error, Result};

/// Default subfolder/prefix under the output directory.
pub const DEFAULT_FILENAME_PREFIX: &str = "checkpoints/CustomMeta";

/// Text format of serialized save options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Per-save options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveOptions {
    /// Subfolder/prefix under the output directory, e.g. `checkpoints/MyModel`.
    pub filename_prefix: String,
    pub filename_mode: FilenameMode,
    /// JSON object of header keys. Non-string values are JSON-encoded.
    pub metadata_json: String,
    pub metadata_mode: MetadataMode,
    /// Merge mode only: copy the host's extra info into the header.
    #[serde(alias = "include_extra_pnginfo")]
    pub include_extra_info: bool,
    /// Replaces the host prompt when not blank. Ignored in replace mode.
    pub prompt_override: String,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            filename_mode: FilenameMode::default(),
            metadata_json: "{}".to_string(),
            metadata_mode: MetadataMode::default(),
            include_extra_info: true,
            prompt_override: String::new(),
        }
    }
}

impl SaveOptions {
    /// Parse options from text. Missing fields take their defaults.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let parsed: std::result::Result<Self, String> = match format {
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };

        parsed.map_err(|message| Error::OptionsParse {
            format: format.as_str().into(),
            message,
        })
    }
}
