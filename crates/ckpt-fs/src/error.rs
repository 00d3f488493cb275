//! Error types for ckpt-fs

use std::path::PathBuf;

/// Result type for ckpt-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving an output path
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid filename prefix {prefix:?}: {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No free counter for {stem:?} in {directory}: counters stop at {max}")]
    CounterExhausted {
        directory: PathBuf,
        stem: String,
        max: u32,
    },

    #[error("Invalid filename mode: {mode}")]
    InvalidMode { mode: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_prefix(prefix: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPrefix {
            prefix: prefix.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error came from the filesystem rather than the caller's input.
    ///
    /// Counter exhaustion counts as a filesystem condition: the directory is
    /// full of numbered artifacts, the prefix itself is fine.
    pub fn is_filesystem(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::CounterExhausted { .. })
    }
}
