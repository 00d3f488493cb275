//! Error types for ckpt-save

use std::path::PathBuf;

use crate::writer::WriterError;

/// Result type for ckpt-save operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a save
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Path resolution failed
    #[error(transparent)]
    Fs(#[from] ckpt_fs::Error),

    /// Header construction failed
    #[error(transparent)]
    Meta(#[from] ckpt_meta::Error),

    #[error("Failed to parse {format} save options: {message}")]
    OptionsParse { format: String, message: String },

    /// The external writer reported a failure
    #[error("Artifact writer failed for {path}: {source}")]
    Writer {
        path: PathBuf,
        #[source]
        source: WriterError,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
