//! Error types for ckpt-meta

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The override metadata was not a JSON object.
    #[error("Invalid metadata JSON: {message}")]
    MetadataParse { message: String },

    #[error("Invalid metadata mode: {mode}")]
    InvalidMode { mode: String },
}
