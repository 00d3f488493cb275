//! The seam to whatever serializes the artifact payload

use std::path::Path;

use ckpt_meta::HeaderMap;

/// Error type returned by writers.
pub type WriterError = Box<dyn std::error::Error + Send + Sync>;

/// Writes an artifact to a resolved path with a built header.
///
/// Implementors own the payload (model weights and the like). The parent
/// directory of `path` exists when this is called; anything at `path` may be
/// replaced.
pub trait ArtifactWriter {
    fn write_artifact(
        &mut self,
        path: &Path,
        header: &HeaderMap,
    ) -> std::result::Result<(), WriterError>;
}

impl<F> ArtifactWriter for F
where
    F: FnMut(&Path, &HeaderMap) -> std::result::Result<(), WriterError>,
{
    fn write_artifact(
        &mut self,
        path: &Path,
        header: &HeaderMap,
    ) -> std::result::Result<(), WriterError> {
        self(path, header)
    }
}
