//! Filesystem probes and directory preparation

use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Check whether `path` exists, surfacing probe failures.
///
/// A missing path is `Ok(false)`. Anything else that stops the probe
/// (permission denied on a parent, for instance) is an error rather than
/// a silent "does not exist".
pub fn exists(path: &Path) -> Result<bool> {
    path.try_exists().map_err(|e| Error::io(path, e))
}

/// Create `directory` and any missing parents.
///
/// Succeeds when the directory already exists.
pub fn ensure_dir(directory: &Path) -> Result<()> {
    fs::create_dir_all(directory).map_err(|e| Error::io(directory, e))
}
