//! Output path resolution
//!
//! Two policies, selected per call by [`FilenameMode`]:
//!
//! - `SmartCounter` uses `{prefix}.{ext}` while it is free, then moves on to
//!   `{prefix}_{counter:05}_.{ext}`. Counters only go up: the search starts
//!   past both the caller's hint and the highest counter already on disk,
//!   so gaps left by deleted numbered files are skipped, never refilled.
//! - `NoCounterOverwrite` always returns `{prefix}.{ext}`; an existing file
//!   there will be replaced by the writer.
//!
//! The output directory is used exactly as given. Only the prefix is
//! parsed and cleaned; the directory is never rewritten as text, so
//! symlinks, `..` and platform-specific forms resolve the way the OS
//! resolves them for the writer.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::counter::{self, MAX_COUNTER};
use crate::{Error, Result, SavePrefix, io};

/// Extension used for checkpoint artifacts.
pub const CHECKPOINT_EXTENSION: &str = "safetensors";

/// Filename policy for a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilenameMode {
    /// Unsuffixed name when free, otherwise the next numbered name.
    #[default]
    SmartCounter,
    /// Always the unsuffixed name, replacing whatever is there.
    NoCounterOverwrite,
}

impl FromStr for FilenameMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "smart_counter" | "counter" => Ok(FilenameMode::SmartCounter),
            "no_counter_overwrite" | "overwrite" => Ok(FilenameMode::NoCounterOverwrite),
            _ => Err(Error::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for FilenameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilenameMode::SmartCounter => write!(f, "smart_counter"),
            FilenameMode::NoCounterOverwrite => write!(f, "no_counter_overwrite"),
        }
    }
}

/// The outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Full path of the artifact to write.
    pub path: PathBuf,
    /// Directory the artifact lives in (output directory plus subfolder).
    pub directory: PathBuf,
    /// Counter embedded in the filename, `None` for the unsuffixed name.
    pub counter: Option<u32>,
    /// Whether a file already exists at `path`. Only ever true for
    /// `NoCounterOverwrite`.
    pub replaces_existing: bool,
}

/// Resolves output paths for a fixed artifact extension.
#[derive(Debug, Clone)]
pub struct PathResolver {
    extension: String,
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::with_extension(CHECKPOINT_EXTENSION)
    }
}

impl PathResolver {
    /// Create a resolver for `.safetensors` artifacts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver for a different artifact extension.
    pub fn with_extension(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Decide the path to write for `prefix` under `directory`.
    ///
    /// Only existence checks and (on a `SmartCounter` collision) one
    /// directory listing are performed. Calling this twice without creating
    /// the returned file yields the same path.
    pub fn resolve(
        &self,
        directory: impl AsRef<Path>,
        prefix: &str,
        mode: FilenameMode,
        hint: Option<u32>,
    ) -> Result<ResolvedPath> {
        let prefix = SavePrefix::parse(prefix)?;
        let full_dir = prefix
            .subfolder_components()
            .fold(directory.as_ref().to_path_buf(), |dir, component| {
                dir.join(component)
            });
        let unsuffixed = full_dir.join(format!("{}.{}", prefix.stem(), self.extension));

        match mode {
            FilenameMode::NoCounterOverwrite => {
                let replaces_existing = io::exists(&unsuffixed)?;
                if replaces_existing {
                    tracing::warn!(
                        path = %unsuffixed.display(),
                        "Existing artifact will be overwritten"
                    );
                }
                Ok(ResolvedPath {
                    path: unsuffixed,
                    directory: full_dir,
                    counter: None,
                    replaces_existing,
                })
            }
            FilenameMode::SmartCounter => {
                if !io::exists(&unsuffixed)? {
                    tracing::debug!(
                        path = %unsuffixed.display(),
                        "Using unsuffixed artifact path"
                    );
                    return Ok(ResolvedPath {
                        path: unsuffixed,
                        directory: full_dir,
                        counter: None,
                        replaces_existing: false,
                    });
                }
                self.next_numbered(full_dir, prefix.stem(), hint)
            }
        }
    }

    fn next_numbered(
        &self,
        directory: PathBuf,
        stem: &str,
        hint: Option<u32>,
    ) -> Result<ResolvedPath> {
        let from_hint = hint.unwrap_or(0).saturating_add(1);
        let from_disk = counter::highest_on_disk(&directory, stem, &self.extension)?
            .map_or(1, |n| n.saturating_add(1));
        let mut next = from_hint.max(from_disk);

        loop {
            if next > MAX_COUNTER {
                return Err(Error::CounterExhausted {
                    directory,
                    stem: stem.to_string(),
                    max: MAX_COUNTER,
                });
            }
            let candidate = directory.join(counter::suffixed_name(stem, next, &self.extension));
            if !io::exists(&candidate)? {
                tracing::debug!(
                    path = %candidate.display(),
                    counter = next,
                    hint = ?hint,
                    "Using numbered artifact path"
                );
                return Ok(ResolvedPath {
                    path: candidate,
                    directory,
                    counter: Some(next),
                    replaces_existing: false,
                });
            }
            next += 1;
        }
    }
}

/// Resolve a `.safetensors` output path with the default resolver.
pub fn resolve(
    directory: impl AsRef<Path>,
    prefix: &str,
    mode: FilenameMode,
    hint: Option<u32>,
) -> Result<ResolvedPath> {
    PathResolver::default().resolve(directory, prefix, mode, hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("smart_counter", FilenameMode::SmartCounter)]
    #[case("Smart-Counter", FilenameMode::SmartCounter)]
    #[case("counter", FilenameMode::SmartCounter)]
    #[case("no_counter_overwrite", FilenameMode::NoCounterOverwrite)]
    #[case("overwrite", FilenameMode::NoCounterOverwrite)]
    fn test_filename_mode_from_str(#[case] input: &str, #[case] expected: FilenameMode) {
        assert_eq!(input.parse::<FilenameMode>().unwrap(), expected);
    }

    #[test]
    fn test_filename_mode_rejects_unknown() {
        let err = "sometimes".parse::<FilenameMode>().unwrap_err();
        assert!(matches!(err, Error::InvalidMode { ref mode } if mode == "sometimes"));
    }

    #[test]
    fn test_filename_mode_display_round_trips() {
        for mode in [FilenameMode::SmartCounter, FilenameMode::NoCounterOverwrite] {
            assert_eq!(mode.to_string().parse::<FilenameMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_with_extension_strips_leading_dot() {
        assert_eq!(PathResolver::with_extension(".ckpt").extension(), "ckpt");
        assert_eq!(PathResolver::new().extension(), CHECKPOINT_EXTENSION);
    }
}
