//! Filename prefix parsing
//!
//! A prefix such as `checkpoints/MyModel` names a subfolder of the output
//! directory (`checkpoints`) and a filename stem (`MyModel`).

use crate::{Error, Result};

/// A validated filename prefix split into subfolder and stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SavePrefix {
    subfolder: Option<String>,
    stem: String,
}

impl SavePrefix {
    /// Parse a caller-supplied prefix.
    ///
    /// Both `/` and `\` separate subfolders. The prefix must stay inside the
    /// output directory: absolute prefixes and `..` components that climb
    /// above it are rejected.
    pub fn parse(prefix: &str) -> Result<Self> {
        if prefix.is_empty() {
            return Err(Error::invalid_prefix(prefix, "prefix is empty"));
        }

        let unified = prefix.replace('\\', "/");
        if unified.starts_with('/') || has_drive_letter(&unified) {
            return Err(Error::invalid_prefix(
                prefix,
                "absolute prefixes are not allowed",
            ));
        }

        let (folder, stem) = match unified.rfind('/') {
            Some(idx) => (&unified[..idx], &unified[idx + 1..]),
            None => ("", unified.as_str()),
        };

        if stem.is_empty() {
            return Err(Error::invalid_prefix(prefix, "prefix has no filename stem"));
        }
        if stem == "." || stem == ".." {
            return Err(Error::invalid_prefix(
                prefix,
                "filename stem cannot be a directory marker",
            ));
        }

        let mut parts: Vec<&str> = Vec::new();
        for component in folder.split('/') {
            match component {
                "" | "." => {}
                ".." => {
                    if parts.pop().is_none() {
                        return Err(Error::invalid_prefix(
                            prefix,
                            "prefix escapes the output directory",
                        ));
                    }
                }
                other => parts.push(other),
            }
        }

        let subfolder = if parts.is_empty() {
            None
        } else {
            Some(parts.join("/"))
        };

        Ok(Self {
            subfolder,
            stem: stem.to_string(),
        })
    }

    /// Subfolder below the output directory, if any.
    pub fn subfolder(&self) -> Option<&str> {
        self.subfolder.as_deref()
    }

    /// Subfolder components in order, empty when there is no subfolder.
    pub fn subfolder_components(&self) -> impl Iterator<Item = &str> {
        self.subfolder.as_deref().into_iter().flat_map(|s| s.split('/'))
    }

    /// Filename stem, without extension or counter suffix.
    pub fn stem(&self) -> &str {
        &self.stem
    }
}

fn has_drive_letter(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
