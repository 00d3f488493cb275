//! Numbered filename suffixes
//!
//! Numbered artifacts are named `{stem}_{counter:05}_.{ext}`.

use std::path::Path;

use crate::{Error, Result};

/// Zero-padding width of the counter in suffixed filenames.
pub const COUNTER_WIDTH: usize = 5;

/// Highest counter that fits the padding width.
pub const MAX_COUNTER: u32 = 99_999;

/// Build a suffixed filename such as `model_00001_.safetensors`.
pub fn suffixed_name(stem: &str, counter: u32, extension: &str) -> String {
    format!(
        "{}_{:0width$}_.{}",
        stem,
        counter,
        extension,
        width = COUNTER_WIDTH
    )
}

/// Read the counter back out of a suffixed filename.
///
/// Returns `None` for anything that is not exactly `{stem}_{digits}_.{ext}`.
/// Digit runs too large for a `u32` read as `u32::MAX`, so such a file
/// exhausts the counter range instead of being ignored.
pub fn parse_counter(file_name: &str, stem: &str, extension: &str) -> Option<u32> {
    let rest = file_name.strip_prefix(stem)?.strip_prefix('_')?;
    let digits = rest.strip_suffix(extension)?.strip_suffix("_.")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}

/// Find the highest counter already used for `stem` in `directory`.
///
/// A directory that does not exist yet has no counters.
pub fn highest_on_disk(
    directory: &Path,
    stem: &str,
    extension: &str,
) -> Result<Option<u32>> {
    let entries = match std::fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io(directory, e)),
    };

    let mut highest = None;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(directory, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(n) = parse_counter(name, stem, extension) {
            highest = highest.max(Some(n));
        }
    }

    Ok(highest)
}
