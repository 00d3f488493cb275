//! Header construction
//!
//! The override JSON always has the final say. In `MergeMinimal` mode the
//! header starts from the prompt and (optionally) the host's extra info;
//! in `Replace` mode the override JSON is all there is.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::coerce::{coerce_object, coerce_value};
use crate::{Error, MetadataMode, Result};

/// Flat header mapping. Every value is a string.
pub type HeaderMap = BTreeMap<String, String>;

/// Key under which the prompt is stored.
pub const PROMPT_KEY: &str = "prompt";

/// A built header together with the extra-info keys that went into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuiltHeader {
    /// Final header to embed.
    pub header: HeaderMap,
    /// Coerced extra-info entries copied into the base, before overrides.
    pub extra_applied: HeaderMap,
}

/// Parse the override JSON into coerced header entries.
///
/// Blank input is an empty object. Anything other than a JSON object at the
/// top level is rejected.
pub fn parse_overrides(raw_json: &str) -> Result<HeaderMap> {
    if raw_json.trim().is_empty() {
        return Ok(HeaderMap::new());
    }

    let value: Value = serde_json::from_str(raw_json).map_err(|e| Error::MetadataParse {
        message: e.to_string(),
    })?;

    match value {
        Value::Object(object) => Ok(coerce_object(&object)),
        other => Err(Error::MetadataParse {
            message: format!("expected a JSON object, found {}", json_kind(&other)),
        }),
    }
}

/// Build the header mapping.
///
/// `prompt_override` and `extra_info` only matter in `MergeMinimal` mode.
/// Extra-info entries never replace a prompt that was already set.
pub fn build(
    mode: MetadataMode,
    prompt_override: Option<&str>,
    extra_info: Option<&Map<String, Value>>,
    include_extra: bool,
    raw_json: &str,
) -> Result<HeaderMap> {
    build_header(mode, prompt_override, extra_info, include_extra, raw_json)
        .map(|built| built.header)
}

/// Like [`build`], also reporting which extra-info entries were copied.
pub fn build_header(
    mode: MetadataMode,
    prompt_override: Option<&str>,
    extra_info: Option<&Map<String, Value>>,
    include_extra: bool,
    raw_json: &str,
) -> Result<BuiltHeader> {
    let overrides = parse_overrides(raw_json)?;

    let mut built = BuiltHeader::default();
    if mode == MetadataMode::MergeMinimal {
        if let Some(prompt) = prompt_override.filter(|p| !p.trim().is_empty()) {
            built.header.insert(PROMPT_KEY.to_string(), prompt.to_string());
        }

        if include_extra {
            for (key, value) in extra_info.into_iter().flatten() {
                if built.header.contains_key(key) {
                    continue;
                }
                let value = coerce_value(value);
                built.header.insert(key.clone(), value.clone());
                built.extra_applied.insert(key.clone(), value);
            }
        }
    }

    let override_count = overrides.len();
    built.header.extend(overrides);

    tracing::debug!(
        mode = %mode,
        keys = built.header.len(),
        overrides = override_count,
        extra = built.extra_applied.len(),
        "Built checkpoint header"
    );

    Ok(built)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
