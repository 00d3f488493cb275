//! Prompt selection for the header's `prompt` key

use serde_json::Value;

use crate::coerce::to_header_json;

/// Pick the prompt text to embed, if any.
///
/// A non-blank `prompt_override` wins over the host-provided prompt blob.
/// Override text that parses as JSON is treated as that JSON value, so a
/// pasted workflow graph is stored in the same form as other header values.
/// Text that does not parse is used verbatim after trimming. String prompts are trimmed and a blank
/// result means "no prompt".
pub fn effective_prompt(prompt_override: Option<&str>, host_prompt: Option<&Value>) -> Option<String> {
    match prompt_override.filter(|text| !text.trim().is_empty()) {
        Some(text) => match serde_json::from_str::<Value>(text) {
            Ok(parsed) => serialize_prompt(&parsed),
            Err(_) => non_blank(text),
        },
        None => host_prompt.and_then(serialize_prompt),
    }
}

fn serialize_prompt(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => non_blank(text),
        other => Some(to_header_json(other)),
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_override_is_trimmed() {
        assert_eq!(
            effective_prompt(Some("  a cat on a mat \n"), None).as_deref(),
            Some("a cat on a mat")
        );
    }

    #[test]
    fn json_override_is_reformatted() {
        let prompt = effective_prompt(Some("{ \"3\": { \"class_type\": \"KSampler\" } }"), None);
        assert_eq!(prompt.as_deref(), Some(r#"{"3": {"class_type": "KSampler"}}"#));
    }

    #[test]
    fn json_string_override_is_unquoted() {
        assert_eq!(effective_prompt(Some("\" hi \""), None).as_deref(), Some("hi"));
    }

    #[test]
    fn override_wins_over_host_prompt() {
        let host = json!({"1": {"inputs": {}}});
        assert_eq!(
            effective_prompt(Some("mine"), Some(&host)).as_deref(),
            Some("mine")
        );
    }

    #[test]
    fn blank_override_falls_back_to_host_prompt() {
        let host = json!({"1": {"class_type": "CheckpointLoader"}});
        assert_eq!(
            effective_prompt(Some("   "), Some(&host)).as_deref(),
            Some(r#"{"1": {"class_type": "CheckpointLoader"}}"#)
        );
        assert_eq!(
            effective_prompt(None, Some(&json!(" text prompt "))).as_deref(),
            Some("text prompt")
        );
    }

    #[test]
    fn null_and_blank_values_mean_no_prompt() {
        assert_eq!(effective_prompt(None, None), None);
        assert_eq!(effective_prompt(None, Some(&Value::Null)), None);
        assert_eq!(effective_prompt(None, Some(&json!("  "))), None);
        assert_eq!(effective_prompt(Some("null"), Some(&json!("host"))), None);
    }
}
