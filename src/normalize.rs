//! Raw provider output → validated canonical profile
//!
//! Providers are asked for a JSON object but occasionally wrap it in a
//! markdown code fence, which is stripped before parsing. Validation is
//! presence-only: all five canonical keys must exist, value shapes beyond
//! that are read leniently (non-string array entries are dropped). Both
//! unparsable JSON and missing keys map to `SchemaInvalid`, which the
//! orchestrator treats exactly like a provider failure.

use serde_json::Value;

use crate::error::{ReflektaError, Result};
use crate::types::Profile;

const REQUIRED_KEYS: [&str; 5] = [
    "personality_traits",
    "emotional_patterns",
    "cognitive_patterns",
    "insights",
    "growth_areas",
];

/// Parse and validate a raw provider response into a `Profile`
pub fn parse_profile(raw: &str) -> Result<Profile> {
    let stripped = strip_code_fence(raw.trim());

    let value: Value = serde_json::from_str(stripped)
        .map_err(|e| ReflektaError::SchemaInvalid(format!("not valid JSON: {e}")))?;

    let object = value
        .as_object()
        .ok_or_else(|| ReflektaError::SchemaInvalid("response is not a JSON object".to_string()))?;

    for key in REQUIRED_KEYS {
        if !object.contains_key(key) {
            return Err(ReflektaError::SchemaInvalid(format!("missing key: {key}")));
        }
    }

    Ok(Profile::new(
        string_list(&object["personality_traits"]),
        string_list(&object["emotional_patterns"]),
        string_list(&object["cognitive_patterns"]),
        string_list(&object["insights"]),
        string_list(&object["growth_areas"]),
    ))
}

/// Remove a surrounding ```json ... ``` (or bare ```) fence, if any
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop a language tag on the opening fence line
    match rest.split_once('\n') {
        Some((first_line, body)) if first_line.trim().eq_ignore_ascii_case("json") => body.trim(),
        Some((first_line, body)) if first_line.trim().is_empty() => body.trim(),
        _ => rest.trim(),
    }
}

/// Read a JSON value as a list of strings, dropping anything else
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
