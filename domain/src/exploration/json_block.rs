//! Locating the JSON object inside a model response.

use serde_json::Value;

/// Extract a JSON object from model response text.
///
/// Supports three formats, tried in order:
/// 1. The entire response is a JSON object
/// 2. A ` ```json ` (or bare ` ``` `) fenced block containing one
/// 3. The outermost `{ ... }` span of the text
pub fn extract_json_object(response: &str) -> Option<Value> {
    let trimmed = response.trim();
    if let Some(value) = parse_object(trimmed) {
        return Some(value);
    }

    let mut in_block = false;
    let mut current = String::new();
    for line in trimmed.lines() {
        let marker = line.trim();
        if !in_block && (marker == "```json" || marker == "```") {
            in_block = true;
            current.clear();
        } else if in_block && marker == "```" {
            in_block = false;
            if let Some(value) = parse_object(&current) {
                return Some(value);
            }
        } else if in_block {
            current.push_str(line);
            current.push('\n');
        }
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_object(&trimmed[start..=end])
}

fn parse_object(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_object)
}

/// Non-empty trimmed string of a JSON value (numbers are stringified).
pub(crate) fn non_empty_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First non-empty string among `keys` of a JSON object.
pub(crate) fn first_string(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find_map(non_empty_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_json() {
        let value = extract_json_object(r#"{"goal": "x"}"#).unwrap();
        assert_eq!(value["goal"], "x");
    }

    #[test]
    fn test_fenced_json() {
        let response = "Here you go:\n```json\n{\"goal\": \"x\"}\n```\nDone.";
        assert_eq!(extract_json_object(response).unwrap()["goal"], "x");
    }

    #[test]
    fn test_embedded_object() {
        let response = "Sure! {\"goal\": \"x\", \"tasks\": []} hope that helps";
        assert_eq!(extract_json_object(response).unwrap()["goal"], "x");
    }

    #[test]
    fn test_rejects_arrays_and_prose() {
        assert!(extract_json_object("[1, 2]").is_none());
        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("} backwards {").is_none());
    }
}
