//! Process variable conversion

use serde_json::{Map, Value};

use crate::domain::DomainError;

/// Process variables keyed by name
pub type ProcessVariables = Map<String, Value>;

/// Normalize variables supplied when starting a process.
///
/// A string holding a JSON object or array (first non-blank character `{` or
/// `[`) is read into the JSON value it encodes; every other value is kept as
/// given. A string that looks like JSON but does not parse is rejected.
pub fn convert_variables(variables: ProcessVariables) -> Result<ProcessVariables, DomainError> {
    variables
        .into_iter()
        .map(|(name, value)| {
            let value = convert_value(&name, value)?;
            Ok((name, value))
        })
        .collect()
}

fn convert_value(name: &str, value: Value) -> Result<Value, DomainError> {
    match value {
        Value::String(source) if looks_like_json(&source) => {
            serde_json::from_str(&source).map_err(|e| {
                DomainError::validation(format!(
                    "Process variable '{}' is not valid JSON: {}",
                    name, e
                ))
            })
        }
        other => Ok(other),
    }
}

fn looks_like_json(source: &str) -> bool {
    matches!(source.trim_start().chars().next(), Some('{') | Some('['))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn variables(value: Value) -> ProcessVariables {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {}", other),
        }
    }

    #[test]
    fn test_json_strings_are_read_as_values() {
        let converted = convert_variables(variables(json!({
            "customer": "{\"name\": \"Ada\", \"tier\": 2}",
            "items": " [1, 2, 3]",
        })))
        .unwrap();

        assert_eq!(converted["customer"], json!({"name": "Ada", "tier": 2}));
        assert_eq!(converted["items"], json!([1, 2, 3]));
    }

    #[test]
    fn test_other_values_are_kept() {
        let converted = convert_variables(variables(json!({
            "approved": true,
            "amount": 12.5,
            "comment": "looks good",
            "quoted": "\"text\"",
            "nested": {"a": 1},
        })))
        .unwrap();

        assert_eq!(converted["approved"], json!(true));
        assert_eq!(converted["amount"], json!(12.5));
        assert_eq!(converted["comment"], json!("looks good"));
        assert_eq!(converted["quoted"], json!("\"text\""));
        assert_eq!(converted["nested"], json!({"a": 1}));
    }

    #[test]
    fn test_keeps_variable_order() {
        let converted =
            convert_variables(variables(json!({"b": "[]", "a": 1, "c": "{}"}))).unwrap();
        let names: Vec<&String> = converted.keys().collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_malformed_json_string_is_rejected() {
        let err = convert_variables(variables(json!({"customer": "{\"name\": "}))).unwrap_err();

        match err {
            DomainError::Validation { message } => {
                assert!(message.starts_with("Process variable 'customer' is not valid JSON"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
