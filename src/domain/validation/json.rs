//! JSON document parsing with positioned diagnostics

use serde_json::{Map, Value};

use super::ModelValidationError;

/// Parse raw bytes as a JSON object.
///
/// Any failure is reported as a syntactic validation error holding a single
/// diagnostic that names the offending character, its 0-based character
/// offset in the document and its 1-based line and column (both counted in
/// characters).
pub fn parse_json_object(content: &[u8]) -> Result<Map<String, Value>, ModelValidationError> {
    let text = std::str::from_utf8(content).map_err(|e| {
        ModelValidationError::unparsable(format!(
            "content is not valid UTF-8 at byte offset {}",
            e.valid_up_to()
        ))
    })?;

    match first_significant_char(text) {
        Some(Location::Character { ch: '{', .. }) => {}
        found => {
            return Err(ModelValidationError::unparsable(format!(
                "A JSON object text must begin with '{{' {}",
                found.unwrap_or_else(|| end_of_input(text))
            )));
        }
    }

    serde_json::from_str::<Map<String, Value>>(text).map_err(|e| {
        let message = e.to_string();
        let message = message
            .strip_suffix(&format!(" at line {} column {}", e.line(), e.column()))
            .unwrap_or(&message);

        let location = if e.is_eof() {
            end_of_input(text)
        } else {
            locate(text, e.line(), e.column()).unwrap_or_else(|| end_of_input(text))
        };

        ModelValidationError::unparsable(format!("{} {}", message, location))
    })
}

/// Name used in diagnostics for the type of a JSON value
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "Integer",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "JSONArray",
        Value::Object(_) => "JSONObject",
    }
}

/// Where a diagnostic points in the document
#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    Character {
        ch: char,
        offset: usize,
        line: usize,
        column: usize,
    },
    EndOfInput {
        offset: usize,
        line: usize,
        column: usize,
    },
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Character {
                ch,
                offset,
                line,
                column,
            } => write!(
                f,
                "at {} [character '{}' line {} column {}]",
                offset,
                printable(*ch),
                line,
                column
            ),
            Self::EndOfInput {
                offset,
                line,
                column,
            } => write!(f, "at {} [end of input line {} column {}]", offset, line, column),
        }
    }
}

fn first_significant_char(text: &str) -> Option<Location> {
    let mut line = 1;
    let mut column = 0;

    for (offset, ch) in text.chars().enumerate() {
        if ch == '\n' {
            line += 1;
            column = 0;
            continue;
        }
        column += 1;

        if !ch.is_whitespace() && ch != '\u{feff}' {
            return Some(Location::Character {
                ch,
                offset,
                line,
                column,
            });
        }
    }

    None
}

fn end_of_input(text: &str) -> Location {
    let line = text.matches('\n').count() + 1;
    let last_line = text.rsplit('\n').next().unwrap_or_default();

    Location::EndOfInput {
        offset: text.chars().count(),
        line,
        column: last_line.chars().count() + 1,
    }
}

/// Resolve a parser position (1-based line, 1-based byte column) to the
/// character it points at
fn locate(text: &str, line: usize, byte_column: usize) -> Option<Location> {
    let line_index = line.checked_sub(1)?;
    let mut line_start = 0;
    let mut current = None;

    for (index, candidate) in text.split('\n').enumerate() {
        if index == line_index {
            current = Some(candidate);
            break;
        }
        line_start += candidate.len() + 1;
    }

    let current = current?;
    let byte = byte_column.saturating_sub(1);

    let (start, ch) = current
        .char_indices()
        .find(|(start, ch)| byte < start + ch.len_utf8())
        .or_else(|| (line_start + current.len() < text.len()).then_some((current.len(), '\n')))?;

    let column = current[..start].chars().count() + 1;
    let offset = text[..line_start + start].chars().count();

    Some(Location::Character {
        ch,
        offset,
        line,
        column,
    })
}

fn printable(ch: char) -> String {
    if ch.is_control() {
        ch.escape_default().to_string()
    } else {
        ch.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::ValidationErrorKind;

    #[test]
    fn test_parses_object() {
        let map = parse_json_object(br#"{"id": "x", "name": "y"}"#).unwrap();
        assert_eq!(map.get("id"), Some(&Value::String("x".to_string())));
    }

    #[test]
    fn test_keeps_document_key_order() {
        let map = parse_json_object(br#"{"b": 1, "a": 2}"#).unwrap();
        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_rejects_non_object_start() {
        let error = parse_json_object(b"  [1, 2]").unwrap_err();

        assert_eq!(error.kind(), ValidationErrorKind::Syntactic);
        assert_eq!(
            error.problems(),
            vec!["A JSON object text must begin with '{' at 2 [character '[' line 1 column 3]"]
        );
    }

    #[test]
    fn test_reports_line_and_column_of_malformed_json() {
        let error = parse_json_object(b"{\n  \"id\" \"x\"\n}").unwrap_err();

        assert_eq!(error.errors().len(), 1);
        let problem = &error.errors()[0].problem;
        assert_eq!(problem, "expected `:` at 9 [character '\"' line 2 column 8]");
    }

    #[test]
    fn test_column_counts_characters_not_bytes() {
        let error = parse_json_object("{\"é\": 1 x}".as_bytes()).unwrap_err();

        assert_eq!(
            error.problems(),
            vec!["expected `,` or `}` at 8 [character 'x' line 1 column 9]"]
        );
    }

    #[test]
    fn test_offset_counts_characters_across_lines() {
        let error = parse_json_object("{\"ü\": 1,\n \"ö\" 2}".as_bytes()).unwrap_err();

        assert_eq!(
            error.problems(),
            vec!["expected `:` at 14 [character '2' line 2 column 6]"]
        );
    }

    #[test]
    fn test_trailing_content_is_syntactic() {
        let error = parse_json_object(b"{} []").unwrap_err();

        assert_eq!(error.kind(), ValidationErrorKind::Syntactic);
        assert_eq!(
            error.problems(),
            vec!["trailing characters at 3 [character '[' line 1 column 4]"]
        );
    }

    #[test]
    fn test_reports_end_of_input() {
        let error = parse_json_object(b"{\"id\": ").unwrap_err();
        assert!(error.errors()[0].problem.contains("end of input"));
    }

    #[test]
    fn test_empty_content() {
        let error = parse_json_object(b"   ").unwrap_err();
        assert_eq!(error.kind(), ValidationErrorKind::Syntactic);
        assert_eq!(
            error.problems(),
            vec!["A JSON object text must begin with '{' at 3 [end of input line 1 column 4]"]
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let error = parse_json_object(&[b'{', 0xff, b'}']).unwrap_err();
        assert_eq!(
            error.problems(),
            vec!["content is not valid UTF-8 at byte offset 1"]
        );
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(json_type_name(&Value::Bool(true)), "Boolean");
        assert_eq!(json_type_name(&serde_json::json!(3)), "Integer");
        assert_eq!(json_type_name(&serde_json::json!(3.5)), "Number");
        assert_eq!(json_type_name(&serde_json::json!({})), "JSONObject");
        assert_eq!(json_type_name(&serde_json::json!([])), "JSONArray");
        assert_eq!(json_type_name(&Value::Null), "Null");
    }
}
