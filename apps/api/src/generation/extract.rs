//! JSON extraction from free-text model replies.
//!
//! The scanner tracks brace depth and string state, so braces inside string
//! values and stray braces in surrounding prose do not break extraction. The
//! first balanced top-level object that parses wins; when no candidate parses,
//! the whole (fence-stripped) reply is tried as a last resort.

use serde_json::Value;

use crate::generation::repair::GenerationError;
use crate::llm_client::strip_json_fences;

/// Returns the end byte index (inclusive) of the object starting at `start`,
/// or `None` if it never closes.
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Balanced `{...}` spans in order of their opening brace.
fn candidate_spans(text: &str) -> impl Iterator<Item = &str> {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'{')
        .filter_map(move |(start, _)| balanced_end(bytes, start).map(|end| &text[start..=end]))
}

/// Extracts and parses the first JSON object embedded in a model reply.
pub fn extract_json_object(text: &str) -> Result<Value, GenerationError> {
    let mut first_error: Option<serde_json::Error> = None;

    for span in candidate_spans(text) {
        match serde_json::from_str::<Value>(span) {
            Ok(value @ Value::Object(_)) => return Ok(value),
            Ok(_) => {}
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    match serde_json::from_str::<Value>(strip_json_fences(text)) {
        Ok(value @ Value::Object(_)) => Ok(value),
        _ => match first_error {
            Some(e) => Err(GenerationError::Json(e)),
            None => Err(GenerationError::NoJson),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_object_surrounded_by_prose() {
        let reply = "Here is the data:\n{\"company\": {\"name\": \"Acme\"}}\nThanks!";
        assert_eq!(
            extract_json_object(reply).unwrap(),
            json!({"company": {"name": "Acme"}})
        );
    }

    #[test]
    fn test_no_brace_fails_deterministically() {
        let reply = "I could not find any information about that company.";
        assert!(matches!(
            extract_json_object(reply),
            Err(GenerationError::NoJson)
        ));
        assert!(matches!(
            extract_json_object(reply),
            Err(GenerationError::NoJson)
        ));
    }

    #[test]
    fn test_braces_inside_strings_do_not_confuse_scanner() {
        let reply = r#"{"overview": "uses {curly} braces and \"quotes\" }", "n": 1} trailing }"#;
        let value = extract_json_object(reply).unwrap();
        assert_eq!(value["n"], 1);
        assert_eq!(value["overview"], "uses {curly} braces and \"quotes\" }");
    }

    #[test]
    fn test_skips_unparseable_prose_braces() {
        let reply = "Note {this is not json}, result: {\"ok\": true}";
        assert_eq!(extract_json_object(reply).unwrap(), json!({"ok": true}));
    }

    #[test]
    fn test_trailing_commentary_with_braces_ignored() {
        let reply = "{\"a\": {\"b\": 2}}\n\nLet me know if you need {more}.";
        assert_eq!(extract_json_object(reply).unwrap(), json!({"a": {"b": 2}}));
    }

    #[test]
    fn test_truncated_object_reports_parse_error() {
        let reply = "{\"a\": 1, \"b\": {\"c\": }";
        assert!(matches!(
            extract_json_object(reply),
            Err(GenerationError::Json(_)) | Err(GenerationError::NoJson)
        ));
    }

    #[test]
    fn test_invalid_balanced_object_reports_json_error() {
        let reply = "{\"a\": 1,}";
        assert!(matches!(
            extract_json_object(reply),
            Err(GenerationError::Json(_))
        ));
    }

    #[test]
    fn test_fenced_reply() {
        let reply = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json_object(reply).unwrap(), json!({"a": 1}));
    }
}
