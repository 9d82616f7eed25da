//! Best-effort JSON Extraction
//!
//! Recovers the JSON object embedded in a completion's text content.
//!
//! The match is greedy: it spans from the first `{` to the last `}` in the
//! content. This tolerates leading and trailing prose, but it assumes there is
//! at most one top-level object. Two separate objects, or a stray brace in the
//! surrounding prose, yield a span that does not parse; callers report that as
//! a response parse error rather than trying to repair it.

use regex::Regex;
use std::sync::LazyLock;

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("static JSON object pattern"));

/// Return the first-`{`-to-last-`}` span of `content`, if any.
pub fn extract_json_object(content: &str) -> Option<&str> {
    JSON_OBJECT.find(content).map(|m| m.as_str())
}

/// Extraction with the no-match fallback: the whole content is handed to the
/// parser so it can report a meaningful error.
pub fn extract_or_whole(content: &str) -> &str {
    extract_json_object(content).unwrap_or(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_object_from_prose() {
        let content = r#"ok here: {"options":[],"meta":{"inputSummary":"x"}} thanks"#;
        assert_eq!(
            extract_json_object(content),
            Some(r#"{"options":[],"meta":{"inputSummary":"x"}}"#)
        );
    }

    #[test]
    fn test_bare_object_unchanged() {
        let content = r#"{"a":1}"#;
        assert_eq!(extract_json_object(content), Some(content));
    }

    #[test]
    fn test_multiline_and_code_fence() {
        let content = "```json\n{\n  \"a\": {\n    \"b\": 2\n  }\n}\n```";
        assert_eq!(
            extract_json_object(content),
            Some("{\n  \"a\": {\n    \"b\": 2\n  }\n}")
        );
    }

    #[test]
    fn test_no_object() {
        assert_eq!(extract_json_object("I cannot help with that."), None);
        assert_eq!(extract_or_whole("plain"), "plain");
    }

    #[test]
    fn test_greedy_span_covers_two_objects() {
        // Documented limitation: the span does not parse as a single value.
        let content = r#"{"a":1} and {"b":2}"#;
        let span = extract_json_object(content).unwrap();
        assert_eq!(span, content);
        assert!(serde_json::from_str::<serde_json::Value>(span).is_err());
    }
}
