//! Extraction of JSON objects from raw model text.
//!
//! Model output rarely arrives as clean JSON: it comes fenced, wrapped
//! in prose, or trailed by commentary. The parser tolerates all of
//! that and reports failure as a value, never a panic.

use regex::Regex;
use serde_json::Value;

use crate::errors::ParseFailure;

/// Parses JSON objects out of completion text.
///
/// Strategy, in order: strip code fences and try a direct parse, then
/// scan for the first balanced `{...}` span and parse that. Anything
/// else is a [`ParseFailure`].
#[derive(Debug, Clone)]
pub struct ResponseParser {
    fence: Regex,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseParser {
    /// Creates a parser.
    ///
    /// # Panics
    ///
    /// Never panics in practice; the fence pattern is a fixed literal
    /// known to compile.
    #[must_use]
    pub fn new() -> Self {
        #[allow(clippy::unwrap_used)]
        let fence = Regex::new(r"```(?:json|JSON)?").unwrap();
        Self { fence }
    }

    /// Extracts a JSON object from raw model text.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFailure`] when no object can be recovered.
    pub fn parse(&self, text: &str) -> Result<Value, ParseFailure> {
        let stripped = self.fence.replace_all(text, "");
        let candidate = stripped.trim();

        if let Ok(value) = serde_json::from_str::<Value>(candidate) {
            if value.is_object() {
                return Ok(value);
            }
        }

        if let Some(span) = first_balanced_object(candidate) {
            if let Ok(value) = serde_json::from_str::<Value>(span) {
                if value.is_object() {
                    return Ok(value);
                }
            }
        }

        Err(ParseFailure::for_text(text))
    }
}

/// Finds the first balanced `{...}` span, respecting JSON string
/// literals and escape sequences.
fn first_balanced_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escaped = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_direct_parse() {
        let parser = ResponseParser::new();
        let value = parser.parse(r#"{"title": "Rust"}"#).unwrap();
        assert_eq!(value["title"], "Rust");
    }

    #[test]
    fn test_fenced_json() {
        let parser = ResponseParser::new();
        let text = "```json\n{\"title\": \"Rust\"}\n```";
        let value = parser.parse(text).unwrap();
        assert_eq!(value["title"], "Rust");
    }

    #[test]
    fn test_prose_wrapped_json() {
        let parser = ResponseParser::new();
        let text = "Here is the structure you asked for:\n{\"units\": [1, 2]}\nLet me know!";
        let value = parser.parse(text).unwrap();
        assert_eq!(value["units"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_nested_braces_in_strings() {
        let parser = ResponseParser::new();
        let text = r#"note {"message": "braces } inside { strings", "n": {"x": 1}} trailing"#;
        let value = parser.parse(text).unwrap();
        assert_eq!(value["n"]["x"], 1);
    }

    #[test]
    fn test_refusal_text_fails() {
        let parser = ResponseParser::new();
        let result = parser.parse("I cannot comply.");
        assert!(result.is_err());
    }

    #[test]
    fn test_bare_array_is_not_an_object() {
        let parser = ResponseParser::new();
        assert!(parser.parse("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_unbalanced_braces_fail() {
        let parser = ResponseParser::new();
        assert!(parser.parse(r#"{"title": "Rust""#).is_err());
    }

    #[test]
    fn test_empty_input_fails() {
        let parser = ResponseParser::new();
        let err = parser.parse("").unwrap_err();
        assert_eq!(err.length, 0);
    }
}
