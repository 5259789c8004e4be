//! Tolerant handling of entity snapshot JSON
//!
//! Snapshots arrive as JSON text that may be empty or, in rare cases,
//! malformed. None of these helpers fail: unparseable text is treated as
//! having no displayable content.

use serde_json::Value;

/// Parse snapshot text, returning `None` for empty or malformed input
pub fn parse_snapshot(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    serde_json::from_str(text).ok()
}

/// Pretty-print snapshot text with two-space indentation
///
/// Returns `None` when the text is empty, malformed, or renders to nothing.
pub fn pretty_snapshot(text: &str) -> Option<String> {
    let value = parse_snapshot(text)?;
    serde_json::to_string_pretty(&value)
        .ok()
        .filter(|rendered| !rendered.trim().is_empty())
}

/// Whether two snapshots hold semantically equal JSON
///
/// Two empty snapshots are equal; an empty and a non-empty one are not.
/// Key order and whitespace don't matter. If either side fails to parse the
/// raw texts are compared instead.
pub fn same_snapshot(left: &str, right: &str) -> bool {
    let (left_empty, right_empty) = (left.trim().is_empty(), right.trim().is_empty());
    if left_empty || right_empty {
        return left_empty && right_empty;
    }
    match (parse_snapshot(left), parse_snapshot(right)) {
        (Some(l), Some(r)) => l == r,
        _ => left == right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snapshot() {
        assert!(parse_snapshot("").is_none());
        assert!(parse_snapshot("   ").is_none());
        assert!(parse_snapshot("{not json").is_none());
        assert_eq!(parse_snapshot("{\"a\":1}").unwrap()["a"], 1);
    }

    #[test]
    fn test_pretty_snapshot_indents() {
        let pretty = pretty_snapshot("{\"a\":1,\"b\":[true]}").unwrap();
        assert_eq!(pretty, "{\n  \"a\": 1,\n  \"b\": [\n    true\n  ]\n}");
    }

    #[test]
    fn test_pretty_snapshot_rejects_bad_input() {
        assert!(pretty_snapshot("").is_none());
        assert!(pretty_snapshot("{not json").is_none());
    }

    #[test]
    fn test_same_snapshot_ignores_formatting_and_key_order() {
        assert!(same_snapshot("{\"a\":1,\"b\":2}", "{ \"b\": 2, \"a\": 1 }"));
        assert!(!same_snapshot("{\"a\":1}", "{\"a\":2}"));
    }

    #[test]
    fn test_same_snapshot_empty_handling() {
        assert!(same_snapshot("", ""));
        assert!(!same_snapshot("", "{}"));
        assert!(!same_snapshot("{}", ""));
    }

    #[test]
    fn test_same_snapshot_malformed_falls_back_to_text() {
        assert!(same_snapshot("{oops", "{oops"));
        assert!(!same_snapshot("{oops", "{\"a\":1}"));
    }
}
