//! Field-level change summaries
//!
//! Complements the line diff with a compact "what changed" description of
//! two entity snapshots, e.g. `enabled: false -> true, name: "a" -> "b"`.

use serde_json::Value;
use std::fmt;

use super::json::parse_snapshot;

/// Longest string value shown before truncation
const MAX_STRING_LEN: usize = 50;

/// A single changed field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    /// Dotted path to the field (`rules[0].strategy`); empty for the root
    pub path: String,
    /// Value before the change, `None` if the field was added
    pub before: Option<Value>,
    /// Value after the change, `None` if the field was removed
    pub after: Option<Value>,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let before = self
            .before
            .as_ref()
            .map(format_value)
            .unwrap_or_else(|| "(added)".to_string());
        let after = self
            .after
            .as_ref()
            .map(format_value)
            .unwrap_or_else(|| "(removed)".to_string());

        if self.path.is_empty() {
            write!(f, "{} -> {}", before, after)
        } else {
            write!(f, "{}: {} -> {}", self.path, before, after)
        }
    }
}

/// Collect changed fields between two JSON values
///
/// With `nested` set, objects and equal-length arrays are walked recursively
/// and reported by dotted path; otherwise only top-level fields are compared.
pub fn field_changes(before: &Value, after: &Value, nested: bool) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    collect(before, after, "", nested, &mut changes);
    changes
}

/// One-line summary of top-level changes between two snapshot texts
///
/// Returns `None` when nothing changed or neither side parses. An empty or
/// malformed side is compared as if it were an empty object.
pub fn summarize_changes(old_text: &str, new_text: &str) -> Option<String> {
    let before = parse_snapshot(old_text);
    let after = parse_snapshot(new_text);
    if before.is_none() && after.is_none() {
        return None;
    }

    let empty = Value::Object(Default::default());
    let changes = field_changes(
        before.as_ref().unwrap_or(&empty),
        after.as_ref().unwrap_or(&empty),
        false,
    );

    if changes.is_empty() {
        None
    } else {
        Some(
            changes
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// Nested, one-entry-per-field change list between two snapshot texts
pub fn detailed_changes(old_text: &str, new_text: &str) -> Vec<FieldChange> {
    let empty = Value::Object(Default::default());
    let before = parse_snapshot(old_text).unwrap_or_else(|| empty.clone());
    let after = parse_snapshot(new_text).unwrap_or(empty);
    field_changes(&before, &after, true)
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn collect(before: &Value, after: &Value, prefix: &str, nested: bool, out: &mut Vec<FieldChange>) {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            for (key, before_val) in before_obj {
                let path = join_path(prefix, key);
                match after_obj.get(key) {
                    Some(after_val) if before_val == after_val => {}
                    Some(after_val) if nested && after_val.is_object() && before_val.is_object() => {
                        collect(before_val, after_val, &path, nested, out);
                    }
                    Some(after_val) if nested && after_val.is_array() && before_val.is_array() => {
                        collect(before_val, after_val, &path, nested, out);
                    }
                    Some(after_val) => out.push(FieldChange {
                        path,
                        before: Some(before_val.clone()),
                        after: Some(after_val.clone()),
                    }),
                    None => out.push(FieldChange {
                        path,
                        before: Some(before_val.clone()),
                        after: None,
                    }),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    out.push(FieldChange {
                        path: join_path(prefix, key),
                        before: None,
                        after: Some(after_val.clone()),
                    });
                }
            }
        }
        (Value::Array(before_arr), Value::Array(after_arr))
            if nested && before_arr.len() == after_arr.len() =>
        {
            for (i, (b, a)) in before_arr.iter().zip(after_arr).enumerate() {
                if b != a {
                    collect(b, a, &format!("{}[{}]", prefix, i), nested, out);
                }
            }
        }
        _ => {
            if before != after {
                out.push(FieldChange {
                    path: prefix.to_string(),
                    before: Some(before.clone()),
                    after: Some(after.clone()),
                });
            }
        }
    }
}

/// Format a JSON value for a one-line summary
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > MAX_STRING_LEN {
                let head: String = s.chars().take(MAX_STRING_LEN - 3).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
