//! Plain-text rendering helpers for the `explain_*` summaries.

use serde_json::Value;

/// Flattens a JSON value to display text. Arrays are comma-joined; objects fall back to
/// compact JSON.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

/// `label:` followed by one indented bullet per item. Nothing is written for an empty list.
pub(crate) fn push_bullets(lines: &mut Vec<String>, label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("{}:", label));
    lines.extend(items.iter().map(|item| format!("  - {}", item)));
}

/// Renders a value under `label`: objects as `key: value` bullets, arrays as bullets,
/// scalars inline.
pub(crate) fn push_value_block(lines: &mut Vec<String>, label: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            lines.push(format!("{}:", label));
            lines.extend(map.iter().map(|(k, v)| format!("  - {}: {}", k, value_text(v))));
        }
        Value::Array(items) => {
            lines.push(format!("{}:", label));
            lines.extend(items.iter().map(|v| format!("  - {}", value_text(v))));
        }
        Value::Null => {}
        scalar => lines.push(format!("{}: {}", label, value_text(scalar))),
    }
}
