//! Recursive keyword matcher shared by all three stores.
//!
//! Matching is lower-cased substring containment over arbitrarily nested JSON:
//! a string matches when it contains the keyword, an array or object matches when any of
//! its elements/values match, and every other value never matches.

use serde::Serialize;
use serde_json::Value;

/// A search keyword normalized to lower case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword(String);

impl Keyword {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty keyword, which matches every string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Substring test against one string (identifier or field value).
    pub fn matches_text(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.0)
    }
}

/// Recursive matcher over the tagged JSON variant.
pub fn value_matches(value: &Value, keyword: &Keyword) -> bool {
    match value {
        Value::String(s) => keyword.matches_text(s),
        Value::Array(items) => items.iter().any(|v| value_matches(v, keyword)),
        Value::Object(map) => map.values().any(|v| value_matches(v, keyword)),
        _ => false,
    }
}

/// Matches a typed record by walking its serialized form, so fields kept in the
/// record's `extra` side-map are searched the same way as typed ones.
pub fn record_matches<T: Serialize>(record: &T, keyword: &Keyword) -> bool {
    match serde_json::to_value(record) {
        Ok(value) => value_matches(&value, keyword),
        Err(e) => {
            tracing::debug!(target: "swm::knowledge", error = %e, "Record not searchable");
            false
        }
    }
}
