//! Ordered knowledge trees and the JSON data provider.
//!
//! Every store is backed by one or more `KnowledgeTree<T>`: a mapping from string ids to
//! typed records that keeps the source file's key order. The provider functions never fail
//! the caller's store: a missing or unreadable file degrades to an empty tree.
//!
//! Record decoding is lenient. A field whose JSON type does not fit its typed slot is left
//! at its default and the raw value moves into the record's `extra` map; only values that
//! are not JSON objects are skipped.

use serde::de::{DeserializeOwned, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Errors raised while reading a knowledge source file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("knowledge source {path} could not be read: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("knowledge source {path} is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("knowledge source {path} must contain a JSON object at the top level")]
    NotAnObject { path: String },
}

/// Insertion-ordered mapping of id -> record.
#[derive(Debug, Clone)]
pub struct KnowledgeTree<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
}

/// A record type stored in a [`KnowledgeTree`].
pub trait KnowledgeRecord: DeserializeOwned {
    /// Side map that receives fields rejected by the typed decode. `None` drops them.
    fn extra_mut(&mut self) -> Option<&mut Map<String, Value>> {
        None
    }
}

/// Nested trees decode entry by entry, so no field is ever rejected at this level.
impl<T: KnowledgeRecord> KnowledgeRecord for KnowledgeTree<T> {}

fn into_fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(fields) => fields,
        _ => Map::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decodes one record. The strict decode is tried first; when it fails, fields are admitted
/// one at a time in source order, repeating over the set-aside ones until no more fit.
fn decode_record<T: KnowledgeRecord>(id: &str, value: Value) -> Option<T> {
    if !value.is_object() {
        tracing::warn!(
            target: "swm::knowledge",
            id = %id,
            found = json_kind(&value),
            "Skipping knowledge record that is not an object"
        );
        return None;
    }
    let error = match T::deserialize(&value) {
        Ok(record) => return Some(record),
        Err(e) => e,
    };

    let mut record = T::deserialize(&Value::Object(Map::new())).ok();
    let mut accepted = Map::new();
    let mut pending: Vec<(String, Value)> = into_fields(value).into_iter().collect();
    loop {
        let before = pending.len();
        let mut rejected = Vec::new();
        for (key, field) in pending {
            accepted.insert(key.clone(), field);
            let candidate = Value::Object(accepted);
            let decoded = T::deserialize(&candidate);
            accepted = into_fields(candidate);
            match decoded {
                Ok(decoded) => record = Some(decoded),
                Err(_) => {
                    if let Some(raw) = accepted.remove(&key) {
                        rejected.push((key, raw));
                    }
                }
            }
        }
        pending = rejected;
        if pending.is_empty() || pending.len() == before {
            break;
        }
    }

    let Some(mut record) = record else {
        tracing::warn!(
            target: "swm::knowledge",
            id = %id,
            error = %error,
            "Skipping knowledge record with unexpected shape"
        );
        return None;
    };
    tracing::warn!(
        target: "swm::knowledge",
        id = %id,
        fields = ?pending.iter().map(|(key, _)| key.as_str()).collect::<Vec<_>>(),
        error = %error,
        "Mistyped fields kept as untyped attributes"
    );
    if let Some(extra) = record.extra_mut() {
        extra.extend(pending);
    }
    Some(record)
}

impl<T> KnowledgeTree<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Exact-key lookup.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry; a repeated id replaces the earlier record in place.
    fn push(&mut self, id: String, record: T) {
        match self.index.get(&id) {
            Some(&i) => self.entries[i].1 = record,
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push((id, record));
            }
        }
    }
}

impl<T> Default for KnowledgeTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(String, T)> for KnowledgeTree<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut tree = Self::new();
        for (id, record) in iter {
            tree.push(id, record);
        }
        tree
    }
}

impl<T: KnowledgeRecord> KnowledgeTree<T> {
    /// Decodes each value of `map` as a `T`. Non-object values are skipped so one malformed
    /// entry never hides the rest of the tree.
    pub fn from_json_map(map: Map<String, Value>) -> Self {
        let mut tree = Self::new();
        for (id, value) in map {
            if let Some(record) = decode_record(&id, value) {
                tree.push(id, record);
            }
        }
        tree
    }

    /// Takes the object stored at `field` of a top-level document; absent or non-object
    /// fields give an empty tree.
    pub fn from_document_field(document: &mut Map<String, Value>, field: &str) -> Self {
        match document.remove(field) {
            Some(Value::Object(map)) => Self::from_json_map(map),
            _ => Self::new(),
        }
    }
}

impl<'de, T: KnowledgeRecord> Deserialize<'de> for KnowledgeTree<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_json_map(map))
    }
}

impl<T: Serialize> Serialize for KnowledgeTree<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, record) in &self.entries {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }
}

/// Reads a JSON document whose top level is an object.
pub fn load_json_document(path: &Path) -> Result<Map<String, Value>, LoadError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    let value: Value = serde_json::from_str(&raw).map_err(|source| LoadError::Json {
        path: display.clone(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(LoadError::NotAnObject { path: display }),
    }
}

/// Degraded-mode loader: an unreadable source becomes an empty document and is logged.
pub fn load_json_document_or_empty(path: &Path) -> Map<String, Value> {
    match load_json_document(path) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!(
                target: "swm::knowledge",
                path = %path.display(),
                error = %e,
                "Knowledge source unavailable; store will be empty"
            );
            Map::new()
        }
    }
}
