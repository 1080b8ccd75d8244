//! Resolved field values and the ordered field map a resource projects to.

use indexmap::IndexMap;
use serde::Serialize;

/// The value of one requested field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Redacted by the privacy filter, or explicitly unset by a hook.
    Null,
    Int(i64),
    UInt(u64),
    Text(String),
    /// Rich text in its stored form and after the render pipeline.
    Rendered { raw: String, rendered: String },
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Comma-joined list of child IDs, ascending and without duplicates.
    pub fn id_list(ids: impl IntoIterator<Item = u64>) -> Self {
        let mut ids: Vec<u64> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        let joined = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        FieldValue::Text(joined)
    }

    /// The text of a plain string value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Field name to value, in the order the fields were requested.
///
/// Serializes as a JSON object. Inserting an existing key replaces its value in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldMap {
    entries: IndexMap<String, FieldValue>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Replaces the value of `name` with null, keeping the key. Absent keys are
    /// left absent.
    pub fn nullify(&mut self, name: &str) {
        if let Some(value) = self.entries.get_mut(name) {
            *value = FieldValue::Null;
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
