use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field name reserved for child blocks in the legacy document shape.
///
/// Children live in [`crate::Block::children`]; content patches never touch them.
pub const CHILDREN_FIELD: &str = "children";

/// Per-kind content fields of a block (`text`, `level`, `url`, ...).
///
/// Values are loosely typed JSON. Accessors are total and return `None` when
/// a field is missing or has an unexpected shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Content(IndexMap<String, Value>);

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Shallow merge: fields in `patch` replace existing ones in place,
    /// new fields are appended. The reserved `children` field is skipped.
    ///
    /// Returns whether anything changed.
    pub fn merge(&mut self, patch: &Content) -> bool {
        let mut changed = false;
        for (field, value) in patch.iter() {
            if field == CHILDREN_FIELD {
                log::debug!("ignoring `{CHILDREN_FIELD}` in content patch");
                continue;
            }
            if self.0.get(field) != Some(value) {
                self.0.insert(field.clone(), value.clone());
                changed = true;
            }
        }
        changed
    }

    /// String field; numbers and booleans are rendered to text
    pub fn str_field(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Non-negative integer field; numeric strings are accepted
    pub fn u64_field(&self, field: &str) -> Option<u64> {
        match self.0.get(field)? {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// List of numbers; non-numeric entries are dropped
    pub fn number_list(&self, field: &str) -> Option<Vec<f64>> {
        match self.0.get(field)? {
            Value::Array(items) => Some(items.iter().filter_map(Value::as_f64).collect()),
            _ => None,
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Content {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
