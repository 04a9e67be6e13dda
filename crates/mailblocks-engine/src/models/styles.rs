use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Inline style properties of a block, in edit order.
///
/// Keys are CSS-like property names, either camelCase (`fontSize`) as the
/// style editor produces them or already kebab-case (`font-size`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Styles(IndexMap<String, String>);

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overwrite existing properties in place and append new ones.
    ///
    /// Returns whether anything changed.
    pub fn merge(&mut self, patch: &Styles) -> bool {
        let mut changed = false;
        for (property, value) in patch.iter() {
            if self.get(property) != Some(value) {
                self.0.insert(property.to_string(), value.to_string());
                changed = true;
            }
        }
        changed
    }

    /// Serialize as an inline `style` attribute body: `key: value` pairs
    /// joined by `; `, property names converted to kebab-case.
    ///
    /// camelCase keys are not emitted as stored, so `fontSize: 24px` is
    /// written `font-size: 24px`; email clients ignore the camelCase form.
    pub fn to_css(&self) -> String {
        self.0
            .iter()
            .map(|(property, value)| format!("{}: {}", css_property_name(property), value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Styles {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// `backgroundColor` -> `background-color`. Kebab-case input passes through.
pub fn css_property_name(property: &str) -> String {
    let mut name = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            if !name.is_empty() {
                name.push('-');
            }
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}
