//! The in-memory configuration document model.
//!
//! A [`ConfigDocument`] is an order-preserving map from string keys to
//! [`ConfigValue`]s. Documents are transient: they exist only between a
//! decode and an encode, never as durable state. `IndexMap` keeps iteration
//! in insertion order so serialized output is deterministic, and floats are
//! wrapped in `OrderedFloat` so documents implement `Eq`.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A single configuration value, recursively JSON-representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (signed 64-bit)
    Integer(i64),
    /// Floating point value
    Float(OrderedFloat<f64>),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<ConfigValue>),
    /// Object (map) of values
    Object(IndexMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Returns true if the value is Null.
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns the value as a bool if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as an i64 if it is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as an f64 if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(f) => Some(f.into_inner()),
            ConfigValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the value as a str if it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as an array slice if it is one.
    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns the value as an object if it is one.
    pub fn as_object(&self) -> Option<&IndexMap<String, ConfigValue>> {
        match self {
            ConfigValue::Object(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        ConfigValue::Bool(v)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        ConfigValue::Integer(v)
    }
}

impl From<i32> for ConfigValue {
    fn from(v: i32) -> Self {
        ConfigValue::Integer(v as i64)
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        ConfigValue::Float(OrderedFloat(v))
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        ConfigValue::String(v.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        ConfigValue::String(v)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(v: Vec<T>) -> Self {
        ConfigValue::Array(v.into_iter().map(Into::into).collect())
    }
}

/// An order-preserving configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConfigDocument {
    #[serde(flatten)]
    inner: IndexMap<String, ConfigValue>,
}

impl ConfigDocument {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }

    /// Returns a reference to the underlying map.
    pub fn as_inner(&self) -> &IndexMap<String, ConfigValue> {
        &self.inner
    }

    /// Returns true if the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of top-level entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Inserts a key-value pair, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Retrieves a top-level value by key.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.inner.get(key)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.inner.iter()
    }
}

impl From<IndexMap<String, ConfigValue>> for ConfigDocument {
    fn from(inner: IndexMap<String, ConfigValue>) -> Self {
        Self { inner }
    }
}

impl FromIterator<(String, ConfigValue)> for ConfigDocument {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved() {
        let mut doc = ConfigDocument::new();
        doc.insert("zeta", 1);
        doc.insert("alpha", 2);
        let keys: Vec<_> = doc.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn untagged_value_roundtrips_through_json() {
        let json = r#"{"port": 8080, "debug": true, "ratio": 0.5, "tags": ["a", "b"], "nested": {"x": null}}"#;
        let doc: ConfigDocument = serde_json::from_str(json).unwrap();

        assert_eq!(doc.get("port").unwrap().as_i64(), Some(8080));
        assert_eq!(doc.get("debug").unwrap().as_bool(), Some(true));
        assert_eq!(doc.get("ratio").unwrap().as_f64(), Some(0.5));
        assert_eq!(doc.get("tags").unwrap().as_array().unwrap().len(), 2);
        assert!(
            doc.get("nested")
                .unwrap()
                .as_object()
                .unwrap()
                .get("x")
                .unwrap()
                .is_null()
        );

        let back: ConfigDocument = serde_json::from_str(&serde_json::to_string(&doc).unwrap()).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn documents_with_floats_are_eq() {
        let mut a = ConfigDocument::new();
        a.insert("pi", 3.14);
        let mut b = ConfigDocument::new();
        b.insert("pi", 3.14);
        assert_eq!(a, b);
    }
}
