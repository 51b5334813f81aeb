//! Caller-supplied record fields.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Key used by [`Fields::with_error`].
pub const ERROR_KEY: &str = "error";

/// Insertion-ordered set of key/value pairs attached to a record.
///
/// Values that fail to serialize are stored as their `Debug` string, so
/// building a field set never fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Map<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Add a field, builder style.
    pub fn with<V>(mut self, key: impl Into<String>, value: V) -> Self
    where
        V: Serialize + fmt::Debug,
    {
        self.insert(key, value);
        self
    }

    /// Add a field using its `Display` form.
    pub fn with_display(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.0.insert(key.into(), Value::String(value.to_string()));
        self
    }

    /// Attach an error under the `error` key.
    pub fn with_error<E>(self, err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        self.with_display(ERROR_KEY, err)
    }

    /// Insert a field, returning the previous value for that key.
    pub fn insert<V>(&mut self, key: impl Into<String>, value: V) -> Option<Value>
    where
        V: Serialize + fmt::Debug,
    {
        self.0.insert(key.into(), coerce(&value))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

fn coerce<V>(value: &V) -> Value
where
    V: Serialize + fmt::Debug,
{
    serde_json::to_value(value).unwrap_or_else(|_| Value::String(format!("{value:?}")))
}

impl IntoIterator for Fields {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
