use crate::math::Vector3;
use std::collections::BTreeMap;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// A single value stored in a [`Configuration`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ConfigValue {
    Number(f64),
    String(String),
    Vector(Vector3),
    Bool(bool),
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vector3> for ConfigValue {
    fn from(value: Vector3) -> Self {
        Self::Vector(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Typed key-value bag for per-object user attributes.
///
/// Typed getters return `None` both for missing keys and for keys holding
/// a value of another type.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Configuration {
    values: BTreeMap<String, ConfigValue>,
}

impl Configuration {
    /// Creates an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, returning the previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Option<ConfigValue> {
        self.values.insert(key.into(), value.into())
    }

    /// Gets the raw value under `key`
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Gets a number; `None` if missing or of another kind
    pub fn get_number(&self, key: &str) -> Option<f64> {
        match self.values.get(key) {
            Some(ConfigValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    /// Gets a string; `None` if missing or of another kind
    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(ConfigValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Gets a vector; `None` if missing or of another kind
    pub fn get_vector(&self, key: &str) -> Option<Vector3> {
        match self.values.get(key) {
            Some(ConfigValue::Vector(v)) => Some(*v),
            _ => None,
        }
    }

    /// Gets a flag; `None` if missing or of another kind
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(ConfigValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Removes and returns the value under `key`
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.values.remove(key)
    }

    /// Whether a value is stored under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the bag holds no entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
