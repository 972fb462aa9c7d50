//! Configuration tree handed to the external generation tool

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A configuration value: a scalar or a nested group of named values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Scalar(String),
    Group(GenerationConfig),
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Scalar(value) => serializer.serialize_str(value),
            ConfigValue::Group(group) => group.serialize(serializer),
        }
    }
}

/// Ordered mapping of parameter names to values
///
/// Setting an existing key replaces its value in place, so insertion order is
/// the order parameters were first declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationConfig {
    entries: Vec<(String, ConfigValue)>,
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: ConfigValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn set_scalar(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set(key, ConfigValue::Scalar(value.into()));
    }

    /// Set `key` only when a value is present
    pub fn set_optional(&mut self, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.set_scalar(key, value);
        }
    }

    pub fn set_group(&mut self, key: impl Into<String>, group: GenerationConfig) {
        self.set(key, ConfigValue::Group(group));
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn scalar(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            ConfigValue::Scalar(value) => Some(value),
            ConfigValue::Group(_) => None,
        }
    }

    pub fn group(&self, key: &str) -> Option<&GenerationConfig> {
        match self.get(key)? {
            ConfigValue::Group(group) => Some(group),
            ConfigValue::Scalar(_) => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
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
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for GenerationConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (key, value) in iter {
            config.set_scalar(key, value);
        }
        config
    }
}

impl Serialize for GenerationConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
