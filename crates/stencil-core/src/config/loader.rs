//! Reads the flat key -> default mapping from a template's `config.json`

use crate::error::{Result, ScaffoldError};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Name of the configuration file at the root of every template directory.
/// It is never rendered into the destination.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default values for every key a template may reference, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    entries: Vec<(String, String)>,
}

impl Configuration {
    /// Read and decode the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| ScaffoldError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&bytes).map_err(|reason| ScaffoldError::ConfigParse {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Decode a flat JSON object of string values.
    /// Returns a human-readable reason on failure.
    pub fn from_json(bytes: &[u8]) -> std::result::Result<Self, String> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;

        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(format!(
                    "expected a JSON object of string values, found {}",
                    kind_of(&other)
                ))
            }
        };

        let mut entries = Vec::with_capacity(map.len());
        for (key, value) in map {
            match value {
                Value::String(default) => entries.push((key, default)),
                other => {
                    return Err(format!(
                        "value for '{}' must be a string, found {}",
                        key,
                        kind_of(&other)
                    ))
                }
            }
        }

        Ok(Self { entries })
    }

    /// Iterate keys and defaults in the order they appear in the file
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();
        for (key, value) in iter {
            let key = key.into();
            let value = value.into();
            // Later entries win, matching JSON object decoding
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }
        }
        Self { entries }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
