//! Opaque run configuration handed to input sources.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MapReduceError;

/// Mapping from option name to value, read by `InputSource::generate`.
///
/// The engine imposes no keys of its own; each input source documents the
/// keys it consults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    entries: BTreeMap<String, String>,
}

impl Config {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from key/value pairs. Later pairs win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { entries }
    }

    /// Parse a configuration from a JSON object of string values.
    pub fn from_json(text: &str) -> Result<Self, MapReduceError> {
        serde_json::from_str(text)
            .map_err(|e| MapReduceError::Config(format!("invalid config JSON: {e}")))
    }

    /// Set `key` to `value`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Parse and apply a `key=value` assignment.
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), MapReduceError> {
        let (key, value) = parse_assignment(assignment)?;
        self.set(key, value);
        Ok(())
    }

    /// Copy every entry of `other` into `self`, overriding existing keys.
    pub fn merge(&mut self, other: Config) {
        self.entries.extend(other.entries);
    }

    /// Look up a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up a value that must be present.
    pub fn require(&self, key: &str) -> Result<&str, MapReduceError> {
        self.get(key)
            .ok_or_else(|| MapReduceError::Config(format!("missing required key '{key}'")))
    }

    /// Look up and parse a value. Returns `Ok(None)` when the key is absent.
    pub fn get_parsed<T>(&self, key: &str) -> Result<Option<T>, MapReduceError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            None => Ok(None),
            Some(raw) => raw.trim().parse().map(Some).map_err(|e| {
                MapReduceError::Config(format!("invalid value '{raw}' for '{key}': {e}"))
            }),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the configuration has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Split a `key=value` string. The key is trimmed and must be non-empty;
/// the value is kept verbatim and may itself contain `=`.
pub fn parse_assignment(s: &str) -> Result<(String, String), MapReduceError> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| MapReduceError::Config(format!("expected key=value, got '{s}'")))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(MapReduceError::Config(format!("empty key in '{s}'")));
    }
    Ok((key.to_string(), value.to_string()))
}
