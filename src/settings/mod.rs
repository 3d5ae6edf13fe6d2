//! Typed settings mapping shared by compute packages, the active profile and
//! render-time override layers.
//!
//! A [`Settings`] is an ordered map from string key to YAML value. Keys are kept
//! verbatim; the uppercase placeholder form is only derived at render time. The one
//! key with known meaning, `submission_template`, gets typed accessors.
//!
//! # Merging
//!
//! [`Settings::merge`] layers another mapping on top of this one. With
//! [`MergeStrategy::Shallow`] (the default) each incoming top-level key replaces the
//! existing value wholesale. With [`MergeStrategy::Deep`] nested mappings are merged
//! recursively and only non-mapping leaves are replaced. Keys present only on the
//! receiving side are always preserved.
//!
//! ```rust
//! use divvy_cli::settings::{MergeStrategy, Settings};
//!
//! let mut base = Settings::new();
//! base.set("mem", "4000");
//! base.set("partition", "standard");
//!
//! let mut incoming = Settings::new();
//! incoming.set("mem", "8000");
//!
//! base.merge(&incoming, MergeStrategy::Shallow);
//! assert_eq!(base.get_str("mem"), Some("8000"));
//! assert_eq!(base.get_str("partition"), Some("standard"));
//! ```

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::constants::SUBMISSION_TEMPLATE_KEY;

/// How one settings mapping is layered on top of another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Top-level keys from the incoming mapping replace existing values wholesale.
    #[default]
    Shallow,
    /// Nested mappings merge recursively; non-mapping values are replaced.
    Deep,
}

/// Ordered mapping of setting name to value.
///
/// Deserializes directly from a YAML mapping, as used for `--settings` files.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    entries: BTreeMap<String, Value>,
}

impl Settings {
    /// Create an empty settings mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build settings from a YAML mapping.
    ///
    /// Scalar keys (strings, numbers, booleans) are converted to their string form.
    /// Returns the offending key, formatted for an error message, if a key is a
    /// sequence, mapping or null.
    pub fn from_mapping(mapping: &Mapping) -> Result<Self, String> {
        let mut entries = BTreeMap::new();
        for (key, value) in mapping {
            let key = scalar_key(key).ok_or_else(|| format!("{key:?}"))?;
            entries.insert(key, value.clone());
        }
        Ok(Self {
            entries,
        })
    }

    /// Look up a setting.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Look up a setting that holds a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Set a setting, returning the previous value if there was one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate settings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Path of the submission template, if one is set to a string value.
    pub fn submission_template(&self) -> Option<&Path> {
        self.get_str(SUBMISSION_TEMPLATE_KEY).map(Path::new)
    }

    pub fn set_submission_template(&mut self, path: impl Into<PathBuf>) {
        let path: PathBuf = path.into();
        self.set(SUBMISSION_TEMPLATE_KEY, path.to_string_lossy().into_owned());
    }

    /// Layer `other` on top of these settings.
    ///
    /// Values from `other` win for every key it defines; keys only present here are
    /// kept. See [`MergeStrategy`] for how nested mappings are treated.
    pub fn merge(&mut self, other: &Settings, strategy: MergeStrategy) {
        for (key, incoming) in &other.entries {
            match (self.entries.get_mut(key), strategy) {
                (Some(existing), MergeStrategy::Deep) => deep_merge(existing, incoming),
                _ => {
                    self.entries.insert(key.clone(), incoming.clone());
                }
            }
        }
    }
}

impl From<BTreeMap<String, Value>> for Settings {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self {
            entries,
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Settings {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn scalar_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn deep_merge(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Mapping(base_map), Value::Mapping(incoming_map)) => {
            for (key, value) in incoming_map {
                match base_map.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, incoming) => *base = incoming.clone(),
    }
}

/// String form of a setting as it is substituted into a template.
///
/// Strings are used verbatim, numbers and booleans in their YAML text form, null as
/// an empty string. Sequences and mappings are written as compact JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => value_to_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => serde_json::to_string(value)
            .unwrap_or_else(|_| serde_yaml::to_string(value).unwrap_or_default().trim_end().to_string()),
    }
}
