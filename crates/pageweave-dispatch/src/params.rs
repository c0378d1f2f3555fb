//! Request parameters.
//!
//! [`Params`] is a string key/value map with one load-bearing property: the
//! dispatcher passes parameter values to handlers positionally, ordered
//! lexicographically by key name. Handler argument order must match sorted
//! key order. This is a compatibility convention, not an accident, so the
//! ordering rule lives here rather than in the dispatcher.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An ordered string key/value parameter map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    map: BTreeMap<String, String>,
}

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter, replacing any existing value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.map.insert(key.into(), value.into());
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Returns true if the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The keys in lexicographic order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// The values in lexicographic key order.
    ///
    /// This is the positional argument list handed to handlers.
    pub fn ordered_values(&self) -> Vec<&str> {
        self.map.values().map(String::as_str).collect()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.map.iter()
    }

    /// Applies a function to every value in place.
    ///
    /// Used by the dispatcher to sanitize inputs before validation.
    pub fn map_values<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &str) -> String,
    {
        let sanitized: BTreeMap<String, String> = self
            .map
            .iter()
            .map(|(k, v)| (k.clone(), f(k, v)))
            .collect();
        self.map = sanitized;
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}
