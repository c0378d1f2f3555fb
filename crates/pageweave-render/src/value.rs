//! Tag replacement values.
//!
//! A [`TagValue`] is either a scalar string or a nested sub-tag mapping (for
//! array-valued tags such as script or stylesheet lists). The per-render
//! mapping from tag name to value is a [`TagValues`] map; a tag absent from
//! the map is what sends the resolver down its recursive path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The replacement value for a single tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    /// A scalar replacement, substituted verbatim.
    Text(String),
    /// A nested sub-tag mapping, expanded through a
    /// [`NestedFormat`](crate::render::NestedFormat) collaborator.
    Nested(BTreeMap<String, String>),
}

impl TagValue {
    /// Returns the scalar text, or `None` for nested values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(s) => Some(s),
            TagValue::Nested(_) => None,
        }
    }

    /// Returns the nested mapping, or `None` for scalar values.
    pub fn as_nested(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            TagValue::Text(_) => None,
            TagValue::Nested(m) => Some(m),
        }
    }
}

impl From<&str> for TagValue {
    fn from(s: &str) -> Self {
        TagValue::Text(s.to_string())
    }
}

impl From<String> for TagValue {
    fn from(s: String) -> Self {
        TagValue::Text(s)
    }
}

impl From<BTreeMap<String, String>> for TagValue {
    fn from(m: BTreeMap<String, String>) -> Self {
        TagValue::Nested(m)
    }
}

/// The per-render mapping from tag name to replacement value.
///
/// Created fresh for each render call and discarded after the response is
/// produced; never shared between concurrent resolutions.
pub type TagValues = BTreeMap<String, TagValue>;

/// Builds a [`TagValues`] map from `(name, value)` pairs.
///
/// Convenience for controllers that produce a handful of scalar values:
///
/// ```rust
/// use pageweave_render::tag_values;
///
/// let values = tag_values([("header-text", "Welcome"), ("title", "Home")]);
/// assert_eq!(values["title"].as_text(), Some("Home"));
/// ```
pub fn tag_values<I, K, V>(pairs: I) -> TagValues
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<TagValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
