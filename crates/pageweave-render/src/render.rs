//! Template substitution.
//!
//! The renderer replaces every occurrence of each delimited tag in a
//! [`TemplateDocument`] with its value from a [`TagValues`] map. Substitution
//! is a single left-to-right pass over the original template text; values
//! are emitted verbatim and never re-scanned for tags, so a value containing
//! `{...}` text cannot trigger a substitution loop.
//!
//! Tags absent from the map are handed to a missing-value callback; if the
//! callback fails, the whole render aborts and no partial output is
//! returned. Tag names containing a space are skipped entirely and pass
//! through as literal text.
//!
//! # Example
//!
//! ```rust
//! use pageweave_render::{render_text, tag_values, KeyValueFormat, RenderError};
//!
//! let out = render_text(
//!     "<h1>{header-text}</h1>",
//!     &tag_values([("header-text", "Welcome")]),
//!     &KeyValueFormat,
//!     |tag| Err(RenderError::TagNotFound(tag.to_string())),
//! ).unwrap();
//! assert_eq!(out, "<h1>Welcome</h1>");
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use crate::document::TemplateDocument;
use crate::error::RenderError;
use crate::extract::{is_substitutable, TAG_CLOSE, TAG_OPEN};
use crate::value::{TagValue, TagValues};

/// Array-to-markup conversion for nested (array-valued) tags.
///
/// Contract: given a tag name and its nested sub-tag mapping, produce the
/// replacement string. The render crate ships [`KeyValueFormat`] as a plain
/// default; the resolver layer provides a template-backed implementation
/// that renders the tag's same-named template file.
pub trait NestedFormat {
    /// Produces the replacement markup for `tag` from its nested mapping.
    fn format(&self, tag: &str, values: &BTreeMap<String, String>) -> String;
}

/// Plain `key: value` line formatting for nested tags.
///
/// A deliberately minimal markup conversion, useful for tests and for
/// callers that have no template backing the nested tag.
pub struct KeyValueFormat;

impl NestedFormat for KeyValueFormat {
    fn format(&self, _tag: &str, values: &BTreeMap<String, String>) -> String {
        values
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders a document by substituting every tag marker it contains.
///
/// Substitution is one left-to-right pass over the original template text.
/// At each marker:
///
/// - space-containing and empty names pass through literally;
/// - scalar values are emitted verbatim;
/// - nested values are expanded through `nested`;
/// - absent values invoke `on_missing(tag)`; its error aborts the render.
///
/// Emitted values are never scanned for markers, so a value containing
/// `{...}` text cannot be substituted by a later tag. Each distinct tag's
/// replacement is produced once and reused at every occurrence. On success
/// the output contains no unresolved spaceless markers that originated in
/// the template text.
pub fn render_document<F>(
    doc: &TemplateDocument,
    values: &TagValues,
    nested: &dyn NestedFormat,
    mut on_missing: F,
) -> Result<String, RenderError>
where
    F: FnMut(&str) -> Result<String, RenderError>,
{
    let raw = doc.raw_text();
    let mut resolved: BTreeMap<String, String> = BTreeMap::new();
    let mut output = String::with_capacity(raw.len());
    // Byte index of the pending open delimiter, if any.
    let mut open: Option<usize> = None;

    for (i, ch) in raw.char_indices() {
        match ch {
            TAG_OPEN => {
                // An earlier unclosed delimiter is plain text.
                if let Some(start) = open {
                    output.push_str(&raw[start..i]);
                }
                open = Some(i);
            }
            TAG_CLOSE => match open.take() {
                Some(start) => {
                    let name = &raw[start + 1..i];
                    if name.is_empty() || !is_substitutable(name) {
                        output.push_str(&raw[start..i + 1]);
                        continue;
                    }
                    if let Some(replacement) = resolved.get(name) {
                        output.push_str(replacement);
                        continue;
                    }
                    let replacement = match values.get(name) {
                        Some(TagValue::Text(text)) => text.clone(),
                        Some(TagValue::Nested(map)) => nested.format(name, map),
                        None => on_missing(name)?,
                    };
                    output.push_str(&replacement);
                    resolved.insert(name.to_string(), replacement);
                }
                None => output.push(ch),
            },
            _ => {
                if open.is_none() {
                    output.push(ch);
                }
            }
        }
    }
    if let Some(start) = open {
        output.push_str(&raw[start..]);
    }

    Ok(output)
}

/// Reads the file at `path` and renders it. See [`render_document`].
pub fn render_file<P, F>(
    path: P,
    values: &TagValues,
    nested: &dyn NestedFormat,
    on_missing: F,
) -> Result<String, RenderError>
where
    P: AsRef<Path>,
    F: FnMut(&str) -> Result<String, RenderError>,
{
    let doc = TemplateDocument::read(path)?;
    render_document(&doc, values, nested, on_missing)
}

/// Renders in-memory template text. See [`render_document`].
pub fn render_text<F>(
    raw: &str,
    values: &TagValues,
    nested: &dyn NestedFormat,
    on_missing: F,
) -> Result<String, RenderError>
where
    F: FnMut(&str) -> Result<String, RenderError>,
{
    let doc = TemplateDocument::from_text("<inline>", raw);
    render_document(&doc, values, nested, on_missing)
}
