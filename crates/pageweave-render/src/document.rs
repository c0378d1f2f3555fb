//! Template documents.
//!
//! A [`TemplateDocument`] captures a template file's path, raw text, and
//! extracted tag list at the moment it is read. Documents are immutable:
//! rendering produces new strings, never edits in place, so a document can
//! be inspected freely after a render.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::extract::extract_tags;

/// An immutable, fully-read template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDocument {
    path: PathBuf,
    raw_text: String,
    tags: Vec<String>,
}

impl TemplateDocument {
    /// Reads the file at `path` and extracts its tag list.
    ///
    /// The tag list is de-duplicated in first-occurrence order; tags may
    /// still repeat in the raw text.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path = path.as_ref().to_path_buf();
        let raw_text = fs::read_to_string(&path)?;
        let tags = extract_tags(&raw_text);
        Ok(Self {
            path,
            raw_text,
            tags,
        })
    }

    /// Builds a document from in-memory text, for tests and inline templates.
    pub fn from_text<P: AsRef<Path>>(path: P, raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let tags = extract_tags(&raw_text);
        Self {
            path: path.as_ref().to_path_buf(),
            raw_text,
            tags,
        }
    }

    /// The path the document was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw template text.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// The distinct tag names, in first-occurrence order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}
