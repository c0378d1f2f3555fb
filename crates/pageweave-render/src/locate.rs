//! Template file location across an ordered list of search directories.
//!
//! Callers always pass the application's own template directory before the
//! framework's shared template directory, so applications can override any
//! default template by shipping a same-named file.

use std::path::{Path, PathBuf};

use crate::error::RenderError;

/// Searches the given directories in order and returns the first existing
/// file with the given name.
///
/// Pure filesystem read; returns `None` when no directory contains the
/// file. Callers that require the file convert `None` into
/// [`RenderError::TemplateMissing`] via [`locate_required`].
pub fn locate<P: AsRef<Path>>(search_dirs: &[P], file_name: &str) -> Option<PathBuf> {
    for dir in search_dirs {
        let candidate = dir.as_ref().join(file_name);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

/// Like [`locate`], but absence is a fatal [`RenderError::TemplateMissing`].
pub fn locate_required<P: AsRef<Path>>(
    search_dirs: &[P],
    file_name: &str,
) -> Result<PathBuf, RenderError> {
    locate(search_dirs, file_name)
        .ok_or_else(|| RenderError::TemplateMissing(file_name.to_string()))
}
