//! Error types for template loading and rendering.
//!
//! This module provides [`RenderError`], the primary error type for all
//! file-location, extraction, and substitution operations in this crate.

use std::fmt;

/// Error type for template loading and rendering operations.
///
/// This error type provides a stable API for callers of the render crate.
/// Higher layers (the tag resolver, the request dispatcher) wrap these
/// errors into their own domain errors.
#[derive(Debug)]
pub enum RenderError {
    /// Template file absent from every search directory.
    TemplateMissing(String),

    /// No value could be produced for a tag during substitution.
    ///
    /// Raised by the missing-value callback when it cannot supply a
    /// replacement. Aborts the whole render; no partial output is returned.
    TagNotFound(String),

    /// I/O error reading a template file from disk.
    IoError(std::io::Error),

    /// Other operational error.
    OperationError(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::TemplateMissing(name) => write!(f, "template file not found: {}", name),
            RenderError::TagNotFound(tag) => write!(f, "value for tag not found: {}", tag),
            RenderError::IoError(err) => write!(f, "I/O error: {}", err),
            RenderError::OperationError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::IoError(err)
    }
}
