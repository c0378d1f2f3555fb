//! Input and response sanitization.
//!
//! Two collaborators live here: per-kind input sanitization applied to
//! request parameters before validation, and the [`Sanitizer`] trait the
//! dispatcher optionally applies to the final response. Neither alters
//! control flow; both only rewrite strings.

use serde::{Deserialize, Serialize};

/// The declared kind of an input parameter.
///
/// Parameters with no declared kind are treated as plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKind {
    /// Free-form text; HTML-significant characters are escaped.
    #[default]
    PlainText,
    /// A URL; characters outside the unreserved/reserved URL sets are
    /// dropped.
    Url,
}

/// Sanitizes a single input value according to its declared kind.
pub fn sanitize_text(value: &str, kind: TextKind) -> String {
    match kind {
        TextKind::PlainText => escape_html(value),
        TextKind::Url => value
            .chars()
            .filter(|c| {
                c.is_ascii_alphanumeric() || ":/?#[]@!$&'()*+,;=-._~%".contains(*c)
            })
            .collect(),
    }
}

/// Response sanitizer collaborator.
///
/// Invoked on the final response when enabled by configuration.
pub trait Sanitizer: Send + Sync {
    /// Returns the sanitized form of `value`.
    fn sanitize(&self, value: &str) -> String;
}

/// Escapes HTML-significant characters in the response.
pub struct HtmlEscape;

impl Sanitizer for HtmlEscape {
    fn sanitize(&self, value: &str) -> String {
        escape_html(value)
    }
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}
