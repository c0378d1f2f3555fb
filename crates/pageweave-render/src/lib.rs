//! Tag-based template loading, extraction, and substitution.
//!
//! `pageweave-render` is the leaf layer of the pageweave framework: it
//! knows how to find template files across ordered search directories, how
//! to list the `{tag}` placeholders a template contains, and how to
//! substitute values for them. It knows nothing about routes, controllers,
//! or the recursive tag resolver built on top of it.
//!
//! # Pipeline Position
//!
//! ```text
//! resolver asks for a file
//!   → locate (app dir before framework dir)
//!   → TemplateDocument::read (raw text + tag list)
//!   → render_document (values in, final text out)
//! ```
//!
//! # Key Types
//!
//! - [`TemplateDocument`]: immutable `{path, raw text, tag list}` snapshot
//! - [`TagValue`] / [`TagValues`]: per-render replacement values
//! - [`NestedFormat`]: array-to-markup conversion for nested tag values
//! - [`RenderError`]: the crate's error type
//!
//! # Tag Syntax
//!
//! Tags are delimited by single `{` and `}` characters; closing is implicit
//! (no nesting syntax). A tag name containing a space is never substituted
//! and passes through literally, which lets `{...}`-shaped text survive a
//! render without erroring.

mod document;
mod error;
mod extract;
mod locate;
mod render;
mod value;

pub use document::TemplateDocument;
pub use error::RenderError;
pub use extract::{extract_tags, is_substitutable, marker, TAG_CLOSE, TAG_OPEN};
pub use locate::{locate, locate_required};
pub use render::{render_document, render_file, render_text, KeyValueFormat, NestedFormat};
pub use value::{tag_values, TagValue, TagValues};
