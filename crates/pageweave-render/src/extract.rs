//! Tag extraction from raw template text.
//!
//! A tag is a maximal run of non-delimiter characters between a single `{`
//! and a single `}`, embedded in arbitrary surrounding text. There is no
//! nesting syntax: a second `{` before a closing `}` restarts the scan from
//! that character.
//!
//! # Example
//!
//! ```rust
//! use pageweave_render::extract_tags;
//!
//! let tags = extract_tags("<h1>{title}</h1><p>{body}</p>{title}");
//! assert_eq!(tags, vec!["title", "body"]);
//! ```
//!
//! Tag names may contain a space. Such tags are reported here but are never
//! substituted by the renderer; they exist to let literal `{...}`-shaped
//! text pass through a render unresolved without erroring.

/// The opening tag delimiter.
pub const TAG_OPEN: char = '{';

/// The closing tag delimiter.
pub const TAG_CLOSE: char = '}';

/// Extracts the ordered, de-duplicated list of tag names from raw text.
///
/// Tags may repeat in the text; the returned list contains each name once,
/// in first-occurrence order. Empty names (`{}`) are not tags. Returns an
/// empty vector for tag-free text.
pub fn extract_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let mut current: Option<String> = None;

    for ch in raw.chars() {
        match ch {
            TAG_OPEN => {
                // Restart the scan; an earlier unclosed `{` is plain text.
                current = Some(String::new());
            }
            TAG_CLOSE => {
                if let Some(name) = current.take() {
                    if !name.is_empty() && !tags.iter().any(|t| *t == name) {
                        tags.push(name);
                    }
                }
            }
            _ => {
                if let Some(name) = current.as_mut() {
                    name.push(ch);
                }
            }
        }
    }

    tags
}

/// Returns true if the tag name is substitutable.
///
/// Names containing a space are left untouched by the renderer and are
/// never handed to the resolver.
pub fn is_substitutable(tag: &str) -> bool {
    !tag.contains(' ')
}

/// Renders a tag name back into its delimited marker form, e.g. `{title}`.
pub fn marker(tag: &str) -> String {
    format!("{}{}{}", TAG_OPEN, tag, TAG_CLOSE)
}
