//! Component generation.
//!
//! [`Generator`] renders one named component against the configured search
//! directories: the application template directory first, then the
//! framework directory for the active template library. It is the
//! non-recursive sibling of the resolver: every tag must be covered by the
//! supplied values or the render fails.

use std::fs;
use std::path::PathBuf;

use pageweave_render::{
    locate, locate_required, render_file, KeyValueFormat, NestedFormat, RenderError, TagValue,
    TagValues,
};

use crate::config::Settings;

/// Expands nested tag values through the tag's same-named template.
///
/// An array-valued tag `css_tags` is expanded by rendering `css_tags.html`
/// (located through the usual search order) with the nested map as values.
/// When no such template exists the plain key/value format is used instead.
pub struct TemplateNestedFormat {
    search_dirs: Vec<PathBuf>,
}

impl TemplateNestedFormat {
    /// Creates a format backed by the given search directories.
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }
}

impl NestedFormat for TemplateNestedFormat {
    fn format(&self, tag: &str, values: &std::collections::BTreeMap<String, String>) -> String {
        let file = format!("{}.html", tag);
        let Some(path) = locate(&self.search_dirs, &file) else {
            return KeyValueFormat.format(tag, values);
        };
        let tag_values: TagValues = values
            .iter()
            .map(|(k, v)| (k.clone(), TagValue::Text(v.clone())))
            .collect();
        // Sub-tags absent from the nested map pass through as markers.
        match render_file(&path, &tag_values, &KeyValueFormat, |t| {
            Ok(pageweave_render::marker(t))
        }) {
            Ok(out) => out,
            Err(_) => KeyValueFormat.format(tag, values),
        }
    }
}

/// Renders named components from the configured template directories.
pub struct Generator<'a> {
    settings: &'a Settings,
}

impl<'a> Generator<'a> {
    /// Creates a generator over the given settings.
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Renders the component `name` with the given values.
    ///
    /// `.html` is appended when the name carries no extension, so both
    /// `"footer"` and `"footer.html"` address the same file. Every tag in
    /// the file must be covered by `values`; an uncovered tag aborts with
    /// [`RenderError::TagNotFound`].
    pub fn generate(&self, component: &str, values: &TagValues) -> Result<String, RenderError> {
        let file = if component.contains(".html") {
            component.to_string()
        } else {
            format!("{}.html", component)
        };
        self.generate_template(&file, Some(values), None)
    }

    /// Renders the template file `file`, honoring a per-call template
    /// library override.
    ///
    /// With `values` of `None` the raw file contents are returned without
    /// substitution, for callers that set their own template values later.
    pub fn generate_template(
        &self,
        file: &str,
        values: Option<&TagValues>,
        library: Option<&str>,
    ) -> Result<String, RenderError> {
        let search_dirs = self.settings.search_dirs(library);
        let path = locate_required(&search_dirs, file)?;
        match values {
            Some(values) => {
                let nested = TemplateNestedFormat::new(search_dirs);
                render_file(&path, values, &nested, |tag| {
                    Err(RenderError::TagNotFound(tag.to_string()))
                })
            }
            None => Ok(fs::read_to_string(&path)?),
        }
    }
}
