//! Recursive tag resolution.
//!
//! [`TagResolver`] materializes the content of one named tag: it picks the
//! controller and template file bound to the tag (or the default fallback),
//! asks the controller for direct values, and recursively resolves every
//! remaining tag the template contains. Pages compose themselves this way:
//! a `basepage.html` of `{header}{body}{footer}` pulls in three templates
//! nobody declared upfront, each independently overridable per application.
//!
//! Resolution of one top-level tag walks a fixed sequence:
//!
//! ```text
//! Dispatching   pick {controller, file} from the route's mappings,
//!               or fall back to the index controller and <tag>.html
//! Locating      find the file (app dir before framework dir)
//! Extracting    read the TemplateDocument and its tag list
//! Resolving     recurse into every uncovered, spaceless tag
//! Done/Failed   substitute everything, or surface the first failure
//! ```
//!
//! Termination is enforced with a per-call in-flight tag set (cycle
//! detection) plus a hard depth ceiling; either violation fails the
//! resolution with [`ResolveErrorKind::CycleOrDepthExceeded`] instead of
//! looping. All resolution state is local to one `resolve` call, so a
//! resolver can be shared freely across concurrent requests.

use std::path::PathBuf;

use thiserror::Error;

use pageweave_dispatch::Params;
use pageweave_render::{
    is_substitutable, locate, render_document, RenderError, TagValue, TemplateDocument,
};

use crate::config::Settings;
use crate::controller::{ControllerRegistry, DEFAULT_HANDLER};
use crate::generator::TemplateNestedFormat;
use crate::mapping::TemplateMapping;

/// Hard ceiling on tag-resolution nesting depth.
pub const MAX_RESOLVE_DEPTH: usize = 32;

/// Why a tag failed to resolve.
#[derive(Debug, Error)]
pub enum ResolveErrorKind {
    /// The mapping names a controller key nobody registered, a
    /// configuration fault. Never retried.
    #[error("no controller registered under `{0}`")]
    HandlerNotCallable(String),

    /// The template file is absent from both search directories.
    #[error("template file `{0}` could not be found")]
    TemplateMissing(String),

    /// Resolution would not terminate: the tag is already being resolved
    /// further up the stack, or the depth ceiling was hit.
    #[error("resolution did not terminate (cycle or depth limit of {MAX_RESOLVE_DEPTH})")]
    CycleOrDepthExceeded,

    /// The bound controller returned an error.
    #[error("controller failed: {0}")]
    Handler(#[source] anyhow::Error),

    /// Substitution failed after values were gathered.
    #[error(transparent)]
    Render(RenderError),
}

/// Failure to resolve a tag. Fatal for the whole render; there is no
/// partial output.
#[derive(Debug, Error)]
#[error("failed to resolve tag `{tag}`: {kind}")]
pub struct ResolveError {
    /// The tag whose resolution failed (the innermost one on recursion).
    pub tag: String,
    /// The failure reason.
    pub kind: ResolveErrorKind,
}

impl ResolveError {
    fn new(tag: &str, kind: ResolveErrorKind) -> Self {
        Self {
            tag: tag.to_string(),
            kind,
        }
    }
}

/// Resolves top-level tags for one route.
///
/// Borrowed state is process-wide read-only configuration; the resolver
/// itself holds nothing mutable.
pub struct TagResolver<'a> {
    settings: &'a Settings,
    mappings: &'a [TemplateMapping],
    controllers: &'a ControllerRegistry,
    search_dirs: Vec<PathBuf>,
}

impl<'a> TagResolver<'a> {
    /// Creates a resolver over the given route's template mappings.
    pub fn new(
        settings: &'a Settings,
        mappings: &'a [TemplateMapping],
        controllers: &'a ControllerRegistry,
    ) -> Self {
        let search_dirs = settings.search_dirs(None);
        Self {
            settings,
            mappings,
            controllers,
            search_dirs,
        }
    }

    /// Resolves a top-level tag to its fully substituted content.
    pub fn resolve(&self, tag: &str) -> Result<String, ResolveError> {
        let mut in_flight: Vec<String> = Vec::new();
        self.resolve_inner(tag, &mut in_flight)
    }

    fn resolve_inner(&self, tag: &str, in_flight: &mut Vec<String>) -> Result<String, ResolveError> {
        if in_flight.iter().any(|t| t == tag) || in_flight.len() >= MAX_RESOLVE_DEPTH {
            return Err(ResolveError::new(tag, ResolveErrorKind::CycleOrDepthExceeded));
        }
        in_flight.push(tag.to_string());
        let result = self.resolve_guarded(tag, in_flight);
        in_flight.pop();
        result
    }

    fn resolve_guarded(
        &self,
        tag: &str,
        in_flight: &mut Vec<String>,
    ) -> Result<String, ResolveError> {
        // Dispatching: exact-match mapping lookup, first match wins;
        // undeclared tags fall back to the index controller and <tag>.html.
        let (handler, file) = match self.mappings.iter().find(|m| m.tag == tag) {
            Some(mapping) => (mapping.handler.as_str(), mapping.file.clone()),
            None => (DEFAULT_HANDLER, format!("{}.html", tag)),
        };

        let controller = self
            .controllers
            .get(handler)
            .ok_or_else(|| {
                ResolveError::new(tag, ResolveErrorKind::HandlerNotCallable(handler.to_string()))
            })?;
        let mut values = controller
            .tag_values(&file, &Params::new())
            .map_err(|err| ResolveError::new(tag, ResolveErrorKind::Handler(err)))?;

        // Locating.
        let path = locate(&self.search_dirs, &file).ok_or_else(|| {
            ResolveError::new(tag, ResolveErrorKind::TemplateMissing(file.clone()))
        })?;

        // Extracting.
        let doc = TemplateDocument::read(&path)
            .map_err(|err| ResolveError::new(tag, ResolveErrorKind::Render(err)))?;

        // ResolvingChildren: every uncovered, spaceless tag resolves
        // recursively; a child failure propagates up unchanged.
        for child in doc.tags() {
            if !is_substitutable(child) || values.contains_key(child) {
                continue;
            }
            let rendered = self.resolve_inner(child, in_flight)?;
            values.insert(child.clone(), TagValue::Text(rendered));
        }

        // Done: every spaceless tag now has a value, so the missing-value
        // callback cannot fire on a well-formed document.
        let nested = TemplateNestedFormat::new(self.settings.search_dirs(None));
        render_document(&doc, &values, &nested, |t| {
            Err(RenderError::TagNotFound(t.to_string()))
        })
        .map_err(|err| ResolveError::new(tag, ResolveErrorKind::Render(err)))
    }
}
