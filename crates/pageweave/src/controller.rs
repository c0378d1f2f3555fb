//! Tag controllers and the controller registry.
//!
//! A [`TagController`] produces the replacement values for the tags of one
//! template file. Controllers are registered under string keys referenced
//! by [`TemplateMapping`](crate::TemplateMapping) entries; a mapping naming
//! an unregistered key is a configuration fault and fails fast with
//! `HandlerNotCallable`, never treated as "no values".

use std::collections::HashMap;
use std::sync::Arc;

use pageweave_dispatch::Params;
use pageweave_render::TagValues;

/// Registry key of the default fallback controller.
///
/// Tags without a template mapping resolve through this controller against
/// the file `<tag>.html`, so leaf templates need no registration.
pub const DEFAULT_HANDLER: &str = "index";

/// Produces tag replacement values for a template file.
pub trait TagController: Send + Sync {
    /// Returns the tag values for the given template file.
    ///
    /// `params` is empty for resolver-initiated calls; controllers invoked
    /// from request handlers may receive request parameters.
    fn tag_values(&self, file: &str, params: &Params) -> anyhow::Result<TagValues>;
}

/// The default controller: supplies no values.
///
/// Every tag in the backing file is then resolved recursively, which is
/// exactly what undeclared composite templates want.
pub struct IndexController;

impl TagController for IndexController {
    fn tag_values(&self, _file: &str, _params: &Params) -> anyhow::Result<TagValues> {
        Ok(TagValues::new())
    }
}

/// A [`TagController`] wrapper for plain closures.
///
/// # Example
///
/// ```rust
/// use pageweave::{FnTagController, TagController};
/// use pageweave_dispatch::Params;
/// use pageweave_render::tag_values;
///
/// let home = FnTagController::new(|_file, _params| {
///     Ok(tag_values([("header-text", "Welcome")]))
/// });
/// let values = home.tag_values("header.html", &Params::new()).unwrap();
/// assert_eq!(values["header-text"].as_text(), Some("Welcome"));
/// ```
pub struct FnTagController<F> {
    f: F,
}

impl<F> FnTagController<F>
where
    F: Fn(&str, &Params) -> anyhow::Result<TagValues> + Send + Sync,
{
    /// Wraps the given closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> TagController for FnTagController<F>
where
    F: Fn(&str, &Params) -> anyhow::Result<TagValues> + Send + Sync,
{
    fn tag_values(&self, file: &str, params: &Params) -> anyhow::Result<TagValues> {
        (self.f)(file, params)
    }
}

/// Registry mapping controller keys to [`TagController`] instances.
///
/// Created once at startup; shared read-only across requests. The default
/// [`IndexController`] is pre-registered under [`DEFAULT_HANDLER`].
#[derive(Clone)]
pub struct ControllerRegistry {
    map: HashMap<String, Arc<dyn TagController>>,
}

impl ControllerRegistry {
    /// Creates a registry containing only the default index controller.
    pub fn new() -> Self {
        let mut map: HashMap<String, Arc<dyn TagController>> = HashMap::new();
        map.insert(DEFAULT_HANDLER.to_string(), Arc::new(IndexController));
        Self { map }
    }

    /// Registers a controller, replacing any existing entry for the key.
    pub fn register(&mut self, key: impl Into<String>, controller: Arc<dyn TagController>) {
        self.map.insert(key.into(), controller);
    }

    /// Registers a closure controller.
    pub fn register_fn<F>(&mut self, key: impl Into<String>, f: F)
    where
        F: Fn(&str, &Params) -> anyhow::Result<TagValues> + Send + Sync + 'static,
    {
        self.register(key, Arc::new(FnTagController::new(f)));
    }

    /// Looks up a controller by key.
    pub fn get(&self, key: &str) -> Option<&Arc<dyn TagController>> {
        self.map.get(key)
    }

    /// Returns true if a controller is registered under the key.
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }
}

impl Default for ControllerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageweave_render::tag_values;

    #[test]
    fn test_index_controller_is_preregistered() {
        let registry = ControllerRegistry::new();
        let controller = registry.get(DEFAULT_HANDLER).unwrap();
        let values = controller
            .tag_values("anything.html", &Params::new())
            .unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ControllerRegistry::new();
        registry.register_fn("home", |_, _| Ok(tag_values([("title", "Home")])));

        assert!(registry.contains("home"));
        let values = registry
            .get("home")
            .unwrap()
            .tag_values("page.html", &Params::new())
            .unwrap();
        assert_eq!(values["title"].as_text(), Some("Home"));
    }

    #[test]
    fn test_unregistered_key() {
        let registry = ControllerRegistry::new();
        assert!(registry.get("missing").is_none());
    }
}
