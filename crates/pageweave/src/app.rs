//! Application wiring.
//!
//! [`App`] ties the two halves of the framework together: the template
//! engine (settings, route table, controller registry) and the request
//! dispatcher. Construction goes through [`AppBuilder`]; the built app is
//! immutable and shared read-only across requests.
//!
//! # Example
//!
//! ```rust,no_run
//! use pageweave::{App, Settings};
//! use pageweave_dispatch::{Params, Route};
//!
//! let settings = Settings::from_yaml_file("settings.yaml")?;
//! let app = App::builder(settings)
//!     .action(Route::new("home", "index"), ["name"], |ctx, args| {
//!         let _ = args;
//!         Ok(ctx.resolve("basepage")?)
//!     })
//!     .build();
//!
//! let mut params = Params::new();
//! params.insert("name", "World");
//! let html = app.handle_path("home/index", params)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::sync::Arc;

use pageweave_dispatch::{
    AccessRecord, ArgSpecValidator, DispatchError, Dispatcher, Hooks, HtmlEscape, Params, Route,
};

use crate::config::Settings;
use crate::controller::ControllerRegistry;
use crate::generator::Generator;
use crate::mapping::RouteTable;
use crate::resolver::{ResolveError, TagResolver};

/// The template side of a running application.
///
/// Owns the settings, the route table, and the controller registry, and
/// hands out per-route resolvers over them.
pub struct Engine {
    settings: Settings,
    routes: RouteTable,
    controllers: ControllerRegistry,
}

impl Engine {
    /// Builds the engine from loaded settings and registered controllers.
    pub fn new(settings: Settings, controllers: ControllerRegistry) -> Self {
        let routes = RouteTable::from_configs(settings.routes.clone());
        Self {
            settings,
            routes,
            controllers,
        }
    }

    /// The application settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// A component generator over the configured template directories.
    pub fn generator(&self) -> Generator<'_> {
        Generator::new(&self.settings)
    }

    /// A tag resolver scoped to the given route's template mappings.
    ///
    /// Routes without configured mappings still resolve: every tag then
    /// goes through the default-fallback path.
    pub fn resolver_for(&self, route: &Route) -> TagResolver<'_> {
        let mappings = self
            .routes
            .get(route)
            .map(|config| config.templates.as_slice())
            .unwrap_or(&[]);
        TagResolver::new(&self.settings, mappings, &self.controllers)
    }
}

/// Per-request view of the engine, handed to action closures.
pub struct RequestContext {
    engine: Arc<Engine>,
    route: Route,
}

impl RequestContext {
    /// The route being served.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// The application settings.
    pub fn settings(&self) -> &Settings {
        self.engine.settings()
    }

    /// Resolves a top-level tag under this request's route mappings.
    pub fn resolve(&self, tag: &str) -> Result<String, ResolveError> {
        self.engine.resolver_for(&self.route).resolve(tag)
    }

    /// A component generator over the configured template directories.
    pub fn generator(&self) -> Generator<'_> {
        self.engine.generator()
    }
}

type ActionFn = Arc<dyn Fn(&RequestContext, &[&str]) -> anyhow::Result<String> + Send + Sync>;

/// A fully wired application.
pub struct App {
    engine: Arc<Engine>,
    dispatcher: Dispatcher,
}

impl App {
    /// Starts building an application over the given settings.
    pub fn builder(settings: Settings) -> AppBuilder {
        AppBuilder {
            settings,
            controllers: ControllerRegistry::new(),
            actions: Vec::new(),
        }
    }

    /// The template engine.
    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    /// Serves one request.
    pub fn handle(&self, route: &Route, params: Params) -> Result<String, DispatchError> {
        self.dispatcher.dispatch(route, params)
    }

    /// Serves one request addressed as `"controller/action"`.
    pub fn handle_path(&self, path: &str, params: Params) -> Result<String, DispatchError> {
        let route = Route::parse(path)?;
        self.dispatcher.dispatch(&route, params)
    }
}

/// Builder for [`App`].
pub struct AppBuilder {
    settings: Settings,
    controllers: ControllerRegistry,
    actions: Vec<(Route, Vec<String>, ActionFn)>,
}

impl AppBuilder {
    /// Replaces the controller registry wholesale.
    pub fn controllers(mut self, controllers: ControllerRegistry) -> Self {
        self.controllers = controllers;
        self
    }

    /// Registers a tag controller under a key referenced by template
    /// mappings.
    pub fn controller(
        mut self,
        key: impl Into<String>,
        controller: Arc<dyn crate::controller::TagController>,
    ) -> Self {
        self.controllers.register(key, controller);
        self
    }

    /// Registers a closure tag controller.
    pub fn controller_fn<F>(mut self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &Params) -> anyhow::Result<pageweave_render::TagValues>
            + Send
            + Sync
            + 'static,
    {
        self.controllers.register_fn(key, f);
        self
    }

    /// Binds an action to a route.
    ///
    /// `expected_params` declares the exact parameter names the action
    /// takes; requests with a different key set are rejected before the
    /// action runs. The action receives values positionally in sorted key
    /// order.
    pub fn action<F>(
        mut self,
        route: Route,
        expected_params: impl IntoIterator<Item = impl Into<String>>,
        f: F,
    ) -> Self
    where
        F: Fn(&RequestContext, &[&str]) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        let expected = expected_params.into_iter().map(Into::into).collect();
        self.actions.push((route, expected, Arc::new(f)));
        self
    }

    /// Wires everything into an [`App`].
    pub fn build(self) -> App {
        let log_access = self.settings.log_access;
        let sanitize_response = self.settings.sanitize_response;
        let input_kinds = self.settings.input_kinds.clone();
        let engine = Arc::new(Engine::new(self.settings, self.controllers));

        let mut builder = Dispatcher::builder().validator(Arc::new(ArgSpecValidator));
        for (key, kind) in input_kinds {
            builder = builder.input_kind(key, kind);
        }
        if sanitize_response {
            builder = builder.sanitizer(Arc::new(HtmlEscape));
        }
        if log_access {
            builder = builder.hooks(Hooks::new().post_dispatch(log_access_line));
        }
        for (route, expected, action) in self.actions {
            let engine = engine.clone();
            let bound_route = route.clone();
            builder = builder.route_fn(route, expected, move |args| {
                let ctx = RequestContext {
                    engine: engine.clone(),
                    route: bound_route.clone(),
                };
                action(&ctx, args)
            });
        }

        App {
            engine,
            dispatcher: builder.build(),
        }
    }
}

fn log_access_line(record: &AccessRecord<'_>) {
    eprintln!(
        "access route={} bytes={} elapsed_ms={}",
        record.route,
        record.response.len(),
        record.elapsed.as_millis()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageweave_render::tag_values;
    use std::fs;
    use tempfile::TempDir;

    fn settings(app: &TempDir, fw: &TempDir) -> Settings {
        let yaml = format!(
            r#"
app_name: test
app_template_dir: {}
fw_template_dir: {}/{{template_library}}
routes:
  - controller: home
    action: index
    templates:
      - {{ tag: header, handler: home, file: header.html }}
"#,
            app.path().display(),
            fw.path().display()
        );
        serde_yaml::from_str(&yaml).unwrap()
    }

    fn fixture() -> (TempDir, TempDir, Settings) {
        let app = TempDir::new().unwrap();
        let fw = TempDir::new().unwrap();
        fs::create_dir_all(fw.path().join("default")).unwrap();
        let settings = settings(&app, &fw);
        (app, fw, settings)
    }

    #[test]
    fn test_end_to_end_dispatch_and_resolve() {
        let (app_dir, _fw, settings) = fixture();
        fs::write(app_dir.path().join("basepage.html"), "{header}{footer}").unwrap();
        fs::write(app_dir.path().join("header.html"), "<h1>{header-text}</h1>").unwrap();
        fs::write(app_dir.path().join("footer.html"), "<p>bye</p>").unwrap();

        let app = App::builder(settings)
            .controller_fn("home", |_, _| Ok(tag_values([("header-text", "Welcome")])))
            .action(Route::new("home", "index"), Vec::<String>::new(), |ctx, _| {
                Ok(ctx.resolve("basepage")?)
            })
            .build();

        let html = app.handle_path("home/index", Params::new()).unwrap();
        assert_eq!(html, "<h1>Welcome</h1><p>bye</p>");
    }

    #[test]
    fn test_unbound_route_rejected() {
        let (_app, _fw, settings) = fixture();
        let app = App::builder(settings).build();

        let err = app.handle(&Route::new("no", "where"), Params::new()).unwrap_err();
        assert!(matches!(err, DispatchError::RouteNotCallable(_)));
    }

    #[test]
    fn test_bad_path_shape_rejected() {
        let (_app, _fw, settings) = fixture();
        let app = App::builder(settings).build();

        let err = app.handle_path("home/index/extra", Params::new()).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidRoute(_)));
    }

    #[test]
    fn test_parameter_set_must_match() {
        let (_app, _fw, settings) = fixture();
        let app = App::builder(settings)
            .action(Route::new("home", "index"), ["name"], |_, args| {
                Ok(args[0].to_string())
            })
            .build();

        let err = app.handle_path("home/index", Params::new()).unwrap_err();
        assert!(matches!(err, DispatchError::Validation(_)));

        let params: Params = [("name", "World")].into_iter().collect();
        assert_eq!(app.handle_path("home/index", params).unwrap(), "World");
    }

    #[test]
    fn test_response_sanitization_toggle() {
        let (_app, _fw, mut settings) = fixture();
        settings.sanitize_response = true;
        let app = App::builder(settings)
            .action(Route::new("home", "index"), Vec::<String>::new(), |_, _| {
                Ok("<b>raw</b>".to_string())
            })
            .build();

        let html = app.handle_path("home/index", Params::new()).unwrap();
        assert_eq!(html, "&lt;b&gt;raw&lt;/b&gt;");
    }

    #[test]
    fn test_context_generator_uses_configured_dirs() {
        let (app_dir, _fw, settings) = fixture();
        fs::write(app_dir.path().join("card.html"), "[{body}]").unwrap();

        let app = App::builder(settings)
            .action(Route::new("home", "index"), Vec::<String>::new(), |ctx, _| {
                Ok(ctx.generator().generate("card", &tag_values([("body", "x")]))?)
            })
            .build();

        assert_eq!(app.handle_path("home/index", Params::new()).unwrap(), "[x]");
    }
}
