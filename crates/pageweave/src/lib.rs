//! # Pageweave - Recursive Template Composition Framework
//!
//! Pageweave builds pages out of named template tags. A template is plain
//! markup with `{tag}` placeholders; any tag the controller does not supply
//! a value for is itself resolved as a template, recursively, until the
//! whole tree bottoms out in literal markup. Applications override any
//! framework template by shadowing its file name in their own directory.
//!
//! ## Core Concepts
//!
//! - [`Settings`]: YAML-loaded configuration, passed by reference (no
//!   ambient global state)
//! - [`TemplateMapping`]: binds a tag to a controller key and a template
//!   file, per route
//! - [`TagController`] / [`ControllerRegistry`]: typed value producers for
//!   mapped tags; unmapped tags fall back to [`IndexController`] and
//!   `<tag>.html`
//! - [`TagResolver`]: the recursive resolution engine, with cycle and
//!   depth protection
//! - [`Generator`]: one-shot component rendering with literal values
//! - [`PageView`]: title/header/body/footer page composition
//! - [`App`]: the wired application; routes requests through
//!   [`pageweave_dispatch`] and hands actions a [`RequestContext`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pageweave::{App, Settings};
//! use pageweave_dispatch::{Params, Route};
//! use pageweave_render::tag_values;
//!
//! let settings = Settings::from_yaml_file("settings.yaml")?;
//! let app = App::builder(settings)
//!     .controller_fn("home", |_file, _params| {
//!         Ok(tag_values([("header-text", "Welcome")]))
//!     })
//!     .action(Route::new("home", "index"), Vec::<String>::new(), |ctx, _args| {
//!         Ok(ctx.resolve("basepage")?)
//!     })
//!     .build();
//!
//! let html = app.handle_path("home/index", Params::new())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod app;
pub mod cli;
mod config;
pub mod console;
mod controller;
mod generator;
mod mapping;
mod page;
mod resolver;

pub use app::{App, AppBuilder, Engine, RequestContext};
pub use config::{ConfigError, Settings, TEMPLATE_LIBRARY_MARKER};
pub use controller::{
    ControllerRegistry, FnTagController, IndexController, TagController, DEFAULT_HANDLER,
};
pub use generator::{Generator, TemplateNestedFormat};
pub use mapping::{RouteConfig, RouteTable, TemplateMapping};
pub use page::PageView;
pub use resolver::{ResolveError, ResolveErrorKind, TagResolver, MAX_RESOLVE_DEPTH};

pub use pageweave_dispatch as dispatch;
pub use pageweave_render as render;
