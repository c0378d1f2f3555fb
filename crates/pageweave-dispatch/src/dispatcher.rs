//! The request dispatcher.
//!
//! [`Dispatcher`] maps an incoming route to the single handler bound to it,
//! sanitizes and validates the parameters, invokes the handler, validates
//! the return value, and optionally sanitizes the response. Handlers
//! receive parameter values positionally in lexicographic key order (see
//! [`Params::ordered_values`]).
//!
//! # Example
//!
//! ```rust
//! use pageweave_dispatch::{Dispatcher, Params, Route};
//!
//! let dispatcher = Dispatcher::builder()
//!     .route_fn(Route::new("home", "index"), ["name"], |args| {
//!         Ok(format!("<h1>Hello {}</h1>", args[0]))
//!     })
//!     .build();
//!
//! let mut params = Params::new();
//! params.insert("name", "World");
//! let html = dispatcher.dispatch(&Route::new("home", "index"), params).unwrap();
//! assert_eq!(html, "<h1>Hello World</h1>");
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::error::DispatchError;
use crate::hooks::{AccessRecord, Hooks};
use crate::params::Params;
use crate::route::Route;
use crate::sanitize::{sanitize_text, Sanitizer, TextKind};
use crate::validate::{MethodSignature, NoopValidator, Validator};

/// A handler bound to a route.
///
/// Handlers take `&self`; the dispatcher is shared read-only across
/// concurrently served requests, so any mutable handler state must use
/// interior mutability.
pub trait RouteHandler: Send + Sync {
    /// Invokes the handler with parameter values in sorted key order.
    fn call(&self, args: &[&str]) -> anyhow::Result<String>;
}

/// A [`RouteHandler`] wrapper for plain closures.
pub struct FnRouteHandler<F> {
    f: F,
}

impl<F> FnRouteHandler<F>
where
    F: Fn(&[&str]) -> anyhow::Result<String> + Send + Sync,
{
    /// Wraps the given closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> RouteHandler for FnRouteHandler<F>
where
    F: Fn(&[&str]) -> anyhow::Result<String> + Send + Sync,
{
    fn call(&self, args: &[&str]) -> anyhow::Result<String> {
        (self.f)(args)
    }
}

struct Binding {
    handler: Arc<dyn RouteHandler>,
    signature: MethodSignature,
}

/// Maps routes to handlers and runs the request pipeline.
pub struct Dispatcher {
    bindings: HashMap<Route, Binding>,
    validator: Arc<dyn Validator>,
    sanitizer: Option<Arc<dyn Sanitizer>>,
    input_kinds: HashMap<String, TextKind>,
    hooks: Hooks,
}

impl Dispatcher {
    /// Starts building a dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// Dispatches a single request.
    ///
    /// Pipeline: input sanitization → pre-dispatch hooks → parameter
    /// validation → handler → return-value validation → response
    /// sanitization → post-dispatch hooks. The first failure aborts the
    /// whole request.
    pub fn dispatch(&self, route: &Route, mut params: Params) -> Result<String, DispatchError> {
        let binding = self
            .bindings
            .get(route)
            .ok_or_else(|| DispatchError::RouteNotCallable(route.to_string()))?;

        params.map_values(|key, value| {
            let kind = self.input_kinds.get(key).copied().unwrap_or_default();
            sanitize_text(value, kind)
        });

        self.hooks.run_pre(route, &params)?;

        let started = Instant::now();
        self.validator
            .validate_parameters(&binding.signature, &params)?;

        let args = params.ordered_values();
        let response = binding
            .handler
            .call(&args)
            .map_err(|source| DispatchError::Handler {
                route: route.to_string(),
                source,
            })?;

        self.validator
            .validate_return(&binding.signature, &response)?;

        let response = match &self.sanitizer {
            Some(sanitizer) => sanitizer.sanitize(&response),
            None => response,
        };

        self.hooks.run_post(&AccessRecord {
            route,
            response: &response,
            elapsed: started.elapsed(),
        });

        Ok(response)
    }

    /// Returns true if a handler is bound to the route.
    pub fn is_bound(&self, route: &Route) -> bool {
        self.bindings.contains_key(route)
    }
}

/// Builder for [`Dispatcher`].
#[derive(Default)]
pub struct DispatcherBuilder {
    bindings: HashMap<Route, Binding>,
    validator: Option<Arc<dyn Validator>>,
    sanitizer: Option<Arc<dyn Sanitizer>>,
    input_kinds: HashMap<String, TextKind>,
    hooks: Hooks,
}

impl DispatcherBuilder {
    /// Binds a handler to a route, declaring its expected parameter names.
    pub fn route(
        mut self,
        route: Route,
        expected_params: impl IntoIterator<Item = impl Into<String>>,
        handler: Arc<dyn RouteHandler>,
    ) -> Self {
        let signature = MethodSignature::new(route.clone(), expected_params);
        self.bindings.insert(route, Binding { handler, signature });
        self
    }

    /// Binds a closure to a route.
    pub fn route_fn<F>(
        self,
        route: Route,
        expected_params: impl IntoIterator<Item = impl Into<String>>,
        f: F,
    ) -> Self
    where
        F: Fn(&[&str]) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.route(route, expected_params, Arc::new(FnRouteHandler::new(f)))
    }

    /// Sets the validator collaborator. Defaults to [`NoopValidator`].
    pub fn validator(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Enables response sanitization through the given collaborator.
    pub fn sanitizer(mut self, sanitizer: Arc<dyn Sanitizer>) -> Self {
        self.sanitizer = Some(sanitizer);
        self
    }

    /// Declares the input kind of a parameter for input sanitization.
    pub fn input_kind(mut self, key: impl Into<String>, kind: TextKind) -> Self {
        self.input_kinds.insert(key.into(), kind);
        self
    }

    /// Sets the dispatch hooks.
    pub fn hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Builds the dispatcher.
    pub fn build(self) -> Dispatcher {
        Dispatcher {
            bindings: self.bindings,
            validator: self.validator.unwrap_or_else(|| Arc::new(NoopValidator)),
            sanitizer: self.sanitizer,
            input_kinds: self.input_kinds,
            hooks: self.hooks,
        }
    }
}
