//! Hook points around handler execution.
//!
//! Hooks carry the cross-cutting concerns of the dispatch pipeline (access
//! logging, profiling, per-request setup) without polluting handler logic.
//!
//! # Pipeline Position
//!
//! ```text
//! route + sanitized parameters
//!   → PRE-DISPATCH HOOKS ← (setup, auth checks; may abort)
//!   → parameter validation
//!   → handler
//!   → return-value validation, response sanitization
//!   → POST-DISPATCH HOOKS ← (access logging, profiling; side effects only)
//! ```
//!
//! Pre-dispatch hooks may abort the request by returning a [`HookError`].
//! Post-dispatch hooks observe the finished request (route, response, and
//! elapsed wall time) and can never alter the response or control flow.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::params::Params;
use crate::route::Route;

/// The phase at which a hook error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPhase {
    /// Before parameter validation and handler invocation.
    PreDispatch,
}

impl fmt::Display for HookPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HookPhase::PreDispatch => write!(f, "pre-dispatch"),
        }
    }
}

/// Error raised by a hook, aborting the request.
#[derive(Debug, Error)]
#[error("{phase} hook failed: {message}")]
pub struct HookError {
    /// The phase the failing hook ran in.
    pub phase: HookPhase,
    /// The hook's own description of the failure.
    pub message: String,
}

impl HookError {
    /// Creates a pre-dispatch hook error with the given message.
    pub fn pre_dispatch(message: impl Into<String>) -> Self {
        Self {
            phase: HookPhase::PreDispatch,
            message: message.into(),
        }
    }
}

/// A completed request, as observed by post-dispatch hooks.
#[derive(Debug, Clone)]
pub struct AccessRecord<'a> {
    /// The dispatched route.
    pub route: &'a Route,
    /// The final (validated, possibly sanitized) response.
    pub response: &'a str,
    /// Wall-clock time spent in validation and the handler.
    pub elapsed: Duration,
}

/// Hook fired before dispatch; may abort the request.
pub type PreDispatchFn = Arc<dyn Fn(&Route, &Params) -> Result<(), HookError> + Send + Sync>;

/// Hook fired after a successful dispatch; side effects only.
pub type PostDispatchFn = Arc<dyn Fn(&AccessRecord<'_>) + Send + Sync>;

/// An ordered collection of dispatch hooks.
///
/// # Example
///
/// ```rust
/// use pageweave_dispatch::Hooks;
///
/// let hooks = Hooks::new()
///     .pre_dispatch(|route, _params| {
///         if route.controller == "admin" {
///             return Err(pageweave_dispatch::HookError::pre_dispatch("admin disabled"));
///         }
///         Ok(())
///     })
///     .post_dispatch(|record| {
///         eprintln!("{} served {} bytes in {:?}",
///             record.route, record.response.len(), record.elapsed);
///     });
/// assert!(!hooks.is_empty());
/// ```
#[derive(Default, Clone)]
pub struct Hooks {
    pre: Vec<PreDispatchFn>,
    post: Vec<PostDispatchFn>,
}

impl Hooks {
    /// Creates an empty hook set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pre-dispatch hook. Hooks run in registration order.
    pub fn pre_dispatch<F>(mut self, f: F) -> Self
    where
        F: Fn(&Route, &Params) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.pre.push(Arc::new(f));
        self
    }

    /// Appends a post-dispatch hook. Hooks run in registration order.
    pub fn post_dispatch<F>(mut self, f: F) -> Self
    where
        F: Fn(&AccessRecord<'_>) + Send + Sync + 'static,
    {
        self.post.push(Arc::new(f));
        self
    }

    /// Returns true if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.pre.is_empty() && self.post.is_empty()
    }

    /// Runs all pre-dispatch hooks; the first error aborts.
    pub fn run_pre(&self, route: &Route, params: &Params) -> Result<(), HookError> {
        for hook in &self.pre {
            hook(route, params)?;
        }
        Ok(())
    }

    /// Runs all post-dispatch hooks.
    pub fn run_post(&self, record: &AccessRecord<'_>) {
        for hook in &self.post {
            hook(record);
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("pre", &self.pre.len())
            .field("post", &self.post.len())
            .finish()
    }
}
