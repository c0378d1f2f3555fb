//! Route resolution, validation, and handler dispatch.
//!
//! `pageweave-dispatch` owns the request pipeline of the pageweave
//! framework: mapping a `(controller, action)` route to the single handler
//! bound to it, sanitizing and validating parameters, invoking the handler,
//! and validating and optionally sanitizing its response. It knows nothing
//! about templates; the facade crate wires handlers to the tag resolver.
//!
//! # Pipeline
//!
//! ```text
//! Route + Params
//!   → input sanitization (per declared TextKind)
//!   → pre-dispatch hooks
//!   → Validator::validate_parameters
//!   → handler(args sorted lexicographically by key)
//!   → Validator::validate_return
//!   → Sanitizer::sanitize (when enabled)
//!   → post-dispatch hooks (access log / profiling)
//! ```
//!
//! # Positional Convention
//!
//! Handlers receive parameter values positionally, ordered by key name.
//! A handler's argument order must match the sorted key order of the
//! parameters it is called with; [`validate::ArgSpecValidator`] exists to
//! catch mismatches before an argument silently shifts.
//!
//! # Error Policy
//!
//! Every failure aborts the whole request; there is no partial-content
//! fallback. An unbound route and an unregistered controller are treated
//! the same way: fail fast, never retry.

mod dispatcher;
mod error;
mod hooks;
mod params;
mod route;
pub mod sanitize;
pub mod validate;

pub use dispatcher::{Dispatcher, DispatcherBuilder, FnRouteHandler, RouteHandler};
pub use error::DispatchError;
pub use hooks::{AccessRecord, HookError, HookPhase, Hooks, PostDispatchFn, PreDispatchFn};
pub use params::Params;
pub use route::Route;
pub use sanitize::{sanitize_text, HtmlEscape, Sanitizer, TextKind};
pub use validate::{ArgSpecValidator, MethodSignature, NoopValidator, ValidationError, Validator};
