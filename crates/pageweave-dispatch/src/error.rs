//! Error type for the dispatch pipeline.

use thiserror::Error;

use crate::hooks::HookError;
use crate::validate::ValidationError;

/// Error for a single dispatched request.
///
/// Every variant aborts the whole dispatch; there is no partial-content
/// fallback. The dispatcher's caller translates these into a generic error
/// response (a "not found" or "internal error" page); that translation is
/// outside this crate.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No handler is bound to the route, a configuration fault.
    #[error("no handler bound to route {0}")]
    RouteNotCallable(String),

    /// The route path could not be parsed as `controller/action`.
    #[error("invalid route path: {0}")]
    InvalidRoute(String),

    /// Parameter or return-value validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A pre-dispatch hook aborted the request.
    #[error(transparent)]
    Hook(#[from] HookError),

    /// The handler itself failed.
    #[error("handler failed for route {route}: {source}")]
    Handler {
        /// The route whose handler failed.
        route: String,
        /// The handler's error.
        #[source]
        source: anyhow::Error,
    },
}
