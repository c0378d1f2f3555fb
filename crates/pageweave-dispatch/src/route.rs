//! Route identification.
//!
//! A [`Route`] is the `(controller, action)` pair identifying a request's
//! target. It maps to exactly one handler in the dispatcher and, at the
//! resolver layer, to a list of template mappings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// The `(controller, action)` pair identifying a request target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    /// The controller segment, e.g. `"home"`.
    pub controller: String,
    /// The action segment, e.g. `"index"`.
    pub action: String,
}

impl Route {
    /// Creates a route from its two segments.
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
        }
    }

    /// Parses a `"controller/action"` path.
    ///
    /// Leading slashes are tolerated; anything other than exactly two
    /// non-empty segments is an error.
    pub fn parse(path: &str) -> Result<Self, DispatchError> {
        let trimmed = path.trim_start_matches('/');
        let mut parts = trimmed.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(controller), Some(action), None)
                if !controller.is_empty() && !action.is_empty() =>
            {
                Ok(Self::new(controller, action))
            }
            _ => Err(DispatchError::InvalidRoute(path.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.controller, self.action)
    }
}
