//! Route and template mapping configuration.
//!
//! A [`TemplateMapping`] binds a tag name to the controller that supplies
//! its values and the template file that defines its structure. Mappings
//! are grouped per route in a [`RouteConfig`]; lookup is by exact tag-name
//! match, first match wins (insertion order). Both are loaded once at
//! configuration time and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use pageweave_dispatch::Route;

/// Binds a tag to its value-producing controller and backing template file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMapping {
    /// The tag name this mapping answers for (exact match).
    pub tag: String,
    /// The registry key of the controller that produces the tag's values.
    pub handler: String,
    /// The template file that defines the tag's structure.
    pub file: String,
}

/// Per-route configuration: the template mappings active for that route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Route controller segment.
    pub controller: String,
    /// Route action segment.
    pub action: String,
    /// Template mappings, consulted in insertion order.
    #[serde(default)]
    pub templates: Vec<TemplateMapping>,
}

impl RouteConfig {
    /// The route this configuration applies to.
    pub fn route(&self) -> Route {
        Route::new(self.controller.clone(), self.action.clone())
    }

    /// Finds the first mapping whose tag matches exactly.
    pub fn mapping_for(&self, tag: &str) -> Option<&TemplateMapping> {
        self.templates.iter().find(|m| m.tag == tag)
    }
}

/// The route table, built once from [`Settings`](crate::Settings).
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    configs: HashMap<Route, RouteConfig>,
}

impl RouteTable {
    /// Builds the table from per-route configurations.
    ///
    /// A later configuration for the same route replaces an earlier one.
    pub fn from_configs(configs: impl IntoIterator<Item = RouteConfig>) -> Self {
        let configs = configs
            .into_iter()
            .map(|c| (c.route(), c))
            .collect();
        Self { configs }
    }

    /// The configuration for a route, if any.
    pub fn get(&self, route: &Route) -> Option<&RouteConfig> {
        self.configs.get(route)
    }

    /// Number of configured routes.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Returns true if no routes are configured.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}
