//! Application settings.
//!
//! [`Settings`] is the configuration collaborator of the framework: the
//! route/template-mapping table, template directory paths, the active
//! template library, and the pipeline toggles. It is deserialized once at
//! startup (YAML) and passed by reference to the engine, the resolver, and
//! the dispatcher; there is no ambient global configuration.
//!
//! # Example settings file
//!
//! ```yaml
//! app_name: Hello World
//! app_template_dir: ./ui/templates
//! fw_template_dir: ./framework/templates/{template_library}
//! template_library: default
//! sanitize_response: false
//! log_access: true
//! input_kinds:
//!   redirect_url: url
//! routes:
//!   - controller: home
//!     action: index
//!     templates:
//!       - { tag: header, handler: home, file: header.html }
//!       - { tag: footer, handler: home, file: footer.html }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use pageweave_dispatch::TextKind;

use crate::mapping::RouteConfig;

/// Marker substituted in `fw_template_dir` with the active template library.
pub const TEMPLATE_LIBRARY_MARKER: &str = "{template_library}";

/// Error loading or parsing a settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("could not read settings file {path}: {source}")]
    Io {
        /// The offending path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid YAML for [`Settings`].
    #[error("could not parse settings file {path}: {source}")]
    Parse {
        /// The offending path.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Process-wide, read-only application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Human-readable application name, used in error pages and logs.
    pub app_name: String,

    /// The application's own template directory, searched first.
    pub app_template_dir: PathBuf,

    /// The framework's shared template directory. May embed
    /// `{template_library}`, replaced with the active library name.
    pub fw_template_dir: String,

    /// The active template library.
    #[serde(default = "default_library")]
    pub template_library: String,

    /// Sanitize the final response through [`HtmlEscape`](pageweave_dispatch::HtmlEscape).
    #[serde(default)]
    pub sanitize_response: bool,

    /// Record an access-log line (with elapsed time) after each dispatch.
    #[serde(default)]
    pub log_access: bool,

    /// Declared input kinds for request parameters; undeclared parameters
    /// are sanitized as plain text.
    #[serde(default)]
    pub input_kinds: HashMap<String, TextKind>,

    /// The route table: template mappings per `(controller, action)`.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

fn default_library() -> String {
    "default".to_string()
}

impl Settings {
    /// Loads settings from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The framework template directory for the given library, or for the
    /// configured one when `library` is `None`.
    pub fn fw_template_dir_for(&self, library: Option<&str>) -> PathBuf {
        let library = library.unwrap_or(&self.template_library);
        PathBuf::from(self.fw_template_dir.replace(TEMPLATE_LIBRARY_MARKER, library))
    }

    /// The ordered template search directories: the application directory
    /// first, then the framework directory, so applications override
    /// framework defaults.
    pub fn search_dirs(&self, library: Option<&str>) -> Vec<PathBuf> {
        vec![
            self.app_template_dir.clone(),
            self.fw_template_dir_for(library),
        ]
    }
}
