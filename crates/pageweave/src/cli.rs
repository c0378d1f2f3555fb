//! Command-line front end.
//!
//! Two maintenance commands over a settings file: `resolve` materializes a
//! top-level tag exactly as a request for the owning route would, and
//! `render` substitutes literal values into one component template. Both
//! run without registered application controllers, so mapped tags whose
//! handler is not the default fall back to failing fast, which is the
//! point: the CLI is for inspecting template trees, not serving requests.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;

use pageweave_dispatch::Route;
use pageweave_render::{TagValue, TagValues};

use crate::app::Engine;
use crate::config::Settings;
use crate::controller::ControllerRegistry;

#[derive(Debug, Parser)]
#[command(name = "pageweave", version, about = "Template tree inspection for pageweave apps")]
pub struct Cli {
    /// Path to the settings YAML file.
    #[arg(short, long, default_value = "settings.yaml")]
    pub settings: PathBuf,

    /// Emit a JSON envelope instead of plain output.
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Recursively resolve a top-level tag.
    Resolve {
        /// The tag to resolve.
        tag: String,

        /// Route whose template mappings apply, as "controller/action".
        #[arg(short, long, default_value = "home/index")]
        route: String,
    },

    /// Render one component template with literal values.
    Render {
        /// Component name; ".html" is appended when absent.
        component: String,

        /// Tag values as key=value pairs.
        values: Vec<String>,

        /// Template library override.
        #[arg(long)]
        library: Option<String>,
    },
}

/// Runs a parsed command and returns its plain-text output.
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let settings = Settings::from_yaml_file(&cli.settings)?;
    let engine = Engine::new(settings, ControllerRegistry::new());

    match &cli.command {
        Command::Resolve { tag, route } => {
            let route = Route::parse(route)?;
            Ok(engine.resolver_for(&route).resolve(tag)?)
        }
        Command::Render {
            component,
            values,
            library,
        } => {
            let values = parse_values(values)?;
            let file = if component.contains(".html") {
                component.clone()
            } else {
                format!("{}.html", component)
            };
            Ok(engine
                .generator()
                .generate_template(&file, Some(&values), library.as_deref())?)
        }
    }
}

/// Wraps command output in the JSON envelope used with `--json`.
pub fn json_envelope(result: &anyhow::Result<String>) -> String {
    let envelope = match result {
        Ok(output) => json!({ "ok": true, "output": output }),
        Err(err) => json!({ "ok": false, "error": format!("{:#}", err) }),
    };
    envelope.to_string()
}

fn parse_values(pairs: &[String]) -> anyhow::Result<TagValues> {
    let mut values = TagValues::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("value `{}` is not of the form key=value", pair))?;
        values.insert(key.to_string(), TagValue::Text(value.to_string()));
    }
    Ok(values)
}
