//! Plugin configuration
//!
//! Two sources select the backend: the protoc plugin parameter
//! (`--protorpc_out=backend=NAME:out`) and the `--backend` flag or
//! `PROTORPC_BACKEND` variable. The parameter wins; with neither, the first
//! registered backend is used.

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "protoc-gen-protorpc",
    version,
    about = "protoc plugin generating protorpc service traits and clients"
)]
pub struct Cli {
    /// Backend to generate with (default: first registered)
    #[arg(long, env = "PROTORPC_BACKEND")]
    pub backend: Option<String>,

    /// Print registered backend names and exit
    #[arg(long)]
    pub list_backends: bool,

    /// Log output format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Human, env = "PROTORPC_LOG_FORMAT")]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Human,
    Json,
}

/// Options carried in the protoc plugin parameter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginOptions {
    pub backend: Option<String>,
}

impl PluginOptions {
    /// Parse comma-separated `key=value` pairs. A bare value names the
    /// backend; unknown keys are ignored with a warning.
    pub fn parse(parameter: Option<&str>) -> Self {
        let mut options = Self::default();
        let Some(parameter) = parameter else {
            return options;
        };

        for part in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.split_once('=') {
                Some(("backend", value)) => {
                    let value = value.trim();
                    options.backend = (!value.is_empty()).then(|| value.to_string());
                }
                Some((key, _)) => {
                    tracing::warn!(key = key, "ignoring unknown plugin parameter");
                }
                None => options.backend = Some(part.to_string()),
            }
        }

        options
    }

    /// Backend name to select, honoring precedence
    pub fn backend_name<'a>(&'a self, cli: &'a Cli) -> Option<&'a str> {
        let set = |name: &'a Option<String>| name.as_deref().filter(|n| !n.is_empty());
        set(&self.backend).or(set(&cli.backend))
    }
}
