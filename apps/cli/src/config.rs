//! Layered CLI configuration: defaults, then `depwarn.toml`, then
//! `DEPWARN_*` environment variables, then command-line flags.

use std::path::Path;

use anyhow::{Context, bail};
use depwarn::AnnotationPolicy;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "depwarn.toml";

/// How warnings are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<path>: <message>` per line.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub output: OutputFormat,
    pub policy: AnnotationPolicy,
    pub prefix: String,
    /// `[logging]` table; `DEPWARN_LOG` / `RUST_LOG` seed its level.
    pub logging: depwarn_log::Config,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::default(),
            policy: AnnotationPolicy::default(),
            prefix: String::new(),
            logging: depwarn_log::Config::from_env(),
        }
    }
}

/// Values given on the command line; unset ones leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<AnnotationPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl CliConfig {
    pub fn load(explicit: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        match explicit {
            Some(path) => {
                if !path.is_file() {
                    bail!("config file {} does not exist", path.display());
                }
                figment = figment.merge(Toml::file(path));
            }
            None => figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        }

        figment
            .merge(Env::prefixed("DEPWARN_").split("__"))
            .merge(Serialized::defaults(overrides))
            .extract()
            .context("invalid configuration")
    }
}
