//! Writer and display configuration

use serde::{Deserialize, Serialize};

/// Writer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriterConfig {
    /// Write to stderr
    #[default]
    Stderr,
    /// Write to stdout
    Stdout,
}

/// Display configuration
///
/// Independent toggles that map directly onto config file keys.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show timestamps
    pub time: bool,
    /// Show source location (`file:line`)
    pub source: bool,
    /// Show target module
    pub target: bool,
    /// Use ANSI colors
    pub colors: bool,
    /// Flatten JSON events
    pub flatten: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time: true,
            source: false,
            target: true,
            colors: std::io::IsTerminal::is_terminal(&std::io::stderr()),
            flatten: true,
        }
    }
}

impl DisplayConfig {
    /// Apply `DEPWARN_LOG_TIME`, `DEPWARN_LOG_SOURCE` and `DEPWARN_LOG_COLOR`.
    pub(crate) fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let flag = |key: &str| lookup(key).map(|v| matches!(v.as_str(), "1" | "true" | "yes"));

        if let Some(time) = flag("DEPWARN_LOG_TIME") {
            self.time = time;
        }
        if let Some(source) = flag("DEPWARN_LOG_SOURCE") {
            self.source = source;
        }
        if let Some(colors) = flag("DEPWARN_LOG_COLOR") {
            self.colors = colors;
        }
    }
}
