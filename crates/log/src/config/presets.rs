//! Configuration presets for common scenarios

use super::{Config, DisplayConfig, Format};

impl Config {
    /// Create configuration from environment variables
    ///
    /// `DEPWARN_LOG` wins over `RUST_LOG`; `DEPWARN_LOG_FORMAT` selects the
    /// format.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("DEPWARN_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = lookup("DEPWARN_LOG_FORMAT") {
            config.format = format.parse().unwrap_or_default();
        }

        config.display.apply_env(&lookup);
        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            display: DisplayConfig {
                colors: true,
                source: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Production configuration (JSON, warn level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "warn".to_string(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                source: false,
                flatten: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Test configuration (no colors, no timestamps)
    #[must_use]
    pub fn test() -> Self {
        Self {
            level: "trace".to_string(),
            format: Format::Compact,
            display: DisplayConfig {
                colors: false,
                time: false,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn depwarn_log_wins_over_rust_log() {
        let config = Config::from_lookup(|key| match key {
            "DEPWARN_LOG" => Some("debug".into()),
            "RUST_LOG" => Some("trace".into()),
            _ => None,
        });
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn unknown_format_falls_back_to_compact() {
        let config = Config::from_lookup(|key| match key {
            "DEPWARN_LOG_FORMAT" => Some("xml".into()),
            _ => None,
        });
        assert_eq!(config.format, Format::Compact);
    }

    #[test]
    fn json_format_from_env() {
        let config = Config::from_lookup(|key| (key == "DEPWARN_LOG_FORMAT").then(|| "JSON".into()));
        assert_eq!(config.format, Format::Json);
    }
}
