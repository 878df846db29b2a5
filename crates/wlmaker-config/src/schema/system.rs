//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `tracing-subscriber` filter directive for this level.
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "wlmaker=trace",
            LogLevel::Debug => "wlmaker=debug",
            LogLevel::Info => "wlmaker=info",
            LogLevel::Warning => "wlmaker=warn",
            LogLevel::Error => "wlmaker=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_defaults() {
        assert_eq!(LoggingConfig::default().level, LogLevel::Info);
    }

    #[test]
    fn level_directives() {
        assert_eq!(LogLevel::Debug.directive(), "wlmaker=debug");
        assert_eq!(LogLevel::Warning.directive(), "wlmaker=warn");
    }

    #[test]
    fn level_from_toml() {
        let config: LoggingConfig = toml::from_str(r#"level = "DEBUG""#).unwrap();
        assert_eq!(config.level, LogLevel::Debug);
    }
}
