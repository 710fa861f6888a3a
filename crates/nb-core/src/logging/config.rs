//! Logging configuration.
//!
//! Sources, lowest precedence first:
//! - The `log` section of classifier.json
//! - `RUST_LOG` (full `EnvFilter` directives), `NB_LOG` (a single level),
//!   `NB_LOG_FORMAT`
//! - CLI flags (-v, -q, --log-format)
//!
//! `NB_LOG` wins over `RUST_LOG` when both are set. An explicit level from
//! `NB_LOG` or the CLI discards `RUST_LOG` directives.

use nb_config::LogSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable holding a single log level.
pub const ENV_LOG_LEVEL: &str = "NB_LOG";
/// Environment variable holding the log format.
pub const ENV_LOG_FORMAT: &str = "NB_LOG_FORMAT";
/// Standard `tracing-subscriber` filter variable.
pub const ENV_RUST_LOG: &str = "RUST_LOG";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines on stderr.
    #[default]
    Human,
    /// One JSON object per event.
    Jsonl,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "console" | "pretty" => Ok(LogFormat::Human),
            "jsonl" | "json" | "structured" | "machine" => Ok(LogFormat::Jsonl),
            _ => Err(format!("unknown log format: {}", s)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Human => "human",
            LogFormat::Jsonl => "jsonl",
        })
    }
}

/// Minimum level for classifier and CLI events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    /// Default: stdout carries the payload, stderr stays quiet.
    #[default]
    Warn,
    Error,
    Off,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" | "quiet" => Ok(LogLevel::Off),
            _ => Err(format!("unknown log level: {}", s)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        })
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Level applied to this crate and the `nb` binary.
    pub level: LogLevel,
    /// Raw `RUST_LOG` directives; when set they replace `level` entirely.
    pub directives: Option<String>,
    /// Whether human output carries timestamps.
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Human,
            level: LogLevel::Warn,
            directives: None,
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Layer settings, the process environment, and CLI overrides.
    pub fn resolve(
        settings: &LogSettings,
        cli_level: Option<LogLevel>,
        cli_format: Option<LogFormat>,
    ) -> Self {
        Self::resolve_with(settings, |key| std::env::var(key).ok(), cli_level, cli_format)
    }

    /// Environment and CLI overrides on top of defaults.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::resolve(&LogSettings::default(), cli_level, cli_format)
    }

    /// Like [`LogConfig::resolve`], reading variables through `env`.
    pub fn resolve_with(
        settings: &LogSettings,
        env: impl Fn(&str) -> Option<String>,
        cli_level: Option<LogLevel>,
        cli_format: Option<LogFormat>,
    ) -> Self {
        let mut config = LogConfig::default();

        // Validated on load; an unparseable value keeps the default.
        if let Some(level) = settings.level.as_deref().and_then(|s| s.parse().ok()) {
            config.level = level;
        }
        if let Some(format) = settings.format.as_deref().and_then(|s| s.parse().ok()) {
            config.format = format;
        }

        match env(ENV_LOG_LEVEL).and_then(|v| v.parse().ok()) {
            Some(level) => config.level = level,
            None => {
                config.directives = env(ENV_RUST_LOG).filter(|v| !v.trim().is_empty());
            }
        }
        if let Some(format) = env(ENV_LOG_FORMAT).and_then(|v| v.parse().ok()) {
            config.format = format;
        }

        if let Some(level) = cli_level {
            config.level = level;
            config.directives = None;
        }
        if let Some(format) = cli_format {
            config.format = format;
        }

        config
    }

    /// `EnvFilter` directive string for this configuration.
    pub fn filter_directives(&self, targets: &[&str]) -> String {
        match &self.directives {
            Some(directives) => directives.clone(),
            None => targets
                .iter()
                .map(|target| format!("{}={}", target, self.level))
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }
}
