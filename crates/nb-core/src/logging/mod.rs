//! Structured logging foundation for nb-core.
//!
//! Provides dual-mode logging:
//! - Human-readable console output for interactive use
//! - Machine-parseable JSONL for pipelines
//!
//! stdout is reserved for command payloads; all log output goes to stderr.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Targets that `config.level` applies to.
const LOG_TARGETS: &[&str] = &["nb_core", "nb"];

/// Initialize the logging subsystem.
///
/// Call once at startup. A second call (e.g. from another test in the same
/// process) leaves the first subscriber in place.
pub fn init_logging(config: &LogConfig) {
    // Malformed RUST_LOG directives fall back to the level-based filter.
    let filter = EnvFilter::try_new(config.filter_directives(LOG_TARGETS)).unwrap_or_else(|_| {
        EnvFilter::new(
            LogConfig {
                directives: None,
                ..config.clone()
            }
            .filter_directives(LOG_TARGETS),
        )
    });

    let result = match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .try_init()
        }
    };

    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}

/// Initialize logging with defaults (for tests and simple cases).
pub fn init_default_logging() {
    init_logging(&LogConfig::from_env(None, None));
}
