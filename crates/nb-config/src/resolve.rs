//! Settings resolution and path discovery.
//!
//! Resolution order: CLI argument → environment variables → XDG paths → defaults.

use std::path::{Path, PathBuf};

/// Discovered settings file path.
#[derive(Debug, Clone, Default)]
pub struct SettingsPath {
    /// Path to classifier.json (or None if not found).
    pub path: Option<PathBuf>,

    /// Where the path came from (for diagnostics).
    pub source: SettingsSource,
}

/// Where a settings file was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SettingsSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsSource::CliArgument => write!(f, "CLI argument"),
            SettingsSource::Environment => write!(f, "environment variable"),
            SettingsSource::XdgConfig => write!(f, "XDG config"),
            SettingsSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_SETTINGS_PATH: &str = "NB_SETTINGS";
pub const ENV_CONFIG_DIR: &str = "NB_CONFIG_DIR";

/// Standard settings file name.
pub const SETTINGS_FILENAME: &str = "classifier.json";

/// Application name for XDG directories.
const APP_NAME: &str = "naive-bayes";

/// Resolve the settings path using the standard resolution order.
///
/// 1. Explicit CLI path (if provided and present)
/// 2. NB_SETTINGS environment variable
/// 3. NB_CONFIG_DIR environment variable + filename
/// 4. XDG config directory (~/.config/naive-bayes/)
/// 5. Built-in defaults (None)
pub fn resolve_settings(cli_path: Option<&Path>) -> SettingsPath {
    // 1. CLI argument
    if let Some(path) = cli_path {
        if path.exists() {
            return found(path.to_path_buf(), SettingsSource::CliArgument);
        }
    }

    // 2. Environment variable (direct path)
    if let Ok(env_path) = std::env::var(ENV_SETTINGS_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return found(path, SettingsSource::Environment);
        }
    }

    // 3. Environment variable (config dir)
    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(SETTINGS_FILENAME);
        if path.exists() {
            return found(path, SettingsSource::Environment);
        }
    }

    // 4. XDG config directory
    if let Some(dir) = xdg_config_dir() {
        let path = dir.join(SETTINGS_FILENAME);
        if path.exists() {
            return found(path, SettingsSource::XdgConfig);
        }
    }

    SettingsPath::default()
}

fn found(path: PathBuf, source: SettingsSource) -> SettingsPath {
    SettingsPath {
        path: Some(path),
        source,
    }
}

/// Get the XDG config directory for naive-bayes.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}
