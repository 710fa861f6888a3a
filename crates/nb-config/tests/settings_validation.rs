//! Settings validation + resolution tests against real files.
//!
//! Covers:
//! - Validation of JSON fixtures
//! - Resolution order (CLI > env path > env config dir > XDG > defaults)

use nb_config::resolve::{resolve_settings, SettingsSource, ENV_CONFIG_DIR, ENV_SETTINGS_PATH};
use nb_config::validate::{validate_settings, ValidationError};
use nb_config::Settings;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const ENV_KEYS: &[&str] = &[ENV_SETTINGS_PATH, ENV_CONFIG_DIR, "XDG_CONFIG_HOME"];

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> Settings {
    Settings::from_file(&fixtures_dir().join(name)).expect("read settings fixture")
}

struct EnvGuard {
    keys: Vec<String>,
    saved: Vec<Option<String>>,
}

impl EnvGuard {
    fn new(keys: &[&str]) -> Self {
        let mut saved = Vec::with_capacity(keys.len());
        for key in keys {
            saved.push(env::var(key).ok());
            env::remove_var(key);
        }
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            saved,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (idx, key) in self.keys.iter().enumerate() {
            match self.saved.get(idx).and_then(|v| v.as_ref()) {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

fn with_env_lock<T>(f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f()
}

fn write_settings(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir).expect("create settings dir");
    let dest = dir.join("classifier.json");
    fs::copy(fixtures_dir().join("valid_settings.json"), &dest).expect("copy fixture");
    dest
}

#[test]
fn test_valid_fixture_passes() {
    let settings = load_fixture("valid_settings.json");
    validate_settings(&settings).expect("valid settings should pass validation");
    assert_eq!(settings.classifier.max_class_id, Some(15));
    assert_eq!(settings.classifier.capacity_hint, 1024);
}

#[test]
fn test_version_fixture_rejected() {
    let settings = load_fixture("invalid_settings_version.json");
    let err = validate_settings(&settings).expect_err("old schema should fail validation");
    assert!(matches!(err, ValidationError::VersionMismatch { .. }));
}

#[test]
fn test_log_format_fixture_rejected() {
    let err = Settings::load(&fixtures_dir().join("invalid_settings_log_format.json"))
        .expect_err("unknown log format should fail validation");
    assert!(matches!(err, ValidationError::InvalidValue { .. }));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Settings::from_file(Path::new("/nonexistent/classifier.json")).unwrap_err();
    assert!(matches!(err, ValidationError::IoError(_)));
}

#[test]
fn test_resolve_cli_over_env() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(ENV_KEYS);

        let temp = TempDir::new().expect("temp dir");
        let cli_path = write_settings(&temp.path().join("cli"));
        let env_path = write_settings(&temp.path().join("env"));
        env::set_var(ENV_SETTINGS_PATH, env_path.display().to_string());

        let resolved = resolve_settings(Some(&cli_path));
        assert_eq!(resolved.source, SettingsSource::CliArgument);
        assert_eq!(resolved.path.unwrap(), cli_path);
    });
}

#[test]
fn test_resolve_missing_cli_path_falls_through() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(ENV_KEYS);

        let temp = TempDir::new().expect("temp dir");
        let env_path = write_settings(&temp.path().join("env"));
        env::set_var(ENV_SETTINGS_PATH, env_path.display().to_string());

        let missing = temp.path().join("nope.json");
        let resolved = resolve_settings(Some(&missing));
        assert_eq!(resolved.source, SettingsSource::Environment);
        assert_eq!(resolved.path.unwrap(), env_path);
    });
}

#[test]
fn test_resolve_env_over_config_dir() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(ENV_KEYS);

        let temp = TempDir::new().expect("temp dir");
        let env_path = write_settings(&temp.path().join("env"));
        let config_dir = temp.path().join("config_dir");
        write_settings(&config_dir);
        env::set_var(ENV_SETTINGS_PATH, env_path.display().to_string());
        env::set_var(ENV_CONFIG_DIR, config_dir.display().to_string());

        let resolved = resolve_settings(None);
        assert_eq!(resolved.source, SettingsSource::Environment);
        assert_eq!(resolved.path.unwrap(), env_path);
    });
}

#[test]
fn test_resolve_config_dir() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(ENV_KEYS);

        let temp = TempDir::new().expect("temp dir");
        let config_dir = temp.path().join("config_dir");
        let expected = write_settings(&config_dir);
        env::set_var(ENV_CONFIG_DIR, config_dir.display().to_string());

        let resolved = resolve_settings(None);
        assert_eq!(resolved.source, SettingsSource::Environment);
        assert_eq!(resolved.path.unwrap(), expected);
    });
}

#[cfg(target_os = "linux")]
#[test]
fn test_resolve_xdg_fallback() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(ENV_KEYS);

        let temp = TempDir::new().expect("temp dir");
        let xdg_dir = temp.path().join("xdg");
        let expected = write_settings(&xdg_dir.join("naive-bayes"));
        env::set_var("XDG_CONFIG_HOME", xdg_dir.display().to_string());

        let resolved = resolve_settings(None);
        assert_eq!(resolved.source, SettingsSource::XdgConfig);
        assert_eq!(resolved.path.unwrap(), expected);
    });
}

#[cfg(target_os = "linux")]
#[test]
fn test_resolve_defaults_when_nothing_found() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(ENV_KEYS);

        let temp = TempDir::new().expect("temp dir");
        env::set_var("XDG_CONFIG_HOME", temp.path().display().to_string());

        let resolved = resolve_settings(None);
        assert_eq!(resolved.source, SettingsSource::BuiltinDefault);
        assert!(resolved.path.is_none());
    });
}
