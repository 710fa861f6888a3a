//! Naive-Bayes classifier settings loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for classifier.json
//! - Settings resolution (CLI → env → XDG → defaults)
//! - Semantic validation

pub mod resolve;
pub mod settings;
pub mod validate;

pub use resolve::{resolve_settings, SettingsPath, SettingsSource};
pub use settings::{ClassifierSettings, LogSettings, Settings};
pub use validate::{validate_settings, ValidationError, ValidationResult};

/// Schema version for settings files.
pub const SETTINGS_SCHEMA_VERSION: &str = "1.0.0";
