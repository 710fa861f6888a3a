//! Classifier settings types.
//!
//! These types match the classifier.json layout:
//!
//! ```json
//! {
//!   "schema_version": "1.0.0",
//!   "classifier": { "max_class_id": 1023, "capacity_hint": 4096 },
//!   "log": { "level": "info", "format": "human" }
//! }
//! ```

use crate::validate::ValidationError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub classifier: ClassifierSettings,

    #[serde(default)]
    pub log: LogSettings,
}

/// Knobs for the counting engine.
///
/// None of these change scoring; they bound and pre-size storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Largest class id Train accepts. `None` accepts any non-negative id.
    #[serde(default)]
    pub max_class_id: Option<usize>,

    /// Number of distinct words to reserve room for up front.
    #[serde(default)]
    pub capacity_hint: usize,
}

/// Logging defaults. Environment variables and CLI flags override these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default)]
    pub level: Option<String>,

    #[serde(default)]
    pub format: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            schema_version: crate::SETTINGS_SCHEMA_VERSION.to_string(),
            description: None,
            classifier: ClassifierSettings::default(),
            log: LogSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Load and validate in one step.
    pub fn load(path: &Path) -> Result<Self, ValidationError> {
        let settings = Self::from_file(path)?;
        crate::validate::validate_settings(&settings)?;
        Ok(settings)
    }
}
