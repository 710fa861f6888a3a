//! Settings validation errors and semantic validation.

use crate::settings::Settings;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upper bound for `max_class_id` and `capacity_hint`.
///
/// Totals are a dense array indexed by class id, so the class cap doubles as
/// an allocation cap.
pub const STORAGE_LIMIT: usize = 1 << 24;

const LOG_LEVELS: &[&str] = &[
    "trace", "debug", "info", "warn", "warning", "error", "off", "none", "quiet",
];
const LOG_FORMATS: &[&str] = &[
    "human",
    "console",
    "pretty",
    "jsonl",
    "json",
    "structured",
    "machine",
];

/// Settings validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

/// Validate settings semantically.
pub fn validate_settings(settings: &Settings) -> ValidationResult<()> {
    if settings.schema_version != crate::SETTINGS_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::SETTINGS_SCHEMA_VERSION.to_string(),
            actual: settings.schema_version.clone(),
        });
    }

    if let Some(max) = settings.classifier.max_class_id {
        if max >= STORAGE_LIMIT {
            return Err(ValidationError::InvalidValue {
                field: "classifier.max_class_id".to_string(),
                message: format!("Must be below {}, got {}", STORAGE_LIMIT, max),
            });
        }
    }

    if settings.classifier.capacity_hint > STORAGE_LIMIT {
        return Err(ValidationError::InvalidValue {
            field: "classifier.capacity_hint".to_string(),
            message: format!(
                "Must be at most {}, got {}",
                STORAGE_LIMIT, settings.classifier.capacity_hint
            ),
        });
    }

    if let Some(ref level) = settings.log.level {
        validate_name("log.level", level, LOG_LEVELS)?;
    }
    if let Some(ref format) = settings.log.format {
        validate_name("log.format", format, LOG_FORMATS)?;
    }

    Ok(())
}

fn validate_name(field: &str, value: &str, known: &[&str]) -> ValidationResult<()> {
    let lower = value.to_lowercase();
    if known.contains(&lower.as_str()) {
        return Ok(());
    }
    Err(ValidationError::InvalidValue {
        field: field.to_string(),
        message: format!("Unknown value '{}', expected one of {}", value, known.join(", ")),
    })
}
