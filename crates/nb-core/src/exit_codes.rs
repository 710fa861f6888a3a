//! Exit codes for the `nb` CLI.
//!
//! Exit code ranges:
//! - 0-1: Operational outcomes (parse outcome from code, not output)
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

use nb_common::Error;

/// Exit codes for `nb` commands.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Operational Outcomes (0-1)
    // ========================================================================
    /// Success: every check passed / classification produced
    Clean = 0,

    /// Corpus trained but at least one check failed
    ChecksFailed = 1,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments, corpus file, or class id
    ArgsError = 10,

    /// Settings file missing, unreadable, or invalid
    ConfigError = 11,

    /// Classify requested before any word was trained
    NotTrained = 12,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }

    /// Check if this exit code is a user/environment error (codes 10-19).
    pub fn is_user_error(self) -> bool {
        (10..20).contains(&self.as_i32())
    }

    /// Check if this exit code is an internal error (codes 20-29).
    pub fn is_internal_error(self) -> bool {
        self.as_i32() >= 20
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ChecksFailed => "ERR_CHECKS_FAILED",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::NotTrained => "ERR_NOT_TRAINED",
            ExitCode::InternalError => "ERR_INTERNAL",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config(_) => ExitCode::ConfigError,
            Error::InvalidCorpus(_)
            | Error::InvalidClass { .. }
            | Error::Io(_)
            | Error::Json(_) => ExitCode::ArgsError,
            Error::NotTrained => ExitCode::NotTrained,
            Error::LockPoisoned => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        // Every variant fits in a u8.
        std::process::ExitCode::from(code.as_i32() as u8)
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_stable() {
        assert_eq!(ExitCode::Clean.as_i32(), 0);
        assert_eq!(ExitCode::ChecksFailed.as_i32(), 1);
        assert_eq!(ExitCode::ArgsError.as_i32(), 10);
        assert_eq!(ExitCode::ConfigError.as_i32(), 11);
        assert_eq!(ExitCode::NotTrained.as_i32(), 12);
        assert_eq!(ExitCode::InternalError.as_i32(), 20);
    }

    #[test]
    fn ranges_classify_codes() {
        assert!(ExitCode::Clean.is_success());
        assert!(!ExitCode::ChecksFailed.is_success());
        assert!(!ExitCode::ChecksFailed.is_user_error());
        assert!(ExitCode::NotTrained.is_user_error());
        assert!(!ExitCode::NotTrained.is_internal_error());
        assert!(ExitCode::InternalError.is_internal_error());
    }

    #[test]
    fn errors_map_to_codes() {
        assert_eq!(
            ExitCode::from(&Error::Config("bad".into())),
            ExitCode::ConfigError
        );
        assert_eq!(
            ExitCode::from(&Error::InvalidClass { class: -1 }),
            ExitCode::ArgsError
        );
        assert_eq!(ExitCode::from(&Error::NotTrained), ExitCode::NotTrained);
        assert_eq!(
            ExitCode::from(&Error::LockPoisoned),
            ExitCode::InternalError
        );
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(ExitCode::from(&Error::Io(io)), ExitCode::ArgsError);
    }

    #[test]
    fn display_includes_name_and_value() {
        assert_eq!(ExitCode::NotTrained.to_string(), "ERR_NOT_TRAINED (12)");
    }
}
