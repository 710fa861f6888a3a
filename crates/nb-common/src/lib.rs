//! Shared types for the naive-Bayes classifier workspace.
//!
//! This crate provides:
//! - The unified error type with stable codes
//! - Class identifiers and their validation
//! - Output format selection for the CLI

pub mod class;
pub mod error;
pub mod output;

pub use class::ClassId;
pub use error::{Error, ErrorCategory, Result, StructuredError};
pub use output::OutputFormat;
