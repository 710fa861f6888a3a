//! Naive-Bayes Core Library
//!
//! This library provides:
//! - The incremental multinomial classifier with exact untraining
//! - A lock-protected handle for sharing one classifier across threads
//! - Corpus files for batch training and expectation checks
//! - Exit codes and logging for the `nb` CLI
//!
//! The binary entry point is in `main.rs`.

pub mod classifier;
pub mod corpus;
pub mod exit_codes;
pub mod logging;
pub mod shared;

pub use classifier::{Cell, Classification, Classifier, SkipReason, UntrainOutcome};
pub use corpus::{Check, CheckOutcome, Corpus, CorpusReport, LabeledDoc};
pub use shared::SharedClassifier;
