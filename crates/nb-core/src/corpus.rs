//! Pre-tokenized training corpora and expectation checks.
//!
//! A corpus file is JSON:
//!
//! ```json
//! {
//!   "docs":   [ { "words": ["alpha", "beta"], "class": 0 } ],
//!   "forget": [ { "words": ["alpha", "beta"], "class": 0 } ],
//!   "checks": [ { "words": ["beta"], "classes": [0, 1], "tied": true } ]
//! }
//! ```
//!
//! `docs` are trained in order, then `forget` entries are untrained, then each
//! check is classified. A check passes when the returned class is one of
//! `classes` and the tie flag equals `tied`.

use crate::classifier::{Classifier, UntrainOutcome};
use nb_common::{ClassId, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// A training corpus plus the classifications it should produce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub docs: Vec<LabeledDoc>,

    #[serde(default)]
    pub forget: Vec<LabeledDoc>,

    #[serde(default)]
    pub checks: Vec<Check>,
}

/// A document and the class it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledDoc {
    pub words: Vec<String>,
    pub class: i64,
}

/// An expected classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Check {
    pub words: Vec<String>,
    /// Acceptable winners; ties may resolve to any of them.
    pub classes: Vec<i64>,
    #[serde(default)]
    pub tied: bool,
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    pub index: usize,
    pub words: Vec<String>,
    pub class: ClassId,
    pub tied: bool,
    pub scores: Vec<f64>,
    pub passed: bool,
}

/// Summary of running every check in a corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusReport {
    pub trained: usize,
    pub forgotten: usize,
    pub passed: usize,
    pub failed: usize,
    pub checks: Vec<CheckOutcome>,
}

impl CorpusReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

impl Corpus {
    /// Load a corpus from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
            .map_err(|e| Error::InvalidCorpus(format!("{}: {}", path.display(), e)))
    }

    /// Parse a corpus from a JSON string.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Train every doc, then untrain every `forget` entry.
    ///
    /// Returns the number of forget entries actually applied. The first
    /// invalid class id aborts with the classifier partially trained.
    pub fn train_into(&self, classifier: &mut Classifier) -> Result<usize> {
        for doc in &self.docs {
            classifier.train(&doc.words, doc.class)?;
        }

        let mut forgotten = 0;
        for doc in &self.forget {
            match classifier.untrain(&doc.words, doc.class) {
                UntrainOutcome::Applied => forgotten += 1,
                UntrainOutcome::Skipped(reason) => {
                    warn!(class = doc.class, %reason, "forget entry did not match training data");
                }
            }
        }

        info!(
            docs = self.docs.len(),
            forgotten,
            classes = classifier.class_count(),
            vocabulary = classifier.vocabulary_len(),
            "corpus trained"
        );
        Ok(forgotten)
    }

    /// Classify every check against `classifier`.
    pub fn run_checks(&self, classifier: &Classifier) -> Result<Vec<CheckOutcome>> {
        self.checks
            .iter()
            .enumerate()
            .map(|(index, check)| {
                let result = classifier.classify(&check.words)?;
                let passed = check
                    .classes
                    .iter()
                    .any(|&c| ClassId::checked(c) == Some(result.class))
                    && result.tied == check.tied;
                debug!(index, class = result.class.index(), tied = result.tied, passed, "check");
                Ok(CheckOutcome {
                    index,
                    words: check.words.clone(),
                    class: result.class,
                    tied: result.tied,
                    scores: result.scores,
                    passed,
                })
            })
            .collect()
    }

    /// Train `classifier` on the corpus and run all checks.
    pub fn evaluate(&self, mut classifier: Classifier) -> Result<CorpusReport> {
        let forgotten = self.train_into(&mut classifier)?;
        let checks = self.run_checks(&classifier)?;
        let passed = checks.iter().filter(|c| c.passed).count();
        Ok(CorpusReport {
            trained: self.docs.len(),
            forgotten,
            passed,
            failed: checks.len() - passed,
            checks,
        })
    }
}
