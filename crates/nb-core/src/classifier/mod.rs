//! Incremental multinomial naive-Bayes classifier.
//!
//! The model is three views of one counting state:
//! - `total`: word occurrences across every class
//! - `totals`: dense per-class occurrence totals indexed by class id
//! - `table`: word → sorted `(class, count)` cells, zero counts removed
//!
//! [`Classifier::train`] and [`Classifier::untrain`] keep the three in step;
//! [`Classifier::classify`] only reads them. Counts are exact integers, so an
//! untrain that mirrors a train restores the state exactly.

mod cells;
mod classify;
mod train;

pub use cells::Cell;
pub use classify::{fallback_log_prob, Classification};
pub use train::{SkipReason, UntrainOutcome};

use nb_common::{ClassId, Error, Result};
use nb_config::ClassifierSettings;
use std::collections::HashMap;

/// Largest class id accepted when settings give no `max_class_id`.
///
/// Totals are dense, so this also caps the totals allocation.
pub const DEFAULT_MAX_CLASS_ID: usize = nb_config::validate::STORAGE_LIMIT - 1;

/// Naive-Bayes counting state.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    total: u64,
    totals: Vec<u64>,
    table: HashMap<String, Vec<Cell>>,
    max_class_id: Option<usize>,
}

impl Classifier {
    /// Create an empty classifier: no classes, empty table, total 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty classifier bounded and pre-sized by `settings`.
    pub fn with_settings(settings: &ClassifierSettings) -> Self {
        Classifier {
            total: 0,
            totals: Vec::new(),
            table: HashMap::with_capacity(settings.capacity_hint),
            max_class_id: settings.max_class_id,
        }
    }

    /// Word occurrences seen across all classes.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of class slots, i.e. one past the largest class id trained.
    pub fn class_count(&self) -> usize {
        self.totals.len()
    }

    /// Word occurrences attributed to `class`. Unknown classes read 0.
    pub fn class_total(&self, class: ClassId) -> u64 {
        self.totals.get(class.index()).copied().unwrap_or(0)
    }

    /// Per-class totals, indexed by class id.
    pub fn class_totals(&self) -> &[u64] {
        &self.totals
    }

    /// Number of distinct words with at least one count.
    pub fn vocabulary_len(&self) -> usize {
        self.table.len()
    }

    /// True when nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.total == 0 && self.table.is_empty()
    }

    /// Occurrences of `word` in `class`.
    pub fn count(&self, word: &str, class: ClassId) -> u64 {
        self.table
            .get(word)
            .map(|cells| cells::count(cells, class.index()))
            .unwrap_or(0)
    }

    /// Sorted cells for `word`; empty when the word was never seen.
    pub fn cells(&self, word: &str) -> &[Cell] {
        self.table.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over all known words and their cells, in no particular order.
    pub fn words(&self) -> impl Iterator<Item = (&str, &[Cell])> {
        self.table
            .iter()
            .map(|(word, cells)| (word.as_str(), cells.as_slice()))
    }

    /// Class bound from settings, if one was configured.
    pub fn max_class_id(&self) -> Option<usize> {
        self.max_class_id
    }

    /// Verify the counting invariants, describing the first violation found.
    ///
    /// Checks sorted cell lists without zero counts, no empty lists, cells
    /// only for known classes, and that `total`, the sum of `totals`, and
    /// the sum of all cell counts agree per class.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        let mut per_class = vec![0u64; self.totals.len()];

        for (word, cells) in &self.table {
            if let Some(problem) = cells::violation(cells) {
                return Err(format!("word {:?}: {}", word, problem));
            }
            for cell in cells {
                let slot = per_class.get_mut(cell.class).ok_or_else(|| {
                    format!("word {:?}: class {} has no totals slot", word, cell.class)
                })?;
                *slot += cell.count;
            }
        }

        for (class, (&counted, &recorded)) in per_class.iter().zip(&self.totals).enumerate() {
            if counted != recorded {
                return Err(format!(
                    "class {}: cells sum to {} but total is {}",
                    class, counted, recorded
                ));
            }
        }

        let sum: u64 = self.totals.iter().sum();
        if sum != self.total {
            return Err(format!(
                "class totals sum to {} but total is {}",
                sum, self.total
            ));
        }

        Ok(())
    }

    /// Largest class id accepted: the configured bound, else [`DEFAULT_MAX_CLASS_ID`].
    pub fn class_bound(&self) -> usize {
        self.max_class_id.unwrap_or(DEFAULT_MAX_CLASS_ID)
    }

    pub(crate) fn accept_class(&self, raw: i64) -> Result<ClassId> {
        let class = ClassId::from_raw(raw)?;
        if class.index() > self.class_bound() {
            return Err(Error::InvalidClass { class: raw });
        }
        Ok(class)
    }

    fn trimmed_totals(&self) -> &[u64] {
        let used = self
            .totals
            .iter()
            .rposition(|&t| t != 0)
            .map_or(0, |i| i + 1);
        &self.totals[..used]
    }
}

/// Two classifiers are equal when they hold the same counts.
///
/// Trailing class slots that read zero are ignored, as is the class bound:
/// a slot that was grown and never filled is indistinguishable from one that
/// was never grown.
impl PartialEq for Classifier {
    fn eq(&self, other: &Self) -> bool {
        self.total == other.total
            && self.trimmed_totals() == other.trimmed_totals()
            && self.table == other.table
    }
}

impl Eq for Classifier {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_classifier_is_empty() {
        let c = Classifier::new();
        assert!(c.is_empty());
        assert_eq!(c.total(), 0);
        assert_eq!(c.class_count(), 0);
        assert_eq!(c.vocabulary_len(), 0);
        assert!(c.cells("anything").is_empty());
        assert_eq!(c.class_total(ClassId(3)), 0);
        assert!(c.check_invariants().is_ok());
    }

    #[test]
    fn with_settings_applies_class_bound() {
        let settings = ClassifierSettings {
            max_class_id: Some(2),
            capacity_hint: 16,
        };
        let mut c = Classifier::with_settings(&settings);
        assert_eq!(c.max_class_id(), Some(2));
        assert!(c.train(&["a"], 2).is_ok());

        let err = c.train(&["a"], 3).unwrap_err();
        assert!(matches!(err, Error::InvalidClass { class: 3 }));
        assert_eq!(c.total(), 1);
    }

    #[test]
    fn equality_ignores_unfilled_trailing_slots() {
        let mut grown = Classifier::new();
        grown.train(&["a"], 0).unwrap();
        grown.train::<&str>(&[], 4).unwrap();
        assert_eq!(grown.class_count(), 5);

        let mut plain = Classifier::new();
        plain.train(&["a"], 0).unwrap();

        assert_eq!(grown, plain);
    }

    #[test]
    fn words_iterates_table() {
        let mut c = Classifier::new();
        c.train(&["x", "y", "x"], 1).unwrap();
        let mut words: Vec<(&str, Vec<Cell>)> =
            c.words().map(|(w, cells)| (w, cells.to_vec())).collect();
        words.sort_by(|a, b| a.0.cmp(b.0));
        assert_eq!(
            words,
            vec![
                ("x", vec![Cell { class: 1, count: 2 }]),
                ("y", vec![Cell { class: 1, count: 1 }]),
            ]
        );
    }
}
