//! Train and untrain: the only mutations of the counting state.

use super::cells;
use super::Classifier;
use nb_common::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Result of an [`Classifier::untrain`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UntrainOutcome {
    /// Counts were decremented.
    Applied,
    /// The call would have driven counts negative; nothing changed.
    Skipped(SkipReason),
}

impl UntrainOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, UntrainOutcome::Applied)
    }
}

/// Why an untrain was ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Class id below zero.
    NegativeClass { class: i64 },
    /// Class id at or beyond the known class range.
    UnknownClass { class: i64, known: usize },
    /// The class holds fewer words than the document.
    InsufficientTotal { class: i64, class_total: u64, doc_len: u64 },
    /// A word occurs in the document more often than it was counted.
    InsufficientCount { word: String, have: u64, need: u64 },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NegativeClass { class } => write!(f, "negative class {}", class),
            SkipReason::UnknownClass { class, known } => {
                write!(f, "class {} unknown ({} classes known)", class, known)
            }
            SkipReason::InsufficientTotal {
                class,
                class_total,
                doc_len,
            } => write!(
                f,
                "class {} holds {} words, document has {}",
                class, class_total, doc_len
            ),
            SkipReason::InsufficientCount { word, have, need } => {
                write!(f, "word {:?} counted {} times, document has {}", word, have, need)
            }
        }
    }
}

impl Classifier {
    /// Count every token of `doc` toward `class`.
    ///
    /// Repeated tokens are counted once per occurrence. Fails with
    /// `InvalidClass` for negative ids, ids above [`Classifier::class_bound`],
    /// or when the totals cannot grow to hold the id.
    pub fn train<S: AsRef<str>>(&mut self, doc: &[S], class: i64) -> Result<()> {
        let raw = class;
        let class = self.accept_class(raw)?;
        let idx = class.index();

        if idx >= self.totals.len() {
            let grow = idx + 1 - self.totals.len();
            self.totals
                .try_reserve_exact(grow)
                .map_err(|_| Error::InvalidClass { class: raw })?;
            self.totals.resize(idx + 1, 0);
        }

        let n = doc.len() as u64;
        self.totals[idx] += n;
        self.total += n;

        for word in doc {
            let word = word.as_ref();
            match self.table.get_mut(word) {
                Some(cells) => cells::incr(cells, idx),
                None => {
                    let mut cells = Vec::with_capacity(1);
                    cells::incr(&mut cells, idx);
                    self.table.insert(word.to_owned(), cells);
                }
            }
        }

        trace!(class = idx, words = n, total = self.total, "trained document");
        Ok(())
    }

    /// Reverse a previous [`Classifier::train`] with the same arguments.
    ///
    /// Never fails. When the class is unknown, or the class or any word holds
    /// fewer occurrences than the document would remove, the call changes
    /// nothing and reports [`UntrainOutcome::Skipped`].
    pub fn untrain<S: AsRef<str>>(&mut self, doc: &[S], class: i64) -> UntrainOutcome {
        let idx = match self.untrain_target(doc, class) {
            Ok(idx) => idx,
            Err(reason) => {
                debug!(class, words = doc.len(), %reason, "untrain skipped");
                return UntrainOutcome::Skipped(reason);
            }
        };

        let n = doc.len() as u64;
        self.totals[idx] -= n;
        self.total -= n;

        for word in doc {
            let word = word.as_ref();
            let emptied = match self.table.get_mut(word) {
                Some(cells) => {
                    cells::decr(cells, idx);
                    cells.is_empty()
                }
                None => false,
            };
            if emptied {
                self.table.remove(word);
            }
        }

        trace!(class = idx, words = n, total = self.total, "untrained document");
        UntrainOutcome::Applied
    }

    /// Check that untraining `doc` from `class` keeps every count non-negative.
    fn untrain_target<S: AsRef<str>>(
        &self,
        doc: &[S],
        class: i64,
    ) -> std::result::Result<usize, SkipReason> {
        let idx = usize::try_from(class).map_err(|_| SkipReason::NegativeClass { class })?;
        let class_total = *self
            .totals
            .get(idx)
            .ok_or_else(|| SkipReason::UnknownClass {
                class,
                known: self.totals.len(),
            })?;

        let doc_len = doc.len() as u64;
        if class_total < doc_len {
            return Err(SkipReason::InsufficientTotal {
                class,
                class_total,
                doc_len,
            });
        }

        let mut needed: HashMap<&str, u64> = HashMap::with_capacity(doc.len());
        for word in doc {
            *needed.entry(word.as_ref()).or_insert(0) += 1;
        }
        for (word, need) in needed {
            let have = self.table.get(word).map_or(0, |c| cells::count(c, idx));
            if have < need {
                return Err(SkipReason::InsufficientCount {
                    word: word.to_owned(),
                    have,
                    need,
                });
            }
        }

        Ok(idx)
    }
}
