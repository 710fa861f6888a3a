//! Log-space multinomial scoring.

use super::Classifier;
use nb_common::{ClassId, Error, Result};
use nb_math::{ln_ratio, normalize_log_probs};
use serde::Serialize;
use tracing::debug;

const FALLBACK_PROB: f64 = 1e-11;

/// Per-pair penalty: the score added for each (word, class) pair with no
/// recorded count. Equals `ln(1e-11)`.
pub fn fallback_log_prob() -> f64 {
    FALLBACK_PROB.ln()
}

/// Outcome of scoring one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Winning class: the lowest id holding the maximum score.
    pub class: ClassId,
    /// Whether another class matched the winning score exactly.
    pub tied: bool,
    /// Unnormalized natural-log score per class, indexed by class id.
    pub scores: Vec<f64>,
}

impl Classification {
    /// Scores normalized into probabilities summing to 1.
    pub fn posteriors(&self) -> Vec<f64> {
        normalize_log_probs(&self.scores)
    }

    /// Class ids by descending score; equal scores keep ascending id order.
    pub fn ranked(&self) -> Vec<ClassId> {
        let mut order: Vec<usize> = (0..self.scores.len()).collect();
        order.sort_by(|&a, &b| self.scores[b].total_cmp(&self.scores[a]));
        order.into_iter().map(ClassId).collect()
    }

    /// Winner's score minus the runner-up's; `None` with a single class.
    pub fn margin(&self) -> Option<f64> {
        let ranked = self.ranked();
        let runner_up = ranked.iter().find(|c| **c != self.class)?;
        Some(self.scores[self.class.index()] - self.scores[runner_up.index()])
    }
}

impl Classifier {
    /// Score `doc` against every known class.
    ///
    /// Fails with `NotTrained` when no words have been counted. A class whose
    /// total is zero scores -inf through its prior.
    pub fn classify<S: AsRef<str>>(&self, doc: &[S]) -> Result<Classification> {
        if self.totals.is_empty() || self.total == 0 {
            return Err(Error::NotTrained);
        }

        let fallback = fallback_log_prob();
        let mut scores = vec![0.0; self.totals.len()];

        for word in doc {
            let mut next = 0;
            for cell in self.cells(word.as_ref()) {
                for score in &mut scores[next..cell.class] {
                    *score += fallback;
                }
                scores[cell.class] +=
                    ln_ratio(cell.count as f64, self.totals[cell.class] as f64);
                next = cell.class + 1;
            }
            for score in &mut scores[next..] {
                *score += fallback;
            }
        }

        let total = self.total as f64;
        let mut best: Option<(usize, f64)> = None;
        let mut tied = false;

        for (class, score) in scores.iter_mut().enumerate() {
            *score += ln_ratio(self.totals[class] as f64, total);

            match best {
                Some((_, max)) if *score > max => {
                    best = Some((class, *score));
                    tied = false;
                }
                Some((_, max)) if *score == max => tied = true,
                Some(_) => {}
                None => best = Some((class, *score)),
            }
        }

        // `scores` is non-empty, so `best` was set on the first class.
        let class = ClassId(best.map_or(0, |(class, _)| class));
        debug!(class = class.index(), tied, words = doc.len(), "classified document");

        Ok(Classification {
            class,
            tied,
            scores,
        })
    }
}
