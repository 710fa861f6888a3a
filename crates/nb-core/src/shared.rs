//! Thread-safe handle around a [`Classifier`].
//!
//! Writers (train/untrain) take the write lock for the whole update, so a
//! reader never observes a partially shifted cell list. Concurrent
//! classification only takes read locks.

use crate::classifier::{Classification, Classifier, UntrainOutcome};
use nb_common::{Error, Result};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Cloneable, lock-protected classifier.
#[derive(Debug, Clone, Default)]
pub struct SharedClassifier {
    inner: Arc<RwLock<Classifier>>,
}

impl SharedClassifier {
    pub fn new(classifier: Classifier) -> Self {
        SharedClassifier {
            inner: Arc::new(RwLock::new(classifier)),
        }
    }

    pub fn train<S: AsRef<str>>(&self, doc: &[S], class: i64) -> Result<()> {
        self.write_guard()?.train(doc, class)
    }

    pub fn untrain<S: AsRef<str>>(&self, doc: &[S], class: i64) -> Result<UntrainOutcome> {
        Ok(self.write_guard()?.untrain(doc, class))
    }

    pub fn classify<S: AsRef<str>>(&self, doc: &[S]) -> Result<Classification> {
        self.read_guard()?.classify(doc)
    }

    /// Run `f` with shared access.
    pub fn read<T>(&self, f: impl FnOnce(&Classifier) -> T) -> Result<T> {
        let guard = self.read_guard()?;
        Ok(f(&guard))
    }

    /// Run `f` with exclusive access, e.g. to batch several updates.
    pub fn write<T>(&self, f: impl FnOnce(&mut Classifier) -> T) -> Result<T> {
        let mut guard = self.write_guard()?;
        Ok(f(&mut guard))
    }

    /// Clone the current state.
    pub fn snapshot(&self) -> Result<Classifier> {
        self.read(Classifier::clone)
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, Classifier>> {
        self.inner.read().map_err(|_| Error::LockPoisoned)
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, Classifier>> {
        self.inner.write().map_err(|_| Error::LockPoisoned)
    }
}

impl From<Classifier> for SharedClassifier {
    fn from(classifier: Classifier) -> Self {
        SharedClassifier::new(classifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nb_common::ClassId;
    use std::thread;

    #[test]
    fn clones_share_state() {
        let shared = SharedClassifier::default();
        let other = shared.clone();
        shared.train(&["a", "b"], 0).unwrap();
        assert_eq!(other.read(|c| c.total()).unwrap(), 2);
        assert_eq!(other.classify(&["a"]).unwrap().class, ClassId(0));
    }

    #[test]
    fn untrain_reports_outcome() {
        let shared = SharedClassifier::default();
        assert!(!shared.untrain(&["x"], 0).unwrap().is_applied());
        shared.train(&["x"], 0).unwrap();
        assert!(shared.untrain(&["x"], 0).unwrap().is_applied());
        assert!(shared.snapshot().unwrap().is_empty());
    }

    #[test]
    fn concurrent_writers_and_readers_keep_invariants() {
        let shared = SharedClassifier::default();
        shared.train(&["seed"], 0).unwrap();

        let handles: Vec<_> = (0..4i64)
            .map(|class| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..200 {
                        let doc = [format!("w{}", i % 7), "common".to_string()];
                        shared.train(&doc, class).unwrap();
                        shared.classify(&doc).unwrap();
                        if i % 3 == 0 {
                            assert!(shared.untrain(&doc, class).unwrap().is_applied());
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = shared.snapshot().unwrap();
        snapshot.check_invariants().unwrap();
        // 1 seed word; per thread 200 docs of 2 words, 67 of them untrained.
        assert_eq!(snapshot.total(), 1 + 4 * (200 - 67) * 2);
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let shared = SharedClassifier::default();
        let writer = shared.clone();
        let result = thread::spawn(move || {
            let _: Result<()> = writer.write(|_| panic!("writer died"));
        })
        .join();
        assert!(result.is_err());

        assert!(matches!(shared.classify(&["a"]), Err(Error::LockPoisoned)));
        assert!(matches!(shared.train(&["a"], 0), Err(Error::LockPoisoned)));
    }
}
