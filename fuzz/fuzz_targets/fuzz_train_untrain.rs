//! Fuzz target for random train/untrain sequences.
//!
//! After every step the counting invariants must hold, a skipped untrain
//! must leave the state untouched, and undoing a just-trained document must
//! restore the previous state exactly.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nb_core::Classifier;

#[derive(Debug, Arbitrary)]
enum Op {
    Train { words: Vec<u8>, class: i8 },
    Untrain { words: Vec<u8>, class: i8 },
    TrainThenUntrain { words: Vec<u8>, class: i8 },
    Classify { words: Vec<u8> },
}

/// Map bytes onto a small vocabulary so words collide.
fn doc(words: &[u8]) -> Vec<String> {
    words.iter().map(|b| format!("w{}", b % 16)).collect()
}

fuzz_target!(|ops: Vec<Op>| {
    let mut classifier = Classifier::new();

    for op in ops {
        match op {
            Op::Train { words, class } => {
                let before = classifier.clone();
                if classifier.train(&doc(&words), i64::from(class)).is_err() {
                    assert_eq!(classifier, before);
                }
            }
            Op::Untrain { words, class } => {
                let before = classifier.clone();
                if !classifier.untrain(&doc(&words), i64::from(class)).is_applied() {
                    assert_eq!(classifier, before);
                }
            }
            Op::TrainThenUntrain { words, class } => {
                let before = classifier.clone();
                let words = doc(&words);
                let class = i64::from(class);
                if classifier.train(&words, class).is_ok() {
                    assert!(classifier.untrain(&words, class).is_applied());
                }
                assert_eq!(classifier, before);
            }
            Op::Classify { words } => {
                let _ = classifier.classify(&doc(&words));
            }
        }

        if let Err(problem) = classifier.check_invariants() {
            panic!("invariant violated: {}", problem);
        }
    }
});
