//! Fuzz target for corpus file parsing and evaluation.
//!
//! Any corpus that parses must train and check without panicking; invalid
//! class ids and empty models surface as errors.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nb_core::{Classifier, Corpus};

fuzz_target!(|data: &[u8]| {
    let Ok(corpus) = serde_json::from_slice::<Corpus>(data) else {
        return;
    };
    let _ = corpus.evaluate(Classifier::new());
});
