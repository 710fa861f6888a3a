//! Property-based tests for nb-math numerical functions.
//!
//! Uses proptest to verify mathematical properties hold across many random inputs.

use nb_math::{ln_ratio, log_sum_exp, normalize_log_probs};
use proptest::prelude::*;

/// Tolerance for floating point comparisons.
const TOL: f64 = 1e-10;

/// Helper to check approximate equality.
fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    if a.is_infinite() && b.is_infinite() {
        return a.signum() == b.signum();
    }
    if a.is_infinite() || b.is_infinite() {
        return false;
    }
    (a - b).abs() <= tol.max(tol * a.abs().max(b.abs()))
}

// ============================================================================
// log_sum_exp properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// log_sum_exp is commutative: order doesn't matter.
    #[test]
    fn log_sum_exp_commutative(a in -100.0..100.0f64, b in -100.0..100.0f64) {
        let ab = log_sum_exp(&[a, b]);
        let ba = log_sum_exp(&[b, a]);
        prop_assert!(approx_eq(ab, ba, TOL), "lse([{},{}])={} != lse([{},{}])={}", a, b, ab, b, a, ba);
    }

    /// log_sum_exp is at least the maximum and at most max + ln(n).
    #[test]
    fn log_sum_exp_bounds(values in prop::collection::vec(-500.0..0.0f64, 1..16)) {
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let lse = log_sum_exp(&values);
        prop_assert!(lse >= max - TOL);
        prop_assert!(lse <= max + (values.len() as f64).ln() + TOL);
    }

    /// Shifting all inputs by a constant shifts the result by that constant.
    #[test]
    fn log_sum_exp_shift(values in prop::collection::vec(-50.0..50.0f64, 1..8), c in -100.0..100.0f64) {
        let shifted: Vec<f64> = values.iter().map(|v| v + c).collect();
        prop_assert!(approx_eq(log_sum_exp(&shifted), log_sum_exp(&values) + c, 1e-9));
    }
}

// ============================================================================
// normalize_log_probs properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Posteriors sum to one for any finite score vector.
    #[test]
    fn normalized_sums_to_one(values in prop::collection::vec(-3000.0..0.0f64, 1..16)) {
        let probs = normalize_log_probs(&values);
        let sum: f64 = probs.iter().sum();
        prop_assert!(approx_eq(sum, 1.0, 1e-9), "sum={}", sum);
        for p in &probs {
            prop_assert!((0.0..=1.0 + TOL).contains(p));
        }
    }

    /// Normalization preserves ranking.
    #[test]
    fn normalized_preserves_order(a in -500.0..0.0f64, b in -500.0..0.0f64) {
        let probs = normalize_log_probs(&[a, b]);
        if a > b {
            prop_assert!(probs[0] >= probs[1]);
        } else if b > a {
            prop_assert!(probs[1] >= probs[0]);
        }
    }

    /// ln_ratio agrees with the difference of logs for positive inputs.
    #[test]
    fn ln_ratio_is_log_difference(n in 1u32..10_000, d in 1u32..10_000) {
        let (n, d) = (n as f64, d as f64);
        prop_assert!(approx_eq(ln_ratio(n, d), n.ln() - d.ln(), 1e-12));
    }
}
