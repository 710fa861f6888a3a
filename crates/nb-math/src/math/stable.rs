//! Numerically stable primitives for log-domain scoring.

/// Stable log(sum(exp(values))).
///
/// Returns NEG_INFINITY for empty input or all -inf inputs.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NEG_INFINITY;
    }
    if values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    if max == f64::INFINITY {
        return f64::INFINITY;
    }
    let mut sum = 0.0;
    for v in values {
        sum += (*v - max).exp();
    }
    max + sum.ln()
}

/// Turn unnormalized log scores into probabilities that sum to 1.
///
/// Entries at -inf map to exactly 0. When every entry is -inf there is no
/// mass to distribute and the result is all zeros. NaN anywhere poisons the
/// whole result.
pub fn normalize_log_probs(log_scores: &[f64]) -> Vec<f64> {
    let lse = log_sum_exp(log_scores);
    if lse.is_nan() {
        return vec![f64::NAN; log_scores.len()];
    }
    if lse == f64::NEG_INFINITY {
        return vec![0.0; log_scores.len()];
    }
    if lse == f64::INFINITY {
        // Only +inf entries carry mass; split it evenly among them.
        let hits = log_scores.iter().filter(|s| **s == f64::INFINITY).count() as f64;
        return log_scores
            .iter()
            .map(|s| if *s == f64::INFINITY { 1.0 / hits } else { 0.0 })
            .collect();
    }
    log_scores.iter().map(|s| (s - lse).exp()).collect()
}

/// ln(numerator / denominator) for non-negative counts.
///
/// A zero numerator yields -inf. A zero denominator is undefined and yields
/// NaN, matching IEEE division.
pub fn ln_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return f64::NAN;
    }
    (numerator / denominator).ln()
}
