//! Percent-scale normalization and rounding.
//!
//! Marginals are accumulated as unnormalized weights; these helpers turn a
//! weight vector into a percentage distribution and round it for display.

/// Scale `weights` so they sum to 100.
///
/// Returns `None` when the weights carry no mass (sum is zero, negative, or
/// not finite), since no distribution can be formed from them.
pub fn normalize_percent(weights: &[f64]) -> Option<Vec<f64>> {
    if weights.is_empty() || weights.iter().any(|w| w.is_nan() || *w < 0.0) {
        return None;
    }
    let sum: f64 = weights.iter().sum();
    if !sum.is_finite() || sum <= 0.0 {
        return None;
    }
    let scale = 100.0 / sum;
    Some(weights.iter().map(|w| w * scale).collect())
}

/// Round half away from zero to `places` decimals.
pub fn round_places(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
