//! Golomb parameter estimation from residual statistics.

/// Estimates the Golomb divisor that minimizes the coded length of
/// `residuals`.
///
/// Residuals of a good predictor follow a two-sided geometric
/// distribution; with mean absolute residual mu, p = 1 / (mu + 1)
/// estimates the mass at zero of the folded distribution and the
/// maximum-likelihood divisor is -1 / log2(1 - p). The result is rounded
/// half away from zero and floored at 1. An empty slice yields the
/// default of 8.
pub fn optimal_m(residuals: &[i32]) -> u32 {
    if residuals.is_empty() {
        return 8;
    }

    let total: u64 = residuals.iter().map(|r| u64::from(r.unsigned_abs())).sum();
    let mean = total as f64 / residuals.len() as f64;
    if mean < 1e-10 {
        return 1;
    }

    let p = 1.0 / (mean + 1.0);
    let m = -1.0 / (1.0 - p).log2();
    (m.round() as u32).max(1)
}
