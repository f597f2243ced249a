//! Chain diagnostics for MNL posterior samples.

use crate::utils::usize_to_f64;

use super::posterior::DrawHistory;

/// Lag-`k` autocorrelation for a scalar chain.
#[must_use]
pub fn autocorrelation(series: &[f64], lag: usize) -> f64 {
    if series.is_empty() || lag >= series.len() {
        return 0.0;
    }

    let n = series.len() - lag;
    let mean = series.iter().sum::<f64>() / usize_to_f64(series.len());

    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for value in series {
        let centered = value - mean;
        denominator += centered * centered;
    }

    if denominator <= 0.0 {
        return 0.0;
    }

    for idx in 0..n {
        numerator += (series[idx] - mean) * (series[idx + lag] - mean);
    }

    numerator / denominator
}

/// Heuristic effective sample size using positive autocorrelation truncation.
#[must_use]
pub fn effective_sample_size(series: &[f64]) -> f64 {
    let n = series.len();
    if n < 2 {
        return usize_to_f64(n);
    }

    let mut rho_sum = 0.0;
    for lag in 1..n {
        let rho = autocorrelation(series, lag);
        if rho <= 0.0 {
            break;
        }
        rho_sum += rho;
    }

    usize_to_f64(n) / (2.0f64.mul_add(rho_sum, 1.0)).max(1.0)
}

/// Effective sample size for one coefficient of a draw history.
///
/// # Panics
///
/// Panics if `index` is not below [`DrawHistory::dimension`].
#[must_use]
pub fn coefficient_effective_sample_size(history: &DrawHistory, index: usize) -> f64 {
    effective_sample_size(&history.coefficient_chain(index))
}
