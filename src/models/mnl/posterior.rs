//! Posterior draw storage and summaries for MNL.

use num_traits::ToPrimitive;

use crate::utils::usize_to_f64;

use super::types::MnlError;

/// Full Metropolis-Hastings draw history, one parameter vector per iteration.
///
/// The first element is the start vector; each later element is either a fresh
/// accepted proposal or a copy of its predecessor.
#[derive(Debug, Clone, Default)]
pub struct DrawHistory {
    pub draws: Vec<Vec<f64>>,
}

impl DrawHistory {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    /// Parameter dimension, or zero for an empty history.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.draws.first().map_or(0, Vec::len)
    }

    /// Scalar chain for one coefficient across all draws.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`Self::dimension`].
    #[must_use]
    pub fn coefficient_chain(&self, index: usize) -> Vec<f64> {
        assert!(
            self.is_empty() || index < self.dimension(),
            "coefficient index {index} out of range for dimension {}",
            self.dimension()
        );
        self.draws.iter().map(|draw| draw[index]).collect()
    }
}

/// Scalar posterior summary statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub q025: f64,
    pub q50: f64,
    pub q975: f64,
}

/// Posterior summary per coefficient after burn-in removal.
#[derive(Debug, Clone, Default)]
pub struct PosteriorSummary {
    pub coefficients: Vec<ParameterSummary>,
    /// Number of draws retained after burn-in removal.
    pub draw_count: usize,
}

/// Discard the first `burn_in` draws and summarize each coefficient.
///
/// # Errors
///
/// Returns `MnlError` if the history is empty or `burn_in` leaves no draws.
pub fn summarize_draws(history: &DrawHistory, burn_in: usize) -> Result<PosteriorSummary, MnlError> {
    if history.is_empty() {
        return Err(MnlError::EmptyPosterior);
    }
    if burn_in >= history.len() {
        return Err(MnlError::BurnInExceedsDraws {
            burn_in,
            draws: history.len(),
        });
    }

    let retained = &history.draws[burn_in..];
    let dimension = history.dimension();
    let coefficients = (0..dimension)
        .map(|index| {
            let values: Vec<f64> = retained.iter().map(|draw| draw[index]).collect();
            summarize_scalar(&values)
        })
        .collect();

    Ok(PosteriorSummary {
        coefficients,
        draw_count: retained.len(),
    })
}

#[must_use]
fn summarize_scalar(values: &[f64]) -> ParameterSummary {
    if values.is_empty() {
        return ParameterSummary::default();
    }

    let n = usize_to_f64(values.len());
    let mean = values.iter().sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|value| {
            let centered = value - mean;
            centered * centered
        })
        .sum::<f64>()
        / n.max(1.0);

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    ParameterSummary {
        mean,
        std_dev: variance.sqrt(),
        q025: percentile(&sorted, 0.025),
        q50: percentile(&sorted, 0.5),
        q975: percentile(&sorted, 0.975),
    }
}

#[must_use]
fn percentile(sorted_values: &[f64], probability: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }

    let clamped = probability.clamp(0.0, 1.0);
    let last = sorted_values.len() - 1;
    let position = clamped * usize_to_f64(last);
    let lower = position.floor().to_usize().unwrap_or(0);
    let upper = position.ceil().to_usize().unwrap_or(last);

    if lower == upper {
        sorted_values[lower]
    } else {
        let weight = position - usize_to_f64(lower);
        (1.0 - weight).mul_add(sorted_values[lower], weight * sorted_values[upper])
    }
}
