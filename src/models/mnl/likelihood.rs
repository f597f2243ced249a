//! Multinomial logit likelihood engine.
//!
//! Each choice task contributes the log-probability of its chosen alternative
//! under the softmax of linear utilities. Utilities are centered on their
//! maximum before exponentiation, which leaves every softmax ratio unchanged
//! while keeping the exponentials bounded.

use faer::Mat;

use crate::input::ChoiceDataset;
use crate::utils::dot_row;

use super::input::{TaskRows, prepare_tasks};
use super::types::MnlError;

/// Softmax probabilities over one task's utility vector.
///
/// Probabilities sum to one for any finite utilities; an empty slice yields
/// an empty vector.
#[must_use]
pub fn softmax_from_utilities(utilities: &[f64]) -> Vec<f64> {
    let Some(max) = utilities
        .iter()
        .copied()
        .max_by(f64::total_cmp)
        .filter(|max| max.is_finite())
    else {
        return vec![f64::NAN; utilities.len()];
    };
    let shifted: Vec<f64> = utilities.iter().map(|u| (u - max).exp()).collect();
    let denominator: f64 = shifted.iter().sum();
    shifted.iter().map(|value| value / denominator).collect()
}

/// Linear utilities `X_task * beta` for the rows of one task.
pub(crate) fn task_utilities(features: &Mat<f64>, rows: &[usize], beta: &[f64]) -> Vec<f64> {
    rows.iter()
        .map(|row| dot_row(features, *row, beta))
        .collect()
}

/// Log-probability of the chosen alternative: `u_chosen - logsumexp(u)`.
pub(crate) fn task_log_probability(utilities: &[f64], chosen_position: usize) -> f64 {
    let max = utilities
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return f64::NEG_INFINITY;
    }
    let log_denominator = utilities
        .iter()
        .map(|u| (u - max).exp())
        .sum::<f64>()
        .ln()
        + max;
    utilities[chosen_position] - log_denominator
}

/// Joint log-likelihood over prepared tasks.
///
/// Returns negative infinity when any task contribution is non-finite, which
/// the sampler treats as an impossible parameter region.
pub(crate) fn log_likelihood_tasks(features: &Mat<f64>, tasks: &[TaskRows], beta: &[f64]) -> f64 {
    let mut sum = 0.0;
    for task in tasks {
        let utilities = task_utilities(features, &task.rows, beta);
        let contribution = task_log_probability(&utilities, task.chosen_position);
        if !contribution.is_finite() {
            return f64::NEG_INFINITY;
        }
        sum += contribution;
    }
    sum
}

/// Joint MNL log-likelihood of `beta` on a choice dataset.
///
/// # Errors
///
/// Returns `MnlError` if the dataset is invalid, a task violates the
/// exactly-one-chosen invariant, or `beta` has the wrong length or non-finite
/// entries.
pub fn log_likelihood(input: &ChoiceDataset, beta: &[f64]) -> Result<f64, MnlError> {
    if beta.len() != input.n_features() {
        return Err(MnlError::DesignCoefficientMismatch {
            design_cols: input.n_features(),
            coef_len: beta.len(),
        });
    }
    if beta.iter().any(|value| !value.is_finite()) {
        return Err(MnlError::NonFiniteCoefficients);
    }
    let prepared = prepare_tasks(input)?;
    Ok(log_likelihood_tasks(
        &input.features,
        &prepared.tasks,
        beta,
    ))
}

/// Negation of [`log_likelihood`], for minimization-based callers.
///
/// # Errors
///
/// Same failure conditions as [`log_likelihood`].
pub fn negative_log_likelihood(input: &ChoiceDataset, beta: &[f64]) -> Result<f64, MnlError> {
    Ok(-log_likelihood(input, beta)?)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use faer::Mat;

    use super::*;

    fn two_alternative_dataset(chosen_first: bool) -> ChoiceDataset {
        ChoiceDataset::new(
            Mat::from_fn(2, 1, |_i, _| 1.0),
            vec![chosen_first, !chosen_first],
            vec![1, 1],
            vec![1, 1],
        )
    }

    #[test]
    fn softmax_sums_to_one() {
        let probabilities = softmax_from_utilities(&[0.5, -1.2, 3.0]);
        assert_relative_eq!(probabilities.iter().sum::<f64>(), 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn softmax_is_stable_for_large_utilities() {
        let probabilities = softmax_from_utilities(&[800.0, 801.0]);
        assert!(probabilities.iter().all(|p| p.is_finite()));
        assert_relative_eq!(probabilities.iter().sum::<f64>(), 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn equal_utilities_give_half_probability_either_way() {
        for chosen_first in [true, false] {
            let dataset = two_alternative_dataset(chosen_first);
            let ll = log_likelihood(&dataset, &[0.0]).expect("valid dataset");
            assert_relative_eq!(ll, 0.5f64.ln(), epsilon = 1.0e-12);
        }
    }

    #[test]
    fn negative_log_likelihood_is_exact_negation() {
        let dataset = two_alternative_dataset(true);
        let beta = [0.7];
        let ll = log_likelihood(&dataset, &beta).expect("valid dataset");
        let nll = negative_log_likelihood(&dataset, &beta).expect("valid dataset");
        assert_eq!(nll, -ll);
    }

    #[test]
    fn log_likelihood_is_bit_reproducible() {
        let dataset = ChoiceDataset::new(
            Mat::from_fn(6, 2, |i, j| {
                if j == 0 {
                    1.0
                } else {
                    0.25 * (1.0 + f64::from(u32::try_from(i % 3).unwrap_or(0)))
                }
            }),
            vec![true, false, false, false, true, false],
            vec![1, 1, 1, 2, 2, 2],
            vec![1, 1, 1, 1, 1, 1],
        );
        let beta = [0.3, -1.1];
        let first = log_likelihood(&dataset, &beta).expect("valid dataset");
        let second = log_likelihood(&dataset, &beta).expect("valid dataset");
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn log_likelihood_rejects_coefficient_length_mismatch() {
        let dataset = two_alternative_dataset(true);
        let err = log_likelihood(&dataset, &[0.0, 0.0]).expect_err("length mismatch should fail");
        assert!(matches!(
            err,
            MnlError::DesignCoefficientMismatch {
                design_cols: 1,
                coef_len: 2
            }
        ));
    }

    #[test]
    fn log_likelihood_rejects_non_finite_coefficients() {
        let dataset = two_alternative_dataset(true);
        let err = log_likelihood(&dataset, &[f64::NAN]).expect_err("NaN beta should fail");
        assert!(matches!(err, MnlError::NonFiniteCoefficients));
    }

    #[test]
    fn log_likelihood_surfaces_degenerate_tasks() {
        let dataset = ChoiceDataset::new(
            Mat::from_fn(2, 1, |_i, _| 1.0),
            vec![false, false],
            vec![1, 1],
            vec![1, 1],
        );
        let err = log_likelihood(&dataset, &[0.0]).expect_err("no chosen row should fail");
        assert!(matches!(err, MnlError::MissingChosenRow { .. }));
    }

    #[test]
    fn higher_utility_on_chosen_row_increases_likelihood() {
        let dataset = ChoiceDataset::new(
            Mat::from_fn(2, 1, |i, _| if i == 0 { 1.0 } else { 0.0 }),
            vec![true, false],
            vec![1, 1],
            vec![1, 1],
        );
        let low = log_likelihood(&dataset, &[0.0]).expect("valid dataset");
        let high = log_likelihood(&dataset, &[2.0]).expect("valid dataset");
        assert!(high > low);
    }
}
