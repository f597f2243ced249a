//! Newton-Raphson maximum likelihood for the MNL model.
//!
//! The score and observed information have closed forms for the multinomial
//! logit: per task, the score is the chosen row's features minus the
//! probability-weighted feature mean, and the information is the weighted
//! feature covariance. Newton steps with faer linear solves converge in a
//! handful of iterations on well-conditioned data.

use faer::Mat;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::input::ChoiceDataset;
use crate::utils::{matrix_is_finite, max_slice_abs_diff, solve_linear_system, vec_to_column};

use super::input::{TaskRows, prepare_tasks};
use super::likelihood::{log_likelihood_tasks, softmax_from_utilities, task_utilities};
use super::types::MnlError;

const HESSIAN_RIDGE: f64 = 1.0e-8;

/// Options for Newton-Raphson maximum-likelihood fitting.
#[derive(Debug, Clone, Copy)]
pub struct MleOptions {
    /// Maximum number of Newton iterations.
    pub max_iterations: usize,
    /// Convergence threshold on the largest absolute step component.
    pub tolerance: f64,
    /// Coverage level for Wald confidence intervals, in `(0, 1)`.
    pub confidence_level: f64,
}

impl Default for MleOptions {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance: 1.0e-8,
            confidence_level: 0.95,
        }
    }
}

impl MleOptions {
    /// Whether the options are numerically valid.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.max_iterations > 0
            && self.tolerance.is_finite()
            && self.tolerance > 0.0
            && self.confidence_level > 0.0
            && self.confidence_level < 1.0
    }
}

/// Two-sided confidence interval for one coefficient.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Whether `value` lies inside the interval, inclusive.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Maximum-likelihood fit with Hessian-based standard errors.
#[derive(Debug, Clone)]
pub struct MleFit {
    pub coefficients: Vec<f64>,
    pub std_errors: Vec<f64>,
    pub confidence_intervals: Vec<ConfidenceInterval>,
    pub log_likelihood: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Fit MNL coefficients by Newton-Raphson maximum likelihood.
///
/// # Errors
///
/// Returns `MnlError` if the dataset or options are invalid, a Newton solve
/// fails, or the fit does not reach a finite optimum.
pub fn fit_mnl_mle(input: &ChoiceDataset, options: MleOptions) -> Result<MleFit, MnlError> {
    if !options.is_valid() {
        return Err(MnlError::InvalidMleOptions);
    }
    let prepared = prepare_tasks(input)?;
    let dim = input.n_features();
    let mut beta = vec![0.0; dim];
    let mut iterations = 0;
    let mut converged = false;

    for iteration in 0..options.max_iterations {
        let (gradient, hessian) = score_and_hessian(&input.features, &prepared.tasks, &beta);
        let delta = solve_linear_system(&hessian, &vec_to_column(&gradient))?;

        let previous = beta.clone();
        for i in 0..dim {
            beta[i] -= delta[(i, 0)];
        }
        iterations = iteration + 1;

        if max_slice_abs_diff(&beta, &previous) < options.tolerance {
            converged = true;
            break;
        }
    }

    if !converged {
        return Err(MnlError::NonConvergence);
    }

    let log_likelihood = log_likelihood_tasks(&input.features, &prepared.tasks, &beta);
    if !log_likelihood.is_finite() {
        return Err(MnlError::NonConvergence);
    }

    let (_, hessian) = score_and_hessian(&input.features, &prepared.tasks, &beta);
    let std_errors = hessian_standard_errors(&hessian)?;
    let z = normal_quantile(1.0 - (1.0 - options.confidence_level) / 2.0);
    let confidence_intervals = beta
        .iter()
        .zip(std_errors.iter())
        .map(|(coefficient, std_error)| ConfidenceInterval {
            lower: z.mul_add(-std_error, *coefficient),
            upper: z.mul_add(*std_error, *coefficient),
        })
        .collect();

    Ok(MleFit {
        coefficients: beta,
        std_errors,
        confidence_intervals,
        log_likelihood,
        iterations,
        converged,
    })
}

/// Score vector and Hessian of the MNL log-likelihood at `beta`.
fn score_and_hessian(
    features: &Mat<f64>,
    tasks: &[TaskRows],
    beta: &[f64],
) -> (Vec<f64>, Mat<f64>) {
    let dim = beta.len();
    let mut gradient = vec![0.0; dim];
    let mut hessian = Mat::<f64>::zeros(dim, dim);

    for task in tasks {
        let utilities = task_utilities(features, &task.rows, beta);
        let probabilities = softmax_from_utilities(&utilities);

        let mut weighted_mean = vec![0.0; dim];
        for (row, probability) in task.rows.iter().copied().zip(probabilities.iter()) {
            for col in 0..dim {
                weighted_mean[col] += probability * features[(row, col)];
            }
        }

        let chosen_row = task.rows[task.chosen_position];
        for col in 0..dim {
            gradient[col] += features[(chosen_row, col)] - weighted_mean[col];
        }

        for (row, probability) in task.rows.iter().copied().zip(probabilities.iter()) {
            for i in 0..dim {
                for j in 0..dim {
                    hessian[(i, j)] -= probability * features[(row, i)] * features[(row, j)];
                }
            }
        }
        for i in 0..dim {
            for j in 0..dim {
                hessian[(i, j)] += weighted_mean[i] * weighted_mean[j];
            }
        }
    }

    for i in 0..dim {
        hessian[(i, i)] -= HESSIAN_RIDGE;
    }

    (gradient, hessian)
}

/// Standard errors from the inverse observed information `(-H)^-1`.
fn hessian_standard_errors(hessian: &Mat<f64>) -> Result<Vec<f64>, MnlError> {
    let dim = hessian.nrows();
    let information = Mat::from_fn(dim, dim, |i, j| -hessian[(i, j)]);
    let identity = Mat::from_fn(dim, dim, |i, j| if i == j { 1.0 } else { 0.0 });
    let covariance = solve_linear_system(&information, &identity)?;
    if !matrix_is_finite(&covariance) {
        return Err(MnlError::SolveFailed);
    }
    Ok((0..dim)
        .map(|i| covariance[(i, i)].max(0.0).sqrt())
        .collect())
}

fn normal_quantile(p: f64) -> f64 {
    Normal::new(0.0, 1.0).map_or(f64::NAN, |normal| normal.inverse_cdf(p))
}
