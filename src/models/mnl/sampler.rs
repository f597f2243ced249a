//! Random-walk Metropolis-Hastings sampling for MNL posteriors.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::inference::{InferenceError, ProposalStats};
use crate::input::ChoiceDataset;

use super::input::prepare_tasks;
use super::likelihood::log_likelihood_tasks;
use super::posterior::{DrawHistory, summarize_draws};
use super::types::{
    Adaptation, MnlBayesReport, MnlError, MnlModel, MnlSamplerConfig, ProposalTuning,
    SamplerDiagnostics,
};

/// Draw a Metropolis-Hastings chain targeting an unnormalized log-posterior.
///
/// The proposal adds independent zero-mean Gaussian noise to every dimension
/// at once, with per-dimension standard deviations from `tuning.scales`. The
/// proposal is symmetric, so the acceptance ratio is just the log-posterior
/// difference. A candidate with a non-finite log-posterior is rejected
/// outright and counted in the returned diagnostics.
///
/// The returned history has exactly `steps` entries and starts with `start`.
/// No burn-in removal or thinning is applied here.
///
/// # Errors
///
/// Returns `MnlError` if `steps` is zero, tuning is invalid or mismatched
/// with `start`, or the log-posterior is non-finite at `start`.
pub fn sample_chain<F, R>(
    log_posterior: F,
    start: &[f64],
    steps: usize,
    tuning: &ProposalTuning,
    rng: &mut R,
) -> Result<(DrawHistory, SamplerDiagnostics), MnlError>
where
    F: Fn(&[f64]) -> f64,
    R: Rng,
{
    if steps == 0 {
        return Err(InferenceError::InvalidSteps.into());
    }
    if !tuning.is_valid() {
        return Err(MnlError::InvalidProposalTuning);
    }
    if tuning.scales.len() != start.len() {
        return Err(MnlError::ProposalScaleMismatch {
            len: tuning.scales.len(),
            dim: start.len(),
        });
    }
    if start.iter().any(|value| !value.is_finite()) {
        return Err(MnlError::NonFiniteStart);
    }

    let mut current = start.to_vec();
    let mut current_log_posterior = log_posterior(&current);
    if !current_log_posterior.is_finite() {
        return Err(MnlError::NonFiniteStartPosterior);
    }

    let mut scales = tuning.scales.clone();
    let mut draws = Vec::with_capacity(steps);
    draws.push(current.clone());

    let mut stats = ProposalStats::default();
    let mut window = ProposalStats::default();
    let mut non_finite_proposals = 0usize;
    let mut proposal = vec![0.0; current.len()];

    for step in 1..steps {
        random_walk_vector_into(&mut proposal, &current, &scales, rng, tuning.min_scale);
        let candidate_log_posterior = log_posterior(&proposal);

        let accepted = if candidate_log_posterior.is_finite() {
            should_accept(candidate_log_posterior - current_log_posterior, rng)
        } else {
            non_finite_proposals += 1;
            false
        };

        if accepted {
            current.copy_from_slice(&proposal);
            current_log_posterior = candidate_log_posterior;
        }
        stats.record(accepted);
        window.record(accepted);
        draws.push(current.clone());

        if let Some(adaptation) = tuning.adaptation {
            if step <= adaptation.prefix && window.proposed >= adaptation.interval {
                adapt_scales(
                    &mut scales,
                    window.acceptance_rate(),
                    adaptation,
                    tuning.min_scale,
                );
                window = ProposalStats::default();
            }
        }
    }

    let diagnostics = SamplerDiagnostics {
        steps,
        proposed: stats.proposed,
        accepted: stats.accepted,
        non_finite_proposals,
        acceptance_rate: stats.acceptance_rate(),
    };

    Ok((DrawHistory { draws }, diagnostics))
}

/// Fit the MNL model by posterior sampling and return the full chain.
///
/// Composes the likelihood engine with the configured Gaussian prior into a
/// log-posterior, seeds the generator from `config.schedule.seed`, runs the
/// chain, and summarizes the post-burn-in draws.
///
/// # Errors
///
/// Returns `MnlError` if the dataset or configuration is invalid.
pub fn fit_mnl_bayes(
    input: &ChoiceDataset,
    config: &MnlSamplerConfig,
) -> Result<(MnlModel, MnlBayesReport, DrawHistory), MnlError> {
    config.validate()?;
    let prepared = prepare_tasks(input)?;
    let dim = input.n_features();

    if config.prior.dimension() != dim {
        return Err(MnlError::PriorDimensionMismatch {
            len: config.prior.dimension(),
            dim,
        });
    }
    if config.tuning.scales.len() != dim {
        return Err(MnlError::ProposalScaleMismatch {
            len: config.tuning.scales.len(),
            dim,
        });
    }
    let start = config.start.clone().unwrap_or_else(|| vec![0.0; dim]);
    if start.len() != dim {
        return Err(MnlError::StartDimensionMismatch {
            len: start.len(),
            dim,
        });
    }

    let features = &input.features;
    let tasks = &prepared.tasks;
    let prior = &config.prior;
    let log_posterior =
        |beta: &[f64]| log_likelihood_tasks(features, tasks, beta) + prior.log_density(beta);

    let mut rng = StdRng::seed_from_u64(config.schedule.seed);
    let (history, diagnostics) = sample_chain(
        log_posterior,
        &start,
        config.schedule.steps,
        &config.tuning,
        &mut rng,
    )?;

    let posterior_summary = summarize_draws(&history, config.schedule.burn_in)?;
    let model = MnlModel {
        n_features: dim,
        n_tasks: prepared.n_tasks(),
        n_respondents: prepared.n_respondents(),
    };

    Ok((
        model,
        MnlBayesReport {
            diagnostics,
            posterior_summary,
        },
        history,
    ))
}

fn random_walk_vector_into<R: Rng>(
    output: &mut [f64],
    values: &[f64],
    scales: &[f64],
    rng: &mut R,
    min_scale: f64,
) {
    for (slot, (value, scale)) in output.iter_mut().zip(values.iter().zip(scales.iter())) {
        *slot = value + scale.max(min_scale) * sample_standard_normal(rng);
    }
}

fn should_accept<R: Rng>(log_acceptance: f64, rng: &mut R) -> bool {
    log_acceptance >= 0.0 || rng.random::<f64>().ln() < log_acceptance
}

fn sample_standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u1 = (1.0_f64 - rng.random::<f64>()).max(f64::MIN_POSITIVE);
    let u2 = rng.random::<f64>();
    (-2.0_f64 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

fn adapt_scales(scales: &mut [f64], acceptance: f64, adaptation: Adaptation, min_scale: f64) {
    let factor = if acceptance < adaptation.acceptance_target_low {
        adaptation.scale_decrease_factor
    } else if acceptance > adaptation.acceptance_target_high {
        adaptation.scale_increase_factor
    } else {
        1.0
    };
    for scale in scales {
        *scale = (*scale * factor).max(min_scale);
    }
}
