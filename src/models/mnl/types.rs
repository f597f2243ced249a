//! Core public types for the MNL module.

use thiserror::Error;

use crate::inference::{ChainSchedule, InferenceError};
use crate::input::ChoiceInputError;

use super::posterior::PosteriorSummary;
use super::priors::GaussianPriorConfig;

/// Errors returned by MNL configuration, validation, and fitting.
#[derive(Debug, Error)]
pub enum MnlError {
    #[error(transparent)]
    InvalidInput(#[from] ChoiceInputError),
    #[error(transparent)]
    InvalidSchedule(#[from] InferenceError),
    #[error("task ({respondent}, {task}) has no chosen alternative")]
    MissingChosenRow { respondent: u64, task: u64 },
    #[error("task ({respondent}, {task}) has more than one chosen alternative")]
    MultipleChosenRows { respondent: u64, task: u64 },
    #[error("design columns ({design_cols}) must match coefficient length ({coef_len})")]
    DesignCoefficientMismatch { design_cols: usize, coef_len: usize },
    #[error("coefficient vector contains non-finite values")]
    NonFiniteCoefficients,
    #[error("proposal scale length ({len}) must match parameter dimension ({dim})")]
    ProposalScaleMismatch { len: usize, dim: usize },
    #[error("prior variance length ({len}) must match parameter dimension ({dim})")]
    PriorDimensionMismatch { len: usize, dim: usize },
    #[error("start vector length ({len}) must match parameter dimension ({dim})")]
    StartDimensionMismatch { len: usize, dim: usize },
    #[error("start vector contains non-finite values")]
    NonFiniteStart,
    #[error("log-posterior is non-finite at the start vector")]
    NonFiniteStartPosterior,
    #[error("invalid proposal tuning configuration")]
    InvalidProposalTuning,
    #[error("invalid prior configuration")]
    InvalidPriorConfig,
    #[error("invalid maximum-likelihood options")]
    InvalidMleOptions,
    #[error("burn-in ({burn_in}) must be smaller than the number of draws ({draws})")]
    BurnInExceedsDraws { burn_in: usize, draws: usize },
    #[error("posterior draws are required")]
    EmptyPosterior,
    #[error("linear solve failed")]
    SolveFailed,
    #[error("maximum-likelihood fitting did not converge")]
    NonConvergence,
}

/// Acceptance-window adaptation of proposal scales.
///
/// Disabled by default; the fixed-variance random walk is the reference
/// behavior. When enabled, scales are rescaled multiplicatively toward the
/// target acceptance window during the leading `prefix` iterations only, so
/// the tail of the chain is a plain fixed-scale Metropolis-Hastings walk.
#[derive(Debug, Clone, Copy)]
pub struct Adaptation {
    /// Adapt only during the first `prefix` iterations of the chain.
    pub prefix: usize,
    /// Rescale every `interval` proposals.
    pub interval: usize,
    /// Lower acceptance-rate target.
    pub acceptance_target_low: f64,
    /// Upper acceptance-rate target.
    pub acceptance_target_high: f64,
    /// Multiplicative scale decrease when acceptance is below target.
    pub scale_decrease_factor: f64,
    /// Multiplicative scale increase when acceptance is above target.
    pub scale_increase_factor: f64,
}

impl Default for Adaptation {
    fn default() -> Self {
        Self {
            prefix: 1_000,
            interval: 50,
            acceptance_target_low: 0.2,
            acceptance_target_high: 0.35,
            scale_decrease_factor: 0.9,
            scale_increase_factor: 1.1,
        }
    }
}

impl Adaptation {
    /// Whether the adaptation settings are numerically valid.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.interval > 0
            && self.acceptance_target_low >= 0.0
            && self.acceptance_target_high <= 1.0
            && self.acceptance_target_low < self.acceptance_target_high
            && self.scale_decrease_factor > 0.0
            && self.scale_decrease_factor < 1.0
            && self.scale_increase_factor > 1.0
    }
}

/// Per-dimension random-walk proposal configuration.
#[derive(Debug, Clone)]
pub struct ProposalTuning {
    /// Per-dimension proposal standard deviations.
    pub scales: Vec<f64>,
    /// Minimum allowed proposal scale.
    pub min_scale: f64,
    /// Optional acceptance-window adaptation; `None` keeps scales fixed.
    pub adaptation: Option<Adaptation>,
}

impl ProposalTuning {
    /// Fixed-scale tuning with the default minimum scale and no adaptation.
    #[must_use]
    pub const fn fixed(scales: Vec<f64>) -> Self {
        Self {
            scales,
            min_scale: 1.0e-3,
            adaptation: None,
        }
    }

    /// Whether the tuning settings are numerically valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.scales.is_empty()
            && self
                .scales
                .iter()
                .all(|scale| scale.is_finite() && *scale > 0.0)
            && self.min_scale > 0.0
            && self.adaptation.is_none_or(Adaptation::is_valid)
    }
}

/// Full sampler configuration for Bayesian MNL fitting.
#[derive(Debug, Clone)]
pub struct MnlSamplerConfig {
    pub schedule: ChainSchedule,
    pub prior: GaussianPriorConfig,
    pub tuning: ProposalTuning,
    /// Starting parameter vector; zeros when `None`.
    pub start: Option<Vec<f64>>,
}

impl MnlSamplerConfig {
    /// Default schedule with an isotropic prior and uniform proposal scales.
    #[must_use]
    pub fn for_dimension(dim: usize) -> Self {
        Self {
            schedule: ChainSchedule::default(),
            prior: GaussianPriorConfig::isotropic(1_000.0, dim),
            tuning: ProposalTuning::fixed(vec![0.1; dim]),
            start: None,
        }
    }

    /// # Errors
    ///
    /// Returns `MnlError` if any configuration block is invalid.
    pub fn validate(&self) -> Result<(), MnlError> {
        self.schedule.validate()?;
        if !self.prior.is_valid() {
            return Err(MnlError::InvalidPriorConfig);
        }
        if !self.tuning.is_valid() {
            return Err(MnlError::InvalidProposalTuning);
        }
        Ok(())
    }
}

/// Fitted MNL model metadata.
#[derive(Debug, Clone)]
pub struct MnlModel {
    /// Number of encoded attribute columns.
    pub n_features: usize,
    /// Number of choice tasks.
    pub n_tasks: usize,
    /// Number of distinct respondents.
    pub n_respondents: usize,
}

/// Chain-level diagnostics from the Metropolis-Hastings sampler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SamplerDiagnostics {
    /// Chain length, counting the start vector.
    pub steps: usize,
    /// Number of proposals made (`steps - 1`).
    pub proposed: usize,
    /// Number of accepted proposals.
    pub accepted: usize,
    /// Proposals rejected because the log-posterior was non-finite.
    pub non_finite_proposals: usize,
    /// Acceptance rate in `[0, 1]`.
    pub acceptance_rate: f64,
}

/// Output report from Bayesian MNL fitting.
#[derive(Debug, Clone)]
pub struct MnlBayesReport {
    pub diagnostics: SamplerDiagnostics,
    pub posterior_summary: PosteriorSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(MnlSamplerConfig::for_dimension(3).validate().is_ok());
    }

    #[test]
    fn config_rejects_invalid_scales() {
        let mut config = MnlSamplerConfig::for_dimension(2);
        config.tuning.scales[1] = -0.5;
        assert!(matches!(
            config.validate(),
            Err(MnlError::InvalidProposalTuning)
        ));
    }

    #[test]
    fn config_rejects_invalid_prior() {
        let mut config = MnlSamplerConfig::for_dimension(2);
        config.prior = GaussianPriorConfig::isotropic(0.0, 2);
        assert!(matches!(config.validate(), Err(MnlError::InvalidPriorConfig)));
    }

    #[test]
    fn config_rejects_invalid_schedule() {
        let mut config = MnlSamplerConfig::for_dimension(2);
        config.schedule.burn_in = config.schedule.steps;
        assert!(matches!(config.validate(), Err(MnlError::InvalidSchedule(_))));
    }

    #[test]
    fn adaptation_defaults_are_valid() {
        assert!(Adaptation::default().is_valid());
    }

    #[test]
    fn adaptation_rejects_inverted_targets() {
        let adaptation = Adaptation {
            acceptance_target_low: 0.5,
            acceptance_target_high: 0.3,
            ..Adaptation::default()
        };
        assert!(!adaptation.is_valid());
    }

    #[test]
    fn tuning_with_adaptation_validates() {
        let tuning = ProposalTuning {
            adaptation: Some(Adaptation::default()),
            ..ProposalTuning::fixed(vec![0.2, 0.05])
        };
        assert!(tuning.is_valid());
    }
}
