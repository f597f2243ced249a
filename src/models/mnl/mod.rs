//! Multinomial logit (MNL) model for grouped choice tasks.
//!
//! This module provides the likelihood engine, a Newton-Raphson
//! maximum-likelihood fitter with Wald intervals, and a random-walk
//! Metropolis-Hastings sampler over the posterior implied by independent
//! Gaussian priors, plus posterior summaries and chain diagnostics.

pub mod diagnostics;
pub mod input;
pub mod likelihood;
pub mod mle;
pub mod posterior;
pub mod priors;
pub mod sampler;
pub mod types;

pub use diagnostics::{autocorrelation, coefficient_effective_sample_size, effective_sample_size};
pub use likelihood::{log_likelihood, negative_log_likelihood, softmax_from_utilities};
pub use mle::{ConfidenceInterval, MleFit, MleOptions, fit_mnl_mle};
pub use posterior::{DrawHistory, ParameterSummary, PosteriorSummary, summarize_draws};
pub use priors::{GaussianPriorConfig, log_zero_mean_normal_density};
pub use sampler::{fit_mnl_bayes, sample_chain};
pub use types::{
    Adaptation, MnlBayesReport, MnlError, MnlModel, MnlSamplerConfig, ProposalTuning,
    SamplerDiagnostics,
};
