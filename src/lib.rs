#![forbid(unsafe_code)]

//! # `choice_models`
//!
//! Reusable estimation routines for discrete-choice (conjoint) data: a
//! multinomial logit likelihood engine, a Newton-Raphson maximum-likelihood
//! fitter, and a random-walk Metropolis-Hastings posterior sampler.
//!
//! The crate was initially developed for conjoint survey analyses, but the API
//! is intentionally survey-agnostic and works with any grouped choice-task
//! data where each task has exactly one chosen alternative.

pub mod inference;
pub mod input;
pub mod models;
pub mod utils;

pub use inference::{ChainSchedule, InferenceError, ProposalStats};
pub use input::{ChoiceDataset, ChoiceInputError};

pub use models::mnl::{
    Adaptation, DrawHistory, GaussianPriorConfig, MleFit, MleOptions, MnlBayesReport, MnlError,
    MnlModel, MnlSamplerConfig, ParameterSummary, PosteriorSummary, ProposalTuning,
    SamplerDiagnostics, autocorrelation, effective_sample_size, fit_mnl_bayes, fit_mnl_mle,
    log_likelihood, negative_log_likelihood, sample_chain, softmax_from_utilities,
    summarize_draws,
};
