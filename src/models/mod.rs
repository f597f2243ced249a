//! # Models
//!
//! Model implementations for grouped discrete-choice data. Currently the
//! multinomial logit (MNL) family with maximum-likelihood and Bayesian
//! posterior-sampling workflows.

pub mod mnl;
