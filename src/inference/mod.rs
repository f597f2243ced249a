//! Reusable inference and MCMC utility types.

use thiserror::Error;

use crate::utils::usize_to_f64;

/// Errors for generic MCMC configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InferenceError {
    #[error("steps must be positive")]
    InvalidSteps,
    #[error("burn-in ({burn_in}) must be smaller than steps ({steps})")]
    InvalidBurnIn { burn_in: usize, steps: usize },
}

/// Generic MCMC schedule.
///
/// `burn_in` only controls which leading draws downstream summaries discard;
/// the sampler itself always returns the full chain history.
#[derive(Debug, Clone, Copy)]
pub struct ChainSchedule {
    /// Chain length, counting the start vector as the first draw.
    pub steps: usize,
    /// Leading draws discarded by posterior summaries.
    pub burn_in: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

impl Default for ChainSchedule {
    fn default() -> Self {
        Self {
            steps: 10_000,
            burn_in: 2_000,
            seed: 42,
        }
    }
}

impl ChainSchedule {
    /// # Errors
    ///
    /// Returns `InferenceError` if schedule values are invalid.
    pub const fn validate(self) -> Result<(), InferenceError> {
        if self.steps == 0 {
            return Err(InferenceError::InvalidSteps);
        }
        if self.burn_in >= self.steps {
            return Err(InferenceError::InvalidBurnIn {
                burn_in: self.burn_in,
                steps: self.steps,
            });
        }
        Ok(())
    }

    /// Number of draws retained by summaries after burn-in removal.
    #[must_use]
    pub const fn retained_draws(self) -> usize {
        self.steps - self.burn_in
    }
}

/// Proposal counters for a single Metropolis-Hastings block.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProposalStats {
    pub proposed: usize,
    pub accepted: usize,
}

impl ProposalStats {
    /// Record one proposal and whether it was accepted.
    pub const fn record(&mut self, accepted: bool) {
        self.proposed += 1;
        if accepted {
            self.accepted += 1;
        }
    }

    /// Acceptance rate in `[0, 1]`, or `0` if no proposals were made.
    #[must_use]
    pub fn acceptance_rate(self) -> f64 {
        if self.proposed == 0 {
            0.0
        } else {
            usize_to_f64(self.accepted) / usize_to_f64(self.proposed)
        }
    }
}
