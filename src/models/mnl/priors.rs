//! Independent Gaussian priors and log-density helpers for MNL.

/// Independent zero-mean Gaussian prior with per-dimension variances.
#[derive(Debug, Clone)]
pub struct GaussianPriorConfig {
    /// Variance for `Normal(0, variance)` on each coefficient.
    pub variances: Vec<f64>,
}

impl GaussianPriorConfig {
    /// Same prior variance for every coefficient.
    #[must_use]
    pub fn isotropic(variance: f64, dim: usize) -> Self {
        Self {
            variances: vec![variance; dim],
        }
    }

    /// Number of coefficients the prior covers.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.variances.len()
    }

    /// Whether all prior variances are numerically valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.variances.is_empty()
            && self
                .variances
                .iter()
                .all(|variance| variance.is_finite() && *variance > 0.0)
    }

    /// Joint log-density at `beta`, including normalizing constants.
    ///
    /// Only differences of this value enter Metropolis-Hastings acceptance
    /// ratios, so the constants are harmless. A dimension mismatch yields
    /// negative infinity rather than a panic so the sampler treats it as an
    /// impossible state.
    #[must_use]
    pub fn log_density(&self, beta: &[f64]) -> f64 {
        if beta.len() != self.variances.len() {
            return f64::NEG_INFINITY;
        }
        beta.iter()
            .zip(self.variances.iter())
            .map(|(value, variance)| log_zero_mean_normal_density(*value, *variance))
            .sum()
    }
}

/// Log-density for `Normal(0, variance)`.
#[must_use]
pub fn log_zero_mean_normal_density(value: f64, variance: f64) -> f64 {
    if variance <= 0.0 {
        return f64::NEG_INFINITY;
    }
    -0.5 * (std::f64::consts::TAU.ln() + variance.ln() + value * value / variance)
}
