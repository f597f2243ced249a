//! Random-walk Metropolis on a hand-written two-dimensional Gaussian target,
//! without any choice data involved. Useful for checking proposal scales.

use choice_models::{ProposalTuning, sample_chain, summarize_draws};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Independent normals with standard deviations 1 and 3.
    let log_posterior = |beta: &[f64]| {
        let a = beta[0];
        let b = beta[1] / 3.0;
        -0.5 * a.mul_add(a, b * b)
    };

    let mut rng = StdRng::seed_from_u64(7);
    let tuning = ProposalTuning::fixed(vec![0.8, 2.4]);
    let (history, diagnostics) =
        sample_chain(log_posterior, &[0.0, 0.0], 20_000, &tuning, &mut rng)?;

    println!(
        "{} draws, acceptance rate {:.3}, non-finite proposals {}",
        history.len(),
        diagnostics.acceptance_rate,
        diagnostics.non_finite_proposals
    );

    let summary = summarize_draws(&history, 4_000)?;
    for (index, parameter) in summary.coefficients.iter().enumerate() {
        println!(
            "theta[{index}]: mean={:.3}, sd={:.3}, 95% interval [{:.3}, {:.3}]",
            parameter.mean, parameter.std_dev, parameter.q025, parameter.q975
        );
    }

    Ok(())
}
