use choice_models::{
    ChainSchedule, ChoiceDataset, GaussianPriorConfig, MleOptions, MnlSamplerConfig,
    ProposalTuning, fit_mnl_bayes, fit_mnl_mle,
};
use faer::Mat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const N_RESPONDENTS: usize = 100;
const N_TASKS: usize = 8;
const SIMULATION_SEED: u64 = 11;

/// True weights: brand A dummy, brand B dummy, price.
const TRUE_BETA: [f64; 3] = [1.2, 0.5, -0.9];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dataset = simulate_conjoint(N_RESPONDENTS, N_TASKS, SIMULATION_SEED);

    let mle = fit_mnl_mle(&dataset, MleOptions::default())?;
    println!(
        "MLE converged in {} iterations, log-likelihood {:.3}",
        mle.iterations, mle.log_likelihood
    );
    for (index, name) in ["brand A", "brand B", "price"].iter().enumerate() {
        println!(
            "{name}: true={:.2}, mle={:.3} (se {:.3}), 95% CI [{:.3}, {:.3}]",
            TRUE_BETA[index],
            mle.coefficients[index],
            mle.std_errors[index],
            mle.confidence_intervals[index].lower,
            mle.confidence_intervals[index].upper
        );
    }

    let config = MnlSamplerConfig {
        schedule: ChainSchedule {
            steps: 10_000,
            burn_in: 2_500,
            seed: 2_026,
        },
        prior: GaussianPriorConfig::isotropic(100.0, 3),
        tuning: ProposalTuning::fixed(vec![0.1, 0.1, 0.04]),
        start: None,
    };
    let (model, report, _history) = fit_mnl_bayes(&dataset, &config)?;

    println!(
        "\nBayesian fit: {} respondents, {} tasks, {} features",
        model.n_respondents, model.n_tasks, model.n_features
    );
    println!(
        "Sampler: {} steps, acceptance rate {:.2}, non-finite proposals {}",
        report.diagnostics.steps,
        report.diagnostics.acceptance_rate,
        report.diagnostics.non_finite_proposals
    );
    for (index, name) in ["brand A", "brand B", "price"].iter().enumerate() {
        let summary = report.posterior_summary.coefficients[index];
        println!(
            "{name}: posterior mean={:.3} (sd {:.3}), 95% CrI [{:.3}, {:.3}]",
            summary.mean, summary.std_dev, summary.q025, summary.q975
        );
    }

    Ok(())
}

fn simulate_conjoint(n_respondents: usize, n_tasks: usize, seed: u64) -> ChoiceDataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let n_alternatives = 3;
    let n_rows = n_respondents * n_tasks * n_alternatives;

    let mut rows = Vec::with_capacity(n_rows);
    let mut chosen = vec![false; n_rows];
    let mut respondent_ids = Vec::with_capacity(n_rows);
    let mut task_ids = Vec::with_capacity(n_rows);

    for respondent in 0..n_respondents {
        for task in 0..n_tasks {
            let base = rows.len();
            let mut utilities = Vec::with_capacity(n_alternatives);
            for alternative in 0..n_alternatives {
                let brand_a = if alternative == 0 { 1.0 } else { 0.0 };
                let brand_b = if alternative == 1 { 1.0 } else { 0.0 };
                let price = rng.random::<f64>().mul_add(2.0, 0.5);
                utilities.push(TRUE_BETA[0].mul_add(
                    brand_a,
                    TRUE_BETA[1].mul_add(brand_b, TRUE_BETA[2] * price),
                ));
                rows.push([brand_a, brand_b, price]);
                respondent_ids.push(u64::try_from(respondent).unwrap_or(0));
                task_ids.push(u64::try_from(task).unwrap_or(0));
            }
            chosen[base + sample_winner(&utilities, &mut rng)] = true;
        }
    }

    let features = Mat::from_fn(n_rows, 3, |row, col| rows[row][col]);
    ChoiceDataset::new(features, chosen, respondent_ids, task_ids)
}

fn sample_winner(utilities: &[f64], rng: &mut StdRng) -> usize {
    let max = utilities.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = utilities.iter().map(|u| (u - max).exp()).collect();
    let total: f64 = weights.iter().sum();
    let mut threshold = rng.random::<f64>() * total;
    for (alternative, weight) in weights.iter().enumerate() {
        if threshold < *weight {
            return alternative;
        }
        threshold -= weight;
    }
    utilities.len() - 1
}
