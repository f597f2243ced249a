use choice_models::{
    ChainSchedule, ChoiceDataset, GaussianPriorConfig, MleOptions, MnlError, MnlSamplerConfig,
    ProposalTuning, fit_mnl_bayes, fit_mnl_mle, summarize_draws,
};
use faer::Mat;

/// Three respondents answer two tasks each, choosing among three brand
/// alternatives encoded with reference coding (columns: brand A, brand B;
/// brand C is the baseline). Brand A wins four of six tasks, matching a
/// strong preference for A without perfect separation.
fn brand_scenario() -> ChoiceDataset {
    let winners = [0usize, 0, 0, 0, 1, 2];
    let n_rows = winners.len() * 3;

    let features = Mat::from_fn(n_rows, 2, |row, col| {
        let alternative = row % 3;
        if (col == 0 && alternative == 0) || (col == 1 && alternative == 1) {
            1.0
        } else {
            0.0
        }
    });
    let mut chosen = vec![false; n_rows];
    for (task, winner) in winners.iter().enumerate() {
        chosen[task * 3 + winner] = true;
    }
    let respondent_ids = (0..n_rows)
        .map(|row| u64::try_from(row / 6).unwrap_or(0))
        .collect();
    let task_ids = (0..n_rows)
        .map(|row| u64::try_from(row / 3).unwrap_or(0))
        .collect();

    ChoiceDataset::new(features, chosen, respondent_ids, task_ids)
}

fn brand_config() -> MnlSamplerConfig {
    MnlSamplerConfig {
        schedule: ChainSchedule {
            steps: 6_000,
            burn_in: 1_500,
            seed: 2_026,
        },
        prior: GaussianPriorConfig::isotropic(100.0, 2),
        tuning: ProposalTuning::fixed(vec![0.6, 0.6]),
        start: None,
    }
}

#[test]
fn mle_prefers_the_dominant_brand() {
    let fit = fit_mnl_mle(&brand_scenario(), MleOptions::default()).expect("fit should succeed");
    assert!(fit.converged);
    assert!(fit.coefficients[0] > 0.0);
}

#[test]
fn posterior_mean_falls_inside_the_mle_confidence_interval() {
    let dataset = brand_scenario();
    let mle = fit_mnl_mle(&dataset, MleOptions::default()).expect("mle should succeed");
    let (model, report, _) = fit_mnl_bayes(&dataset, &brand_config()).expect("bayes should run");

    assert_eq!(model.n_features, 2);
    assert_eq!(model.n_tasks, 6);
    assert_eq!(model.n_respondents, 3);

    let posterior_mean = report.posterior_summary.coefficients[0].mean;
    assert!(mle.confidence_intervals[0].contains(posterior_mean));
}

#[test]
fn chain_starts_at_the_configured_start_vector() {
    let config = MnlSamplerConfig {
        start: Some(vec![0.25, -0.5]),
        ..brand_config()
    };
    let (_, _, history) = fit_mnl_bayes(&brand_scenario(), &config).expect("bayes should run");
    assert_eq!(history.draws[0], vec![0.25, -0.5]);
    assert_eq!(history.len(), config.schedule.steps);
}

#[test]
fn full_workflow_is_reproducible_for_a_fixed_seed() {
    let dataset = brand_scenario();
    let config = brand_config();
    let (_, first_report, first_history) =
        fit_mnl_bayes(&dataset, &config).expect("bayes should run");
    let (_, second_report, second_history) =
        fit_mnl_bayes(&dataset, &config).expect("bayes should run");

    assert_eq!(first_history.draws, second_history.draws);
    assert!(
        (first_report.diagnostics.acceptance_rate - second_report.diagnostics.acceptance_rate)
            .abs()
            < f64::EPSILON
    );
}

#[test]
fn report_summary_matches_manual_burn_in_trimming() {
    let dataset = brand_scenario();
    let config = brand_config();
    let (_, report, history) = fit_mnl_bayes(&dataset, &config).expect("bayes should run");

    let manual = summarize_draws(&history, config.schedule.burn_in).expect("summary should run");
    assert_eq!(report.posterior_summary.draw_count, manual.draw_count);
    assert!(
        (report.posterior_summary.coefficients[0].mean - manual.coefficients[0].mean).abs()
            < f64::EPSILON
    );
}

#[test]
fn sampler_diagnostics_account_for_every_proposal() {
    let (_, report, history) =
        fit_mnl_bayes(&brand_scenario(), &brand_config()).expect("bayes should run");
    let diagnostics = report.diagnostics;

    assert_eq!(diagnostics.proposed, history.len() - 1);
    assert!(diagnostics.accepted <= diagnostics.proposed);
    assert!(diagnostics.acceptance_rate > 0.0);
    assert_eq!(diagnostics.non_finite_proposals, 0);
}

#[test]
fn degenerate_tasks_fail_before_sampling() {
    let mut dataset = brand_scenario();
    // Clear the winner of the first task so it has no chosen alternative.
    dataset.chosen[0] = false;
    let err = fit_mnl_bayes(&dataset, &brand_config()).expect_err("missing chosen should fail");
    assert!(matches!(err, MnlError::MissingChosenRow { .. }));
}

#[test]
fn prior_dimension_mismatch_fails_before_sampling() {
    let config = MnlSamplerConfig {
        prior: GaussianPriorConfig::isotropic(100.0, 3),
        ..brand_config()
    };
    let err = fit_mnl_bayes(&brand_scenario(), &config).expect_err("prior mismatch should fail");
    assert!(matches!(
        err,
        MnlError::PriorDimensionMismatch { len: 3, dim: 2 }
    ));
}
