#![cfg(feature = "serde")]

use approx::assert_relative_eq;
use efficiency::{
    AgreementTiers, Error, EvaluationConfig, Modality, Trial, TrialRow, evaluate_all,
    remove_flat_treadmill, summary,
};

const TRIALS: &str = include_str!("data/trials.csv");

fn load(config: &EvaluationConfig) -> (Vec<Trial>, Vec<Error>) {
    let mut reader = csv::Reader::from_reader(TRIALS.as_bytes());

    let mut trials = Vec::new();
    let mut errors = Vec::new();

    for row in reader.deserialize::<TrialRow>() {
        match row.expect("fixture rows are well formed").into_trial(config) {
            Ok(trial) => trials.push(trial),
            Err(e) => errors.push(e),
        }
    }

    (trials, errors)
}

#[test]
fn test_invalid_rows_are_rejected() {
    let (trials, errors) = load(&EvaluationConfig::default());

    assert_eq!(trials.len(), 9);
    assert_eq!(errors.len(), 3);
    assert!(errors.contains(&Error::NonPositiveMass(0.0)));
    assert!(errors.contains(&Error::UnknownModality("rower".to_owned())));
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, Error::InvalidParameter { field: "speed_mph", .. }))
    );
}

#[test]
fn test_full_pipeline() {
    let config = EvaluationConfig::default();
    let (trials, _) = load(&config);

    let trials = remove_flat_treadmill(trials, 0.0);
    assert_eq!(trials.len(), 8);
    assert!(trials.iter().all(|this| this.id.as_deref() != Some("t1")));

    let evaluated = evaluate_all(trials, &config);
    assert_eq!(evaluated.len(), 8);

    let stair_eta = evaluated
        .iter()
        .filter(|this| this.trial.modality() == Modality::Stair)
        .map(|this| this.energetics.efficiency_theory_net)
        .collect::<Vec<_>>();

    assert_eq!(stair_eta.len(), 4);
    for eta in &stair_eta {
        assert_relative_eq!(*eta, 0.1384, epsilon = 1e-3);
    }

    let treadmill = summary::treadmill_summary(&evaluated);
    let grades = treadmill.iter().map(|this| this.grade_pct).collect::<Vec<_>>();
    assert_eq!(grades, vec![5.0, 10.0, 15.0]);
    assert_eq!(treadmill[1].n, 2);
    assert_relative_eq!(treadmill[1].eff_theory, 0.167, epsilon = 1e-3);

    // theory efficiency grows with grade
    assert!(treadmill.windows(2).all(|w| w[0].eff_theory < w[1].eff_theory));

    let stair = summary::stair_summary(&evaluated);
    assert_eq!(stair.len(), 2);
    assert_relative_eq!(stair[0].aw.unwrap(), 11.0, epsilon = 1e-9);
    // s4 carries no wearable reading
    assert_relative_eq!(stair[1].aw.unwrap(), 13.9, epsilon = 1e-9);
    assert_eq!(stair[1].n, 2);

    let conditions = summary::condition_summary(&evaluated);
    assert_eq!(conditions.len(), 5);

    let mut tiers = AgreementTiers::default();
    for measured in evaluated.iter().filter_map(|this| this.energetics.measured.as_ref()) {
        tiers.record_measured(measured);
    }
    assert_eq!(tiers.total(), 7);
}

#[test]
fn test_flat_rows_kept_when_requested() {
    let config = EvaluationConfig::default();
    let (trials, _) = load(&config);

    let evaluated = evaluate_all(trials, &config);
    let flat = evaluated
        .iter()
        .find(|this| this.trial.id.as_deref() == Some("t1"))
        .unwrap();

    assert_eq!(flat.energetics.mechanical_power_w, 0.0);
    assert_eq!(flat.energetics.efficiency_theory_net, 0.0);

    let measured = flat.energetics.measured.as_ref().unwrap();
    assert_eq!(measured.efficiency, Some(0.0));
}

#[test]
fn test_custom_step_height() {
    let config = EvaluationConfig::default().with_step_height(0.15);
    let (trials, _) = load(&config);

    let evaluated = evaluate_all(trials, &config);

    let heights = evaluated
        .iter()
        .filter_map(|this| match this.trial.condition {
            efficiency::Condition::Stair { step_height_m, .. } => Some(step_height_m),
            _ => None,
        })
        .collect::<Vec<_>>();

    // s4 sets its own step height
    assert_eq!(heights, vec![0.15, 0.15, 0.15, 0.2032]);
}
