//! Grouping of evaluated trials.
//!
//! - [`condition_summary`] - by condition and body mass, full descriptive statistics
//! - [`treadmill_summary`] - efficiency vs grade, one line per speed
//! - [`stair_summary`] - measured vs ACSM NET kcal/min by step rate

use std::collections::BTreeMap;

use crate::{Condition, ConditionKey, Descriptive, Evaluated, OrderedF64};

#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionSummary {
    pub condition: Condition,
    pub mass_kg: f64,
    pub efficiency_theory: Descriptive,
    pub efficiency_measured: Option<Descriptive>,
    pub theory_net_kcal_min: Descriptive,
    pub measured_kcal_min: Option<Descriptive>,
    /// measured / theory kcal/min
    pub agreement: Option<Descriptive>,
}

/// Flat form of [`ConditionSummary`] suitable for a CSV line.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConditionSummaryRow {
    pub modality: String,
    pub speed_mph: Option<f64>,
    pub grade_pct: Option<f64>,
    pub spm: Option<f64>,
    pub step_height_m: Option<f64>,
    pub mass_kg: f64,
    pub n: usize,
    pub eff_theory_mean: f64,
    pub eff_measured_mean: Option<f64>,
    pub eff_measured_sd: Option<f64>,
    pub eff_measured_ci_low: Option<f64>,
    pub eff_measured_ci_high: Option<f64>,
    pub theory_net_kcal_min: f64,
    pub measured_kcal_min_mean: Option<f64>,
    pub measured_kcal_min_sd: Option<f64>,
    pub agreement_mean: Option<f64>,
}

impl From<&ConditionSummary> for ConditionSummaryRow {
    fn from(value: &ConditionSummary) -> Self {
        let (speed_mph, grade_pct, spm, step_height_m) = match value.condition {
            Condition::Treadmill {
                speed_mph,
                grade_pct,
            } => (Some(speed_mph), Some(grade_pct), None, None),
            Condition::Stair { spm, step_height_m } => (None, None, Some(spm), Some(step_height_m)),
        };

        let eff_measured = value.efficiency_measured.as_ref();
        let measured_kcal = value.measured_kcal_min.as_ref();

        Self {
            modality: value.condition.modality().to_string(),
            speed_mph,
            grade_pct,
            spm,
            step_height_m,
            mass_kg: value.mass_kg,
            n: value.efficiency_theory.n,
            eff_theory_mean: value.efficiency_theory.mean,
            eff_measured_mean: eff_measured.map(|this| this.mean),
            eff_measured_sd: eff_measured.and_then(|this| this.std_dev),
            eff_measured_ci_low: eff_measured.and_then(Descriptive::ci95).map(|(lo, _)| lo),
            eff_measured_ci_high: eff_measured.and_then(Descriptive::ci95).map(|(_, hi)| hi),
            theory_net_kcal_min: value.theory_net_kcal_min.mean,
            measured_kcal_min_mean: measured_kcal.map(|this| this.mean),
            measured_kcal_min_sd: measured_kcal.and_then(|this| this.std_dev),
            agreement_mean: value.agreement.as_ref().map(|this| this.mean),
        }
    }
}

/// Group trials by condition and body mass.
pub fn condition_summary<'a>(
    evaluated: impl IntoIterator<Item = &'a Evaluated>,
) -> Vec<ConditionSummary> {
    let mut groups = BTreeMap::<(ConditionKey, OrderedF64), Vec<&Evaluated>>::new();

    for this in evaluated {
        groups
            .entry((this.trial.condition.key(), OrderedF64::from(this.trial.mass_kg)))
            .or_default()
            .push(this);
    }

    groups
        .into_iter()
        .filter_map(|((condition, mass_kg), group)| {
            let measured = group
                .iter()
                .filter_map(|this| this.energetics.measured.as_ref())
                .collect::<Vec<_>>();

            Some(ConditionSummary {
                condition: condition.into(),
                mass_kg: mass_kg.into_inner(),
                efficiency_theory: Descriptive::from_samples(
                    group.iter().map(|this| this.energetics.efficiency_theory_net),
                )?,
                efficiency_measured: Descriptive::from_samples(
                    measured.iter().filter_map(|this| this.efficiency),
                ),
                theory_net_kcal_min: Descriptive::from_samples(
                    group.iter().map(|this| this.energetics.theory_net_kcal_min),
                )?,
                measured_kcal_min: Descriptive::from_samples(
                    measured.iter().map(|this| this.kcal_min),
                ),
                agreement: Descriptive::from_samples(
                    measured.iter().filter_map(|this| this.agreement),
                ),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreadmillSummary {
    pub speed_mph: f64,
    pub grade_pct: f64,
    pub n: usize,
    pub eff_measured: Option<f64>,
    pub eff_theory: f64,
}

/// Mean efficiency per (speed, grade), sorted by speed then grade.
pub fn treadmill_summary<'a>(
    evaluated: impl IntoIterator<Item = &'a Evaluated>,
) -> Vec<TreadmillSummary> {
    let mut groups = BTreeMap::<(OrderedF64, OrderedF64), Vec<&Evaluated>>::new();

    for this in evaluated {
        if let Condition::Treadmill {
            speed_mph,
            grade_pct,
        } = this.trial.condition
        {
            groups
                .entry((speed_mph.into(), grade_pct.into()))
                .or_default()
                .push(this);
        }
    }

    groups
        .into_iter()
        .filter_map(|((speed_mph, grade_pct), group)| {
            Some(TreadmillSummary {
                speed_mph: speed_mph.into_inner(),
                grade_pct: grade_pct.into_inner(),
                n: group.len(),
                eff_measured: mean_of(group.iter().filter_map(|this| {
                    this.energetics
                        .measured
                        .as_ref()
                        .and_then(|measured| measured.efficiency)
                })),
                eff_theory: mean_of(group.iter().map(|this| this.energetics.efficiency_theory_net))?,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StairSummary {
    pub spm: f64,
    pub n: usize,
    /// Mean wearable active kcal/min
    pub aw: Option<f64>,
    /// Mean ACSM NET kcal/min
    pub net: f64,
    pub efficiency_theory: f64,
}

/// Measured and ACSM NET kcal/min per step rate, sorted by step rate.
pub fn stair_summary<'a>(evaluated: impl IntoIterator<Item = &'a Evaluated>) -> Vec<StairSummary> {
    let mut groups = BTreeMap::<OrderedF64, Vec<&Evaluated>>::new();

    for this in evaluated {
        if let Condition::Stair { spm, .. } = this.trial.condition {
            groups.entry(spm.into()).or_default().push(this);
        }
    }

    groups
        .into_iter()
        .filter_map(|(spm, group)| {
            Some(StairSummary {
                spm: spm.into_inner(),
                n: group.len(),
                aw: mean_of(group.iter().filter_map(|this| this.trial.measured_kcal_min)),
                net: mean_of(group.iter().map(|this| this.energetics.theory_net_kcal_min))?,
                efficiency_theory: mean_of(
                    group.iter().map(|this| this.energetics.efficiency_theory_net),
                )?,
            })
        })
        .collect()
}

fn mean_of(samples: impl IntoIterator<Item = f64>) -> Option<f64> {
    Descriptive::from_samples(samples).map(|this| this.mean)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{EvaluationConfig, Trial, evaluate_all};

    fn evaluated() -> Vec<Evaluated> {
        let trials = [
            (80.3, Condition::treadmill(3.0, 10.0), Some(9.0)),
            (80.3, Condition::treadmill(3.0, 10.0), Some(10.0)),
            (80.3, Condition::treadmill(3.0, 5.0), Some(6.5)),
            (80.3, Condition::treadmill(2.5, 15.0), None),
            (65.0, Condition::treadmill(3.0, 10.0), Some(7.0)),
            (80.3, Condition::stair(60.0, 0.2032), Some(11.0)),
            (65.0, Condition::stair(60.0, 0.2032), Some(9.0)),
            (80.3, Condition::stair(45.0, 0.2032), None),
        ]
        .into_iter()
        .map(|(mass_kg, condition, measured)| {
            let trial = Trial::new(mass_kg, condition.unwrap()).unwrap();
            match measured {
                Some(kcal_min) => trial.with_measured(kcal_min).unwrap(),
                None => trial,
            }
        });

        evaluate_all(trials, &EvaluationConfig::default())
    }

    #[test]
    fn test_condition_summary_groups_by_condition_and_mass() {
        let evaluated = evaluated();
        let summary = condition_summary(&evaluated);

        assert_eq!(summary.len(), 7);

        let group = summary
            .iter()
            .find(|this| {
                this.mass_kg == 80.3 && this.condition == Condition::treadmill(3.0, 10.0).unwrap()
            })
            .unwrap();

        assert_eq!(group.efficiency_theory.n, 2);
        assert_eq!(group.efficiency_theory.std_dev, Some(0.0));

        let measured = group.measured_kcal_min.as_ref().unwrap();
        assert_relative_eq!(measured.mean, 9.5);
        assert_eq!(measured.n, 2);
        assert!(group.efficiency_measured.as_ref().unwrap().ci95().is_some());
    }

    #[test]
    fn test_condition_summary_without_measurements() {
        let evaluated = evaluated();
        let summary = condition_summary(&evaluated);

        let group = summary
            .iter()
            .find(|this| this.condition == Condition::treadmill(2.5, 15.0).unwrap())
            .unwrap();

        assert_eq!(group.efficiency_measured, None);
        assert_eq!(group.measured_kcal_min, None);
        assert_eq!(group.agreement, None);

        let row = ConditionSummaryRow::from(group);
        assert_eq!(row.modality, "treadmill");
        assert_eq!(row.speed_mph, Some(2.5));
        assert_eq!(row.spm, None);
        assert_eq!(row.eff_measured_mean, None);
    }

    #[test]
    fn test_treadmill_summary_sorted() {
        let evaluated = evaluated();
        let summary = treadmill_summary(&evaluated);

        let keys = summary
            .iter()
            .map(|this| (this.speed_mph, this.grade_pct, this.n))
            .collect::<Vec<_>>();

        assert_eq!(keys, vec![(2.5, 15.0, 1), (3.0, 5.0, 1), (3.0, 10.0, 3)]);
        assert_eq!(summary[0].eff_measured, None);
        assert!(summary[2].eff_measured.is_some());
    }

    #[test]
    fn test_stair_summary() {
        let evaluated = evaluated();
        let summary = stair_summary(&evaluated);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].spm, 45.0);
        assert_eq!(summary[0].aw, None);
        assert_eq!(summary[1].spm, 60.0);
        assert_eq!(summary[1].n, 2);
        assert_relative_eq!(summary[1].aw.unwrap(), 10.0);

        // same efficiency for every step rate
        assert_relative_eq!(
            summary[0].efficiency_theory,
            summary[1].efficiency_theory,
            epsilon = 1e-12
        );
    }
}
