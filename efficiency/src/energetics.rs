use crate::{Condition, EvaluationConfig, Trial, error::Error};

/// Ratio of mechanical to metabolic power.
///
/// Zero mechanical power (flat treadmill, standing still) is defined as zero
/// efficiency regardless of metabolic power, so the result is never NaN.
pub fn efficiency(mechanical_w: f64, metabolic_w: f64) -> Result<f64, Error> {
    if mechanical_w == 0.0 {
        return Ok(0.0);
    }

    if !(metabolic_w > 0.0) {
        return Err(Error::NonPositiveMetabolicPower {
            mechanical_w,
            metabolic_w,
        });
    }

    Ok(mechanical_w / metabolic_w)
}

#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Energetics {
    /// mL·kg⁻¹·min⁻¹
    pub vo2_gross: f64,
    /// mL·kg⁻¹·min⁻¹
    pub vo2_net: f64,
    pub theory_net_kcal_min: f64,
    pub metabolic_power_w: f64,
    pub mechanical_power_w: f64,
    pub efficiency_theory_net: f64,
    pub measured: Option<Measured>,
}

/// Same quantities as [`Energetics`] but from a wearable reading.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measured {
    pub kcal_min: f64,
    pub metabolic_power_w: f64,
    /// `None` when the device reports no energy for positive mechanical work
    pub efficiency: Option<f64>,
    /// measured kcal/min divided by ACSM NET kcal/min
    pub agreement: Option<f64>,
}

impl Measured {
    /// Symmetric agreement in `0..=1`, 1 being a perfect match.
    pub fn precision(&self) -> Option<f64> {
        self.agreement.map(|ratio| match ratio > 1.0 {
            true => ratio.recip(),
            false => ratio,
        })
    }
}

impl Trial {
    /// Run the metabolic and mechanical models for this trial.
    pub fn energetics(&self, config: &EvaluationConfig) -> Result<Energetics, Error> {
        let mass_kg = self.mass_kg;

        let (vo2_gross, mechanical_power_w) = match self.condition {
            Condition::Treadmill {
                speed_mph,
                grade_pct,
            } => (
                acsm::vo2_treadmill_gross(speed_mph, grade_pct),
                mechanical_power::treadmill_watts(mass_kg, speed_mph, grade_pct, config.gravity),
            ),
            Condition::Stair { spm, step_height_m } => (
                acsm::vo2_stair_gross(spm, step_height_m),
                mechanical_power::stair_watts(mass_kg, spm, step_height_m, config.gravity),
            ),
        };

        let vo2_net = acsm::vo2_net(vo2_gross);
        if vo2_net < 0.0 {
            return Err(Error::NegativeNetVo2(vo2_net));
        }

        let theory_net_kcal_min = acsm::kcal_per_min_from_vo2(vo2_net, mass_kg);
        let metabolic_power_w = acsm::metabolic_power_watts(theory_net_kcal_min);
        let efficiency_theory_net = efficiency(mechanical_power_w, metabolic_power_w)?;

        let measured = self.measured_kcal_min.map(|kcal_min| {
            let metabolic_power_w = acsm::metabolic_power_watts(kcal_min);

            let efficiency = efficiency(mechanical_power_w, metabolic_power_w)
                .inspect_err(|e| {
                    tracing::warn!(trial = ?self.id, condition = %self.condition, "{e}");
                })
                .ok();

            let agreement = match theory_net_kcal_min > 0.0 {
                true => Some(kcal_min / theory_net_kcal_min),
                false => None,
            };

            Measured {
                kcal_min,
                metabolic_power_w,
                efficiency,
                agreement,
            }
        });

        tracing::debug!(
            trial = ?self.id,
            condition = %self.condition,
            mass_kg,
            vo2_gross,
            metabolic_power_w,
            mechanical_power_w,
            efficiency = efficiency_theory_net,
            "evaluated trial"
        );

        Ok(Energetics {
            vo2_gross,
            vo2_net,
            theory_net_kcal_min,
            metabolic_power_w,
            mechanical_power_w,
            efficiency_theory_net,
            measured,
        })
    }
}

/// A trial together with its computed energetics.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluated {
    pub trial: Trial,
    pub energetics: Energetics,
}

/// Evaluate every trial, logging and skipping those that fail.
pub fn evaluate_all(
    trials: impl IntoIterator<Item = Trial>,
    config: &EvaluationConfig,
) -> Vec<Evaluated> {
    trials
        .into_iter()
        .filter_map(|trial| match trial.energetics(config) {
            Ok(energetics) => Some(Evaluated { trial, energetics }),
            Err(e) => {
                tracing::warn!(trial = ?trial.id, "Skipping trial. Reason: {e}");
                None
            }
        })
        .collect()
}
