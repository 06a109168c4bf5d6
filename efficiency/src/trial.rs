use std::{fmt, str::FromStr};

use crate::{
    EvaluationConfig, OrderedF64,
    error::{Error, non_negative},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Modality {
    Treadmill,
    Stair,
}

impl FromStr for Modality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "treadmill" => Ok(Self::Treadmill),
            "stair" | "stairs" | "stairmaster" => Ok(Self::Stair),
            _ => Err(Error::UnknownModality(s.to_owned())),
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Treadmill => f.write_str("treadmill"),
            Self::Stair => f.write_str("stair"),
        }
    }
}

/// Workout condition of a single trial.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    Treadmill { speed_mph: f64, grade_pct: f64 },
    Stair { spm: f64, step_height_m: f64 },
}

/// Totally ordered form of [`Condition`] used to group trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConditionKey {
    Treadmill {
        speed_mph: OrderedF64,
        grade_pct: OrderedF64,
    },
    Stair {
        spm: OrderedF64,
        step_height_m: OrderedF64,
    },
}

impl Condition {
    pub fn treadmill(speed_mph: f64, grade_pct: f64) -> Result<Self, Error> {
        Ok(Self::Treadmill {
            speed_mph: non_negative("speed_mph", speed_mph)?,
            grade_pct: non_negative("grade_pct", grade_pct)?,
        })
    }

    pub fn stair(spm: f64, step_height_m: f64) -> Result<Self, Error> {
        if !(step_height_m.is_finite() && step_height_m > 0.0) {
            return Err(Error::NonPositiveStepHeight(step_height_m));
        }

        Ok(Self::Stair {
            spm: non_negative("spm", spm)?,
            step_height_m,
        })
    }

    pub const fn modality(&self) -> Modality {
        match self {
            Self::Treadmill { .. } => Modality::Treadmill,
            Self::Stair { .. } => Modality::Stair,
        }
    }

    pub fn key(&self) -> ConditionKey {
        match *self {
            Self::Treadmill {
                speed_mph,
                grade_pct,
            } => ConditionKey::Treadmill {
                speed_mph: OrderedF64::from(speed_mph),
                grade_pct: OrderedF64::from(grade_pct),
            },
            Self::Stair { spm, step_height_m } => ConditionKey::Stair {
                spm: OrderedF64::from(spm),
                step_height_m: OrderedF64::from(step_height_m),
            },
        }
    }
}

impl From<ConditionKey> for Condition {
    fn from(value: ConditionKey) -> Self {
        match value {
            ConditionKey::Treadmill {
                speed_mph,
                grade_pct,
            } => Self::Treadmill {
                speed_mph: speed_mph.into_inner(),
                grade_pct: grade_pct.into_inner(),
            },
            ConditionKey::Stair { spm, step_height_m } => Self::Stair {
                spm: spm.into_inner(),
                step_height_m: step_height_m.into_inner(),
            },
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Treadmill {
                speed_mph,
                grade_pct,
            } => write!(f, "treadmill {speed_mph} mph @ {grade_pct}%"),
            Self::Stair { spm, step_height_m } => {
                write!(f, "stair {spm} spm @ {step_height_m} m")
            }
        }
    }
}

/// A single validated workout trial.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trial {
    pub id: Option<String>,
    pub mass_kg: f64,
    pub condition: Condition,
    /// Active kcal/min reported by a wearable
    pub measured_kcal_min: Option<f64>,
}

impl Trial {
    pub fn new(mass_kg: f64, condition: Condition) -> Result<Self, Error> {
        if !(mass_kg.is_finite() && mass_kg > 0.0) {
            return Err(Error::NonPositiveMass(mass_kg));
        }

        Ok(Self {
            id: None,
            mass_kg,
            condition,
            measured_kcal_min: None,
        })
    }

    pub fn with_measured(self, kcal_min: f64) -> Result<Self, Error> {
        Ok(Self {
            measured_kcal_min: Some(non_negative("aw_active_kcal_min", kcal_min)?),
            ..self
        })
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..self
        }
    }

    pub const fn modality(&self) -> Modality {
        self.condition.modality()
    }
}

/// Raw CSV row. Columns that don't apply to the modality may be left empty.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrialRow {
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: Option<String>,
    pub modality: String,
    pub mass_kg: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed_mph: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub grade_pct: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spm: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub step_height_m: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub aw_active_kcal_min: Option<f64>,
}

impl TrialRow {
    pub fn into_trial(self, config: &EvaluationConfig) -> Result<Trial, Error> {
        let TrialRow {
            id,
            modality,
            mass_kg,
            speed_mph,
            grade_pct,
            spm,
            step_height_m,
            aw_active_kcal_min,
        } = self;

        let modality = modality.parse::<Modality>()?;
        let required = |value: Option<f64>, column| {
            value.ok_or(Error::MissingColumn { modality, column })
        };

        let condition = match modality {
            Modality::Treadmill => Condition::treadmill(
                required(speed_mph, "speed_mph")?,
                required(grade_pct, "grade_pct")?,
            )?,
            Modality::Stair => Condition::stair(
                required(spm, "spm")?,
                step_height_m.unwrap_or(config.default_step_height_m),
            )?,
        };

        let trial = Trial::new(mass_kg, condition)?;
        let trial = match aw_active_kcal_min {
            Some(kcal_min) => trial.with_measured(kcal_min)?,
            None => trial,
        };

        Ok(match id {
            Some(id) if !id.trim().is_empty() => trial.with_id(id),
            _ => trial,
        })
    }
}

impl TryFrom<TrialRow> for Trial {
    type Error = Error;

    fn try_from(value: TrialRow) -> Result<Self, Self::Error> {
        value.into_trial(&EvaluationConfig::default())
    }
}
