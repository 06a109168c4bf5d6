use mechanical_power::{STAIRMASTER_STEP_HEIGHT_M, STANDARD_GRAVITY};

/// Constants that are not part of the trial records themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationConfig {
    /// Acceleration of gravity in m/s²
    pub gravity: f64,
    /// Used for stair trials that don't carry their own step height
    pub default_step_height_m: f64,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            gravity: STANDARD_GRAVITY,
            default_step_height_m: STAIRMASTER_STEP_HEIGHT_M,
        }
    }
}

impl EvaluationConfig {
    pub fn with_step_height(self, default_step_height_m: f64) -> Self {
        Self {
            default_step_height_m,
            ..self
        }
    }
}
