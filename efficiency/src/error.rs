use thiserror::Error;

use crate::Modality;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Unknown modality `{0}`")]
    UnknownModality(String),
    #[error("Missing `{column}` for {modality} trial")]
    MissingColumn {
        modality: Modality,
        column: &'static str,
    },
    #[error("Body mass must be positive, got {0} kg")]
    NonPositiveMass(f64),
    #[error("`{field}` must be a non-negative finite number, got {value}")]
    InvalidParameter { field: &'static str, value: f64 },
    #[error("Step height must be positive, got {0} m")]
    NonPositiveStepHeight(f64),
    #[error("Net VO2 is negative ({0} mL/kg/min)")]
    NegativeNetVo2(f64),
    #[error("Metabolic power must be positive when mechanical power is {mechanical_w} W, got {metabolic_w} W")]
    NonPositiveMetabolicPower { mechanical_w: f64, metabolic_w: f64 },
}

/// Checks that `value` is finite and not negative.
pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64, Error> {
    match value.is_finite() && value >= 0.0 {
        true => Ok(value),
        false => Err(Error::InvalidParameter { field, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative("speed_mph", 0.0), Ok(0.0));
        assert_eq!(non_negative("speed_mph", 3.5), Ok(3.5));
        assert!(non_negative("speed_mph", -0.1).is_err());
        assert!(non_negative("speed_mph", f64::NAN).is_err());
        assert!(non_negative("speed_mph", f64::INFINITY).is_err());
    }

    #[test]
    fn test_messages() {
        let err = Error::MissingColumn {
            modality: Modality::Stair,
            column: "spm",
        };
        assert_eq!(err.to_string(), "Missing `spm` for stair trial");
        assert_eq!(
            Error::NonPositiveMass(0.0).to_string(),
            "Body mass must be positive, got 0 kg"
        );
    }
}
