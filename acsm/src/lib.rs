//! # ACSM metabolic equations
//!
//! Walking (treadmill):
//!
//! ```notrust
//! VO2 = 3.5 + 0.1 * S + 1.8 * S * G
//! ```
//!
//! Stepping (stair):
//!
//! ```notrust
//! VO2 = 3.5 + 0.2 * f + 2.4 * f * h
//! ```
//!
//! Where:
//!
//! - VO2 - gross oxygen consumption in mL·kg⁻¹·min⁻¹
//! - S - speed in m·min⁻¹
//! - G - grade as a fraction
//! - f - stepping rate in steps per minute
//! - h - step height in meters
//!
//! One litre of oxygen is taken as 5 kcal and `1 kcal/min ≈ 69.78 W`.

/// Resting oxygen consumption (1 MET) in mL·kg⁻¹·min⁻¹
pub const RESTING_VO2: f64 = 3.5;

pub const MPH_TO_M_PER_MIN: f64 = 26.8224;

pub const KCAL_PER_LITRE_O2: f64 = 5.0;

pub const KCAL_PER_MIN_TO_WATTS: f64 = 69.78;

/// Gross walking VO2 in mL·kg⁻¹·min⁻¹.
///
/// # Params
/// - `speed_mph` - belt speed in miles per hour
/// - `grade_pct` - incline in percent, e.g. `10.0` for 10%
#[inline]
pub fn vo2_treadmill_gross(speed_mph: f64, grade_pct: f64) -> f64 {
    let s = speed_mph * MPH_TO_M_PER_MIN;
    let g = grade_pct / 100.0;

    RESTING_VO2 + 0.1 * s + 1.8 * s * g
}

/// Gross stepping VO2 in mL·kg⁻¹·min⁻¹.
///
/// # Params
/// - `spm` - steps per minute
/// - `step_height_m` - height of a single step in meters
#[inline]
pub fn vo2_stair_gross(spm: f64, step_height_m: f64) -> f64 {
    RESTING_VO2 + 0.2 * spm + 2.4 * spm * step_height_m
}

/// Exercise-only VO2, i.e. gross minus resting.
#[inline]
pub fn vo2_net(vo2_gross: f64) -> f64 {
    vo2_gross - RESTING_VO2
}

/// Convert VO2 (mL·kg⁻¹·min⁻¹) to kcal/min for a person of `mass_kg`.
#[inline]
pub fn kcal_per_min_from_vo2(vo2_ml_kg_min: f64, mass_kg: f64) -> f64 {
    let litres_per_min = (vo2_ml_kg_min * mass_kg) / 1000.0;

    litres_per_min * KCAL_PER_LITRE_O2
}

/// NET kcal/min. Resting consumption is removed before conversion.
#[inline]
pub fn net_kcal_per_min_from_gross_vo2(vo2_gross: f64, mass_kg: f64) -> f64 {
    kcal_per_min_from_vo2(vo2_net(vo2_gross), mass_kg)
}

#[inline]
pub fn metabolic_power_watts(kcal_per_min: f64) -> f64 {
    kcal_per_min * KCAL_PER_MIN_TO_WATTS
}

#[inline]
pub fn kcal_per_min_from_watts(watts: f64) -> f64 {
    watts / KCAL_PER_MIN_TO_WATTS
}
