//! Vertical mechanical power.
//!
//! Only work against gravity is counted:
//!
//! ```notrust
//! P = m * g * v_vertical
//! ```
//!
//! - treadmill: `v_vertical = v * G`, belt speed times fractional grade
//! - stair: `v_vertical = h * f / 60`, step height times steps per second

/// Standard acceleration of gravity in m/s²
pub const STANDARD_GRAVITY: f64 = 9.80665;

pub const MPH_TO_M_PER_S: f64 = 0.44704;

/// 8 inch StairMaster step in meters
pub const STAIRMASTER_STEP_HEIGHT_M: f64 = 0.2032;

/// Mechanical power of incline walking in Watts.
///
/// # Params
/// - `mass_kg` - body mass in kilograms
/// - `speed_mph` - belt speed in miles per hour
/// - `grade_pct` - incline in percent
/// - `gravity` - usually [`STANDARD_GRAVITY`]
#[inline]
pub fn treadmill_watts(mass_kg: f64, speed_mph: f64, grade_pct: f64, gravity: f64) -> f64 {
    let v = speed_mph * MPH_TO_M_PER_S;
    let g = grade_pct / 100.0;

    mass_kg * gravity * v * g
}

/// Mechanical power of stair-climbing in Watts.
#[inline]
pub fn stair_watts(mass_kg: f64, spm: f64, step_height_m: f64, gravity: f64) -> f64 {
    mass_kg * gravity * step_height_m * (spm / 60.0)
}
