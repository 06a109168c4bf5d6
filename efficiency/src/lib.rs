//! # Exercise efficiency
//!
//! Compares incline treadmill walking and stair-climbing:
//!
//! ```notrust
//! η = P_mech / P_met
//! ```
//!
//! Where:
//!
//! - P_met - metabolic power from ACSM NET VO2, see [`acsm`]
//! - P_mech - vertical work rate, see [`mechanical_power`]
//!
//! Trials come in as [`TrialRow`] (one CSV line), get validated into [`Trial`],
//! evaluated into [`Energetics`] and then grouped with the functions of [`summary`].

mod cleaning;
mod config;
mod energetics;
mod error;
mod ordered_f64;
mod stats;
pub mod summary;
mod tiers;
mod trial;

pub use self::{
    cleaning::*, config::*, energetics::*, error::Error, ordered_f64::*, stats::*, tiers::*,
    trial::*,
};
