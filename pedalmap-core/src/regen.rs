//! Regen Current Mapper
//!
//! Braking effort grows with the distance the pedal sits *below* the regen
//! threshold, measured in percent of travel:
//!
//! ```text
//! distance_pct = (regen_threshold - value) * 100
//! current      = distance_pct * regen_factor
//! ```
//!
//! With the derived gain `regen_factor = max_regen_current /
//! (regen_threshold * 100)` a fully released pedal asks for the maximum brake
//! current and the request tapers to zero at the threshold.
//!
//! The magnitude is computed from this call's input only and returned by
//! value. The limiter compares exactly that value against the controller
//! rating; no intermediate is shared with the forward branch.

use crate::{
    config::{DeadbandConfig, TorqueFactors},
    constants::pedal::PERCENT_PER_UNIT,
    normalize::AcceleratorValue,
};

/// Regen brake current (A) for a value in the regen band
///
/// Never negative; values at or above the threshold give zero.
pub fn map_regen(value: AcceleratorValue, cfg: &DeadbandConfig, factors: &TorqueFactors) -> f32 {
    let distance_pct = libm::fmaxf((cfg.regen_threshold - value.get()) * PERCENT_PER_UNIT, 0.0);
    distance_pct * factors.regen_factor
}
