//! Forward Torque Mapper
//!
//! The deadband eats the bottom of the pedal travel, so the forward band is
//! stretched back over the full torque range:
//!
//! ```text
//! fraction = (value - forward_threshold) / (1 - forward_threshold)
//! torque   = fraction * forward_factor
//! ```
//!
//! Torque starts at zero on the threshold (no step when crossing from Coast)
//! and full pedal gives exactly `forward_factor`. The forward torque limit
//! belongs to the motor controller, so nothing is clamped here.

use crate::{
    config::{DeadbandConfig, TorqueFactors},
    normalize::AcceleratorValue,
};

/// Forward torque (Nm) for a value in the forward band
///
/// Values under the threshold give zero torque.
pub fn map_forward(value: AcceleratorValue, cfg: &DeadbandConfig, factors: &TorqueFactors) -> f32 {
    let travel = libm::fmaxf(value.get() - cfg.forward_threshold, 0.0);
    let fraction = travel / (1.0 - cfg.forward_threshold);
    fraction * factors.forward_factor
}
