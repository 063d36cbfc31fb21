//! Deadband Mode Selector
//!
//! Splits pedal travel into three bands:
//!
//! ```text
//! 0.0            regen_threshold      forward_threshold            1.0
//!  |---- Regen ----|------ Coast ------|-------- Forward ----------|
//!                  ^ belongs to Coast  ^ belongs to Forward
//! ```
//!
//! The boundary assignment is part of the safety envelope: a pedal resting
//! exactly on the regen threshold must not flicker into braking under sensor
//! noise.

use crate::{config::DeadbandConfig, normalize::AcceleratorValue};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Drive mode chosen for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Drive forward with positive torque
    Forward,
    /// Neither drive nor brake
    Coast,
    /// Brake with regenerative current
    Regen,
}

impl Mode {
    /// Lowercase name for logs
    pub const fn name(&self) -> &'static str {
        match self {
            Mode::Forward => "forward",
            Mode::Coast => "coast",
            Mode::Regen => "regen",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Mode {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name())
    }
}

/// Classify an accelerator value against the deadband
pub fn select_mode(value: AcceleratorValue, cfg: &DeadbandConfig) -> Mode {
    let value = value.get();
    if value >= cfg.forward_threshold {
        Mode::Forward
    } else if value < cfg.regen_threshold {
        Mode::Regen
    } else {
        Mode::Coast
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(v: f32) -> AcceleratorValue {
        AcceleratorValue::new(v).unwrap()
    }

    #[test]
    fn bands() {
        let cfg = DeadbandConfig::default();
        assert_eq!(select_mode(value(0.0), &cfg), Mode::Regen);
        assert_eq!(select_mode(value(0.22), &cfg), Mode::Coast);
        assert_eq!(select_mode(value(1.0), &cfg), Mode::Forward);
    }

    #[test]
    fn regen_threshold_is_coast() {
        let cfg = DeadbandConfig::new(0.25, 0.20);
        assert_eq!(select_mode(value(0.20), &cfg), Mode::Coast);
    }

    #[test]
    fn forward_threshold_is_forward() {
        let cfg = DeadbandConfig::new(0.25, 0.20);
        assert_eq!(select_mode(value(0.25), &cfg), Mode::Forward);
    }

    #[test]
    fn just_below_thresholds() {
        let cfg = DeadbandConfig::new(0.25, 0.20);
        let below_regen = f32::from_bits(0.20f32.to_bits() - 1);
        let below_forward = f32::from_bits(0.25f32.to_bits() - 1);
        assert_eq!(select_mode(value(below_regen), &cfg), Mode::Regen);
        assert_eq!(select_mode(value(below_forward), &cfg), Mode::Coast);
    }
}
