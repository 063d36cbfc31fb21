//! Torque Commands
//!
//! A cycle produces exactly one command, built once and never changed:
//!
//! - [`RawCommand`]: what the mapper asked for, before limits
//! - [`TorqueCommand`]: what leaves the engine, in Nm or A
//! - [`ControllerCommand`]: the same command in the motor controller's
//!   integer units
//!
//! Magnitudes are always non-negative; the variant carries the direction.

use crate::config::OutputLimits;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mapper output before the limiter
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawCommand {
    /// Forward torque (Nm)
    Forward(f32),
    /// Regen brake current (A), not yet clamped
    Regen(f32),
    /// Zero command
    Coast,
}

/// Final command handed to the motor controller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TorqueCommand {
    /// Forward torque (Nm)
    Forward(f32),
    /// Regen brake current (A), within the controller rating
    Regen(f32),
    /// Zero torque, zero current
    Coast,
}

impl TorqueCommand {
    /// Magnitude in Nm or A, zero for Coast
    pub fn magnitude(&self) -> f32 {
        match *self {
            TorqueCommand::Forward(torque) => torque,
            TorqueCommand::Regen(current) => current,
            TorqueCommand::Coast => 0.0,
        }
    }

    /// True for the fail-safe zero command
    pub fn is_coast(&self) -> bool {
        matches!(self, TorqueCommand::Coast)
    }

    /// Bit pattern of the magnitude, for exact comparisons across cycles
    pub fn magnitude_bits(&self) -> u32 {
        self.magnitude().to_bits()
    }

    /// Convert into controller units
    ///
    /// Forward and regen share `limits.command_scale`. Values saturate at the
    /// integer range; Coast becomes a zero torque request.
    pub fn to_controller(&self, limits: &OutputLimits) -> ControllerCommand {
        match *self {
            TorqueCommand::Forward(torque) => {
                ControllerCommand::Torque(to_command_units(torque, limits) as i16)
            }
            TorqueCommand::Regen(current) => {
                ControllerCommand::BrakeCurrent(to_command_units(current, limits) as u16)
            }
            TorqueCommand::Coast => ControllerCommand::Torque(0),
        }
    }
}

/// Engineering units to controller units
///
/// `as` casts from f32 saturate, which is the behavior wanted at the limits.
fn to_command_units(value: f32, limits: &OutputLimits) -> f32 {
    value * limits.command_scale
}

#[cfg(feature = "defmt")]
impl defmt::Format for TorqueCommand {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TorqueCommand::Forward(torque) => defmt::write!(fmt, "Forward({} Nm)", torque),
            TorqueCommand::Regen(current) => defmt::write!(fmt, "Regen({} A)", current),
            TorqueCommand::Coast => defmt::write!(fmt, "Coast"),
        }
    }
}

/// Command in motor controller units (tenths by default)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControllerCommand {
    /// Torque request
    Torque(i16),
    /// AC brake current request
    BrakeCurrent(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_units_share_one_scale() {
        let limits = OutputLimits::new(15.0);
        assert_eq!(
            TorqueCommand::Forward(22.0).to_controller(&limits),
            ControllerCommand::Torque(220)
        );
        assert_eq!(
            TorqueCommand::Regen(15.0).to_controller(&limits),
            ControllerCommand::BrakeCurrent(150)
        );
        assert_eq!(TorqueCommand::Coast.to_controller(&limits), ControllerCommand::Torque(0));
    }

    #[test]
    fn controller_units_saturate() {
        let limits = OutputLimits { max_regen_current: 15.0, command_scale: 1000.0 };
        assert_eq!(
            TorqueCommand::Forward(220.0).to_controller(&limits),
            ControllerCommand::Torque(i16::MAX)
        );
    }

    #[test]
    fn magnitude_of_coast_is_zero() {
        assert_eq!(TorqueCommand::Coast.magnitude(), 0.0);
        assert!(TorqueCommand::Coast.is_coast());
        assert!(!TorqueCommand::Regen(1.0).is_coast());
    }
}
