//! Drive and Regen Constants
//!
//! Torque and current values are in engineering units (Nm, A). The motor
//! controller takes integer commands in tenths, see
//! [`CONTROLLER_UNITS_PER_ENGINEERING_UNIT`].

/// Default forward torque at full pedal (Nm).
pub const DEFAULT_FORWARD_FACTOR_NM: f32 = 220.0;

/// Default maximum AC brake current the controller accepts (A).
///
/// Source: inverter datasheet rating used for the endurance event.
pub const DEFAULT_MAX_REGEN_CURRENT_A: f32 = 15.0;

/// Controller command units per Nm or A.
///
/// The inverter takes torque and brake current as multiples of 0.1.
/// Both the forward and the regen path go through this one scale.
pub const CONTROLLER_UNITS_PER_ENGINEERING_UNIT: f32 = 10.0;

/// Vehicle speed above which regen is allowed when a regen gate is set (km/h).
///
/// Regen at standstill would drive the car backwards.
pub const DEFAULT_REGEN_MIN_SPEED_KMH: f32 = 2.0;

/// Miles per hour to kilometers per hour.
pub const MPH_TO_KMH: f32 = 1.609;
