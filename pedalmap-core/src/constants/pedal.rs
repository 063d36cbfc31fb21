//! Pedal Input Ranges and Deadband Defaults

/// Lowest pedal percentage the monitor may deliver (fully released).
pub const PEDAL_PERCENT_MIN: f32 = 0.0;

/// Highest pedal percentage the monitor may deliver (fully pressed).
pub const PEDAL_PERCENT_MAX: f32 = 100.0;

/// Percent per unit of accelerator travel.
///
/// Converts between the [0, 1] accelerator value and the [0, 100] percent
/// domain used by the per-percent regen gain.
pub const PERCENT_PER_UNIT: f32 = 100.0;

/// Default forward-engage threshold (fraction of travel).
///
/// Below a quarter of pedal travel the motor produces no forward torque.
pub const DEFAULT_FORWARD_THRESHOLD: f32 = 0.25;

/// Default regen-engage threshold (fraction of travel).
///
/// Under a fifth of pedal travel the motor brakes. The band between this and
/// the forward threshold is the coast band.
pub const DEFAULT_REGEN_THRESHOLD: f32 = 0.20;
