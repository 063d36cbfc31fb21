//! Constants for PedalMap Core
//!
//! Centralized numeric defaults for the mapping engine and the reference
//! pedal monitor. Values come from the endurance calibration of the vehicle
//! the engine was first tuned on; deployments override them through
//! [`EngineConfig`](crate::config::EngineConfig) or a JSON profile.
//!
//! ## Organization
//!
//! - **Pedal**: contractual ranges and deadband thresholds
//! - **Drive**: torque factors, brake current limits, controller units
//! - **Monitor**: raw ADC calibration and fault detection thresholds
//!
//! Names carry their unit where one applies.

/// Pedal input ranges and deadband defaults.
pub mod pedal;

/// Drive, regen and motor-controller unit constants.
pub mod drive;

/// Raw sensor calibration and plausibility thresholds.
pub mod monitor;

pub use pedal::{
    PEDAL_PERCENT_MIN, PEDAL_PERCENT_MAX, PERCENT_PER_UNIT,
    DEFAULT_FORWARD_THRESHOLD, DEFAULT_REGEN_THRESHOLD,
};

pub use drive::{
    DEFAULT_FORWARD_FACTOR_NM, DEFAULT_MAX_REGEN_CURRENT_A,
    CONTROLLER_UNITS_PER_ENGINEERING_UNIT, DEFAULT_REGEN_MIN_SPEED_KMH,
};

pub use monitor::{
    ADC_FULL_SCALE, PEDAL_DIFF_THRESHOLD_PCT, PEDAL_FAULT_DEBOUNCE_MS,
};
