//! Raw Sensor Calibration and Plausibility Thresholds
//!
//! Used by the reference [`PedalMonitor`](crate::monitor::PedalMonitor).
//! The mapping engine itself never sees raw ADC counts.

/// Full scale of the 12-bit pedal ADC (counts).
pub const ADC_FULL_SCALE: u16 = 4096;

/// Margin below full scale that counts as an open circuit (counts).
pub const OPEN_CIRCUIT_MARGIN: u16 = 20;

/// Raw reading below which a sensor is treated as shorted to ground (counts).
pub const SHORT_CIRCUIT_RAW_MAX: u16 = 500;

/// Maximum allowed disagreement between the two sensors (percent of travel).
pub const PEDAL_DIFF_THRESHOLD_PCT: f32 = 30.0;

/// How long a fault condition must hold before it is reported (ms).
pub const PEDAL_FAULT_DEBOUNCE_MS: u64 = 500;

/// Sensor A full-travel reading (counts).
pub const ACCEL_A_MAX_RAW: u16 = 1866;

/// Sensor A released reading (counts).
pub const ACCEL_A_OFFSET_RAW: u16 = 980;

/// Sensor B full-travel reading (counts).
pub const ACCEL_B_MAX_RAW: u16 = 3365;

/// Sensor B released reading (counts).
pub const ACCEL_B_OFFSET_RAW: u16 = 1780;

/// Brake pressure reading treated as hard braking for the overlap guard.
pub const BRAKE_OVERLAP_PRESSURE: f32 = 700.0;

/// Accelerator value that trips the overlap guard while braking.
pub const BRAKE_OVERLAP_ACCEL_TRIP: f32 = 0.25;

/// Accelerator value below which a tripped overlap guard releases.
pub const BRAKE_OVERLAP_ACCEL_RELEASE: f32 = 0.05;
