//! Engine Configuration Snapshot
//!
//! All thresholds, factors and limits the engine needs live in one immutable
//! [`EngineConfig`] value. It is built once at startup, validated, and then
//! passed by reference into every cycle. Nothing in the engine mutates it.
//!
//! ## Validation
//!
//! [`EngineConfig::validate`] rejects any snapshot that would make the pedal
//! unsafe to drive:
//!
//! ```text
//! 0 < regen_threshold < forward_threshold < 1     (coast band exists)
//! forward_factor > 0, regen_factor > 0            (finite)
//! max_regen_current > 0, command_scale > 0        (finite)
//! max_raw > offset_raw                            (per sensor)
//! regen gate speed >= 0                           (if set)
//! ```
//!
//! With these enforced, every division in the mapping path has a non-zero
//! denominator.
//!
//! ## Building
//!
//! ```rust
//! use pedalmap_core::config::EngineConfig;
//!
//! let config = EngineConfig::builder()
//!     .forward_threshold(0.30)
//!     .regen_threshold(0.15)
//!     .forward_factor(180.0)
//!     .max_regen_current(12.0)
//!     .build()?;
//!
//! // Regen gain derived from the limit: 12 A over 15 percent of travel
//! assert!((config.factors.regen_factor - 0.8).abs() < 1e-6);
//! # Ok::<(), pedalmap_core::MapError>(())
//! ```

use crate::{
    constants::{drive, monitor, pedal},
    errors::{MapError, MapResult},
    normalize::PedalPercent,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raw-to-percent calibration of one pedal sensor
///
/// Owned by the pedal monitor. The engine only carries it so one snapshot
/// describes the whole vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationConstants {
    /// Raw ADC reading at full pedal travel
    pub max_raw: u16,
    /// Raw ADC reading with the pedal released
    pub offset_raw: u16,
}

impl CalibrationConstants {
    /// Create calibration for one sensor
    pub const fn new(max_raw: u16, offset_raw: u16) -> Self {
        Self { max_raw, offset_raw }
    }

    /// Default calibration of sensor A
    pub const fn sensor_a() -> Self {
        Self::new(monitor::ACCEL_A_MAX_RAW, monitor::ACCEL_A_OFFSET_RAW)
    }

    /// Default calibration of sensor B
    pub const fn sensor_b() -> Self {
        Self::new(monitor::ACCEL_B_MAX_RAW, monitor::ACCEL_B_OFFSET_RAW)
    }

    /// Map a raw reading onto [0, 100] percent of travel
    ///
    /// Readings at or below the offset give 0, readings past `max_raw` give
    /// 100. Callers must validate the constants first.
    pub fn to_percent(&self, raw: u16) -> PedalPercent {
        if raw <= self.offset_raw {
            return PedalPercent::RELEASED;
        }
        let span = self.max_raw.saturating_sub(self.offset_raw);
        if span == 0 {
            return PedalPercent::FULL;
        }
        let span = f32::from(span);
        let travel = f32::from(raw - self.offset_raw);
        PedalPercent::from_clamped(libm::fminf(
            travel * pedal::PERCENT_PER_UNIT / span,
            pedal::PEDAL_PERCENT_MAX,
        ))
    }

    /// Check that the map has a non-empty span
    pub fn validate(&self) -> MapResult<()> {
        if self.max_raw <= self.offset_raw {
            return Err(MapError::config("calibration max_raw must exceed offset_raw"));
        }
        Ok(())
    }
}

/// Deadband thresholds, as fractions of pedal travel
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeadbandConfig {
    /// At or above this value the motor drives forward
    pub forward_threshold: f32,
    /// Below this value the motor regenerates
    pub regen_threshold: f32,
}

impl Default for DeadbandConfig {
    fn default() -> Self {
        Self {
            forward_threshold: pedal::DEFAULT_FORWARD_THRESHOLD,
            regen_threshold: pedal::DEFAULT_REGEN_THRESHOLD,
        }
    }
}

impl DeadbandConfig {
    /// Create a deadband, unchecked
    pub const fn new(forward_threshold: f32, regen_threshold: f32) -> Self {
        Self { forward_threshold, regen_threshold }
    }

    /// Check both thresholds lie in (0, 1) with a coast band between them
    pub fn validate(&self) -> MapResult<()> {
        if !is_open_unit(self.forward_threshold) {
            return Err(MapError::config("forward_threshold must lie in (0, 1)"));
        }
        if !is_open_unit(self.regen_threshold) {
            return Err(MapError::config("regen_threshold must lie in (0, 1)"));
        }
        if self.regen_threshold >= self.forward_threshold {
            return Err(MapError::config("regen_threshold must be below forward_threshold"));
        }
        Ok(())
    }

    /// Width of the coast band
    pub fn coast_width(&self) -> f32 {
        self.forward_threshold - self.regen_threshold
    }
}

/// Scaling from accelerator fraction to torque or current
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TorqueFactors {
    /// Torque at full pedal (Nm)
    pub forward_factor: f32,
    /// Brake current per percent of travel below the regen threshold (A/%)
    pub regen_factor: f32,
}

impl TorqueFactors {
    /// Factors with a regen gain that reaches `max_regen_current` at 0% pedal
    pub fn derived(forward_factor: f32, deadband: &DeadbandConfig, limits: &OutputLimits) -> Self {
        Self {
            forward_factor,
            regen_factor: derive_regen_factor(deadband, limits),
        }
    }

    /// Check both factors are positive and finite
    pub fn validate(&self) -> MapResult<()> {
        if !is_positive(self.forward_factor) {
            return Err(MapError::config("forward_factor must be positive"));
        }
        if !is_positive(self.regen_factor) {
            return Err(MapError::config("regen_factor must be positive"));
        }
        Ok(())
    }
}

/// Per-percent regen gain such that full pedal release maps to the limit
pub fn derive_regen_factor(deadband: &DeadbandConfig, limits: &OutputLimits) -> f32 {
    limits.max_regen_current / (deadband.regen_threshold * pedal::PERCENT_PER_UNIT)
}

/// Motor controller limits and units
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputLimits {
    /// Maximum AC brake current the controller accepts (A)
    pub max_regen_current: f32,
    /// Controller command units per Nm or A
    #[cfg_attr(feature = "serde", serde(default = "default_command_scale"))]
    pub command_scale: f32,
}

impl Default for OutputLimits {
    fn default() -> Self {
        Self {
            max_regen_current: drive::DEFAULT_MAX_REGEN_CURRENT_A,
            command_scale: drive::CONTROLLER_UNITS_PER_ENGINEERING_UNIT,
        }
    }
}

impl OutputLimits {
    /// Limits with the default controller scale
    pub const fn new(max_regen_current: f32) -> Self {
        Self {
            max_regen_current,
            command_scale: drive::CONTROLLER_UNITS_PER_ENGINEERING_UNIT,
        }
    }

    /// Check the current limit and scale are positive and finite
    pub fn validate(&self) -> MapResult<()> {
        if !is_positive(self.max_regen_current) {
            return Err(MapError::config("max_regen_current must be positive"));
        }
        if !is_positive(self.command_scale) {
            return Err(MapError::config("command_scale must be positive"));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
fn default_command_scale() -> f32 {
    drive::CONTROLLER_UNITS_PER_ENGINEERING_UNIT
}

/// Speed gate for regen
///
/// Regen is only commanded while the vehicle moves faster than
/// `min_speed_kmh`. An unknown speed counts as standing still.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegenGate {
    /// Minimum vehicle speed for regen (km/h)
    pub min_speed_kmh: f32,
}

impl Default for RegenGate {
    fn default() -> Self {
        Self { min_speed_kmh: drive::DEFAULT_REGEN_MIN_SPEED_KMH }
    }
}

impl RegenGate {
    /// Whether regen is allowed at the given speed
    pub fn allows(&self, speed_kmh: Option<f32>) -> bool {
        matches!(speed_kmh, Some(speed) if speed > self.min_speed_kmh)
    }

    /// Check the speed is finite and non-negative
    pub fn validate(&self) -> MapResult<()> {
        if !(self.min_speed_kmh >= 0.0 && self.min_speed_kmh.is_finite()) {
            return Err(MapError::config("regen gate speed must be non-negative"));
        }
        Ok(())
    }
}

/// Complete, immutable engine configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Calibration of sensor A and sensor B
    pub calibration: [CalibrationConstants; 2],
    /// Mode thresholds
    pub deadband: DeadbandConfig,
    /// Torque and current scaling
    pub factors: TorqueFactors,
    /// Controller limits and units
    pub limits: OutputLimits,
    /// Optional speed gate on regen
    #[cfg_attr(feature = "serde", serde(default))]
    pub regen_gate: Option<RegenGate>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let deadband = DeadbandConfig::default();
        let limits = OutputLimits::default();
        Self {
            calibration: [CalibrationConstants::sensor_a(), CalibrationConstants::sensor_b()],
            deadband,
            factors: TorqueFactors::derived(drive::DEFAULT_FORWARD_FACTOR_NM, &deadband, &limits),
            limits,
            regen_gate: None,
        }
    }
}

impl EngineConfig {
    /// Start a builder seeded with the defaults
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::new()
    }

    /// Check every invariant of the snapshot
    ///
    /// Must pass before the snapshot reaches the engine.
    pub fn validate(&self) -> MapResult<()> {
        for calibration in &self.calibration {
            calibration.validate()?;
        }
        self.deadband.validate()?;
        self.factors.validate()?;
        self.limits.validate()?;
        if let Some(gate) = &self.regen_gate {
            gate.validate()?;
        }
        Ok(())
    }

    /// Validate and hand the snapshot back
    pub fn validated(self) -> MapResult<Self> {
        match self.validate() {
            Ok(()) => Ok(self),
            Err(e) => {
                log_warn!("Rejected engine configuration: {}", e);
                Err(e)
            }
        }
    }
}

/// Builder for [`EngineConfig`]
///
/// Unset values fall back to the defaults in [`crate::constants`]. When no
/// regen factor is given it is derived from the final threshold and limit.
#[derive(Debug, Clone)]
pub struct EngineConfigBuilder {
    calibration: [CalibrationConstants; 2],
    deadband: DeadbandConfig,
    forward_factor: f32,
    regen_factor: Option<f32>,
    limits: OutputLimits,
    regen_gate: Option<RegenGate>,
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfigBuilder {
    /// Builder with default values
    pub fn new() -> Self {
        Self {
            calibration: [CalibrationConstants::sensor_a(), CalibrationConstants::sensor_b()],
            deadband: DeadbandConfig::default(),
            forward_factor: drive::DEFAULT_FORWARD_FACTOR_NM,
            regen_factor: None,
            limits: OutputLimits::default(),
            regen_gate: None,
        }
    }

    /// Calibration of sensor A
    pub fn sensor_a(mut self, calibration: CalibrationConstants) -> Self {
        self.calibration[0] = calibration;
        self
    }

    /// Calibration of sensor B
    pub fn sensor_b(mut self, calibration: CalibrationConstants) -> Self {
        self.calibration[1] = calibration;
        self
    }

    /// Forward-engage threshold
    pub fn forward_threshold(mut self, threshold: f32) -> Self {
        self.deadband.forward_threshold = threshold;
        self
    }

    /// Regen-engage threshold
    pub fn regen_threshold(mut self, threshold: f32) -> Self {
        self.deadband.regen_threshold = threshold;
        self
    }

    /// Both thresholds at once
    pub fn deadband(mut self, deadband: DeadbandConfig) -> Self {
        self.deadband = deadband;
        self
    }

    /// Torque at full pedal (Nm)
    pub fn forward_factor(mut self, factor: f32) -> Self {
        self.forward_factor = factor;
        self
    }

    /// Explicit regen gain (A per percent), overriding the derived one
    pub fn regen_factor(mut self, factor: f32) -> Self {
        self.regen_factor = Some(factor);
        self
    }

    /// Maximum AC brake current (A)
    pub fn max_regen_current(mut self, current: f32) -> Self {
        self.limits.max_regen_current = current;
        self
    }

    /// Controller units per Nm or A
    pub fn command_scale(mut self, scale: f32) -> Self {
        self.limits.command_scale = scale;
        self
    }

    /// Only regen above this speed (km/h)
    pub fn regen_min_speed(mut self, min_speed_kmh: f32) -> Self {
        self.regen_gate = Some(RegenGate { min_speed_kmh });
        self
    }

    /// Assemble and validate the snapshot
    pub fn build(self) -> MapResult<EngineConfig> {
        let factors = match self.regen_factor {
            Some(regen_factor) => TorqueFactors {
                forward_factor: self.forward_factor,
                regen_factor,
            },
            None => {
                // Deadband must be sane before it is used as a divisor
                self.deadband.validate()?;
                self.limits.validate()?;
                TorqueFactors::derived(self.forward_factor, &self.deadband, &self.limits)
            }
        };

        EngineConfig {
            calibration: self.calibration,
            deadband: self.deadband,
            factors,
            limits: self.limits,
            regen_gate: self.regen_gate,
        }
        .validated()
    }
}

fn is_open_unit(value: f32) -> bool {
    value > 0.0 && value < 1.0
}

fn is_positive(value: f32) -> bool {
    value > 0.0 && value.is_finite()
}
