//! Per-Cycle Mapping Pipeline
//!
//! ## Flow
//!
//! ```text
//! CycleInput ──► fault flag? ──yes──► Coast + PlausibilityFault
//!                    │no
//!                    ▼
//!               normalize ──err──► Coast + OutOfRangeInput
//!                    │
//!                    ▼
//!               select_mode
//!          ┌─────────┼──────────┐
//!          ▼         ▼          ▼
//!     map_forward  Coast    map_regen ──gate closed──► Coast
//!          └─────────┼──────────┘
//!                    ▼
//!                  limit ──► TorqueCommand
//! ```
//!
//! Every branch returns a complete [`RawCommand`] built exactly once; the
//! branches share no intermediate values. The whole computation reads the
//! configuration by reference and keeps nothing between calls, so the same
//! input and snapshot always give a bit-identical outcome.
//!
//! ## Usage
//!
//! ```rust
//! use pedalmap_core::{TorqueEngine, EngineConfig, CycleInput, TorqueCommand};
//!
//! let engine = TorqueEngine::new(EngineConfig::default())?;
//!
//! let outcome = engine.cycle(&CycleInput::new(100.0, 100.0));
//! assert_eq!(outcome.command, TorqueCommand::Forward(220.0));
//!
//! let outcome = engine.cycle(&CycleInput::new(0.0, 0.0));
//! assert_eq!(outcome.command, TorqueCommand::Regen(15.0));
//! # Ok::<(), pedalmap_core::MapError>(())
//! ```

use crate::{
    command::{RawCommand, TorqueCommand, ControllerCommand},
    config::EngineConfig,
    constants::drive::MPH_TO_KMH,
    errors::{MapError, MapResult},
    forward::map_forward,
    limiter::limit,
    mode::{select_mode, Mode},
    normalize::{normalize_percent, AcceleratorValue},
    regen::map_regen,
};

/// Everything the engine needs from the outside for one cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleInput {
    /// Sensor A, percent of travel, clamped by the monitor
    pub pedal_a: f32,
    /// Sensor B, percent of travel, clamped by the monitor
    pub pedal_b: f32,
    /// Set by the monitor when the sensors are implausible
    pub plausibility_fault: bool,
    /// Vehicle speed, only consulted by the regen gate
    pub vehicle_speed_kmh: Option<f32>,
}

impl CycleInput {
    /// Plain pedal input with no fault and unknown speed
    pub const fn new(pedal_a: f32, pedal_b: f32) -> Self {
        Self {
            pedal_a,
            pedal_b,
            plausibility_fault: false,
            vehicle_speed_kmh: None,
        }
    }

    /// Mark the input as implausible
    pub const fn with_fault(mut self, fault: bool) -> Self {
        self.plausibility_fault = fault;
        self
    }

    /// Attach vehicle speed in km/h
    pub const fn with_speed_kmh(mut self, speed_kmh: f32) -> Self {
        self.vehicle_speed_kmh = Some(speed_kmh);
        self
    }

    /// Attach vehicle speed in mph, as reported by the motor controller
    pub fn with_speed_mph(self, speed_mph: f32) -> Self {
        self.with_speed_kmh(speed_mph * MPH_TO_KMH)
    }
}

/// Result of one cycle
///
/// There is always a command. When `fault` is set the command is Coast and
/// the fault should be escalated by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleOutcome {
    /// Command for the motor controller
    pub command: TorqueCommand,
    /// Mode of the emitted command, `None` when a fault forced Coast
    pub mode: Option<Mode>,
    /// Fault that forced the fail-safe command
    pub fault: Option<MapError>,
}

impl CycleOutcome {
    fn fail_safe(fault: MapError) -> Self {
        Self {
            command: TorqueCommand::Coast,
            mode: None,
            fault: Some(fault),
        }
    }

    fn commanded(mode: Mode, command: TorqueCommand) -> Self {
        Self { command, mode: Some(mode), fault: None }
    }

    /// True when a fault forced Coast
    pub fn is_fail_safe(&self) -> bool {
        self.fault.is_some()
    }

    /// Fault as a `Result`, for callers that want `?`
    pub fn into_result(self) -> MapResult<TorqueCommand> {
        match self.fault {
            Some(fault) => Err(fault),
            None => Ok(self.command),
        }
    }
}

/// Compute the command for one cycle
///
/// `config` must have passed [`EngineConfig::validate`]; the mappers divide by
/// `1 - forward_threshold` and trust the deadband ordering. Snapshots from the
/// builder, [`TorqueEngine`] or `SharedConfig` always have. A snapshot
/// deserialized directly must go through [`EngineConfig::validated`] first.
pub fn compute_command(input: &CycleInput, config: &EngineConfig) -> CycleOutcome {
    if input.plausibility_fault {
        log_warn!("Pedal plausibility fault, commanding coast");
        return CycleOutcome::fail_safe(MapError::PlausibilityFault {
            reason: "pedal monitor reported implausible sensors",
        });
    }

    let value = match normalize_percent(input.pedal_a, input.pedal_b) {
        Ok(value) => value,
        Err(e) => {
            log_warn!("Pedal input rejected ({}), commanding coast", e);
            return CycleOutcome::fail_safe(e);
        }
    };

    let selected = select_mode(value, &config.deadband);
    let (mode, raw) = map_mode(selected, value, input, config);
    let command = limit(raw, &config.limits);

    log_trace!(
        "accel {} -> {} {:?}",
        value.get(),
        mode.name(),
        command
    );

    CycleOutcome::commanded(mode, command)
}

/// Run the mapper for the selected mode
///
/// Each arm builds its command from `value` alone.
fn map_mode(
    mode: Mode,
    value: AcceleratorValue,
    input: &CycleInput,
    config: &EngineConfig,
) -> (Mode, RawCommand) {
    match mode {
        Mode::Forward => (
            Mode::Forward,
            RawCommand::Forward(map_forward(value, &config.deadband, &config.factors)),
        ),
        Mode::Coast => (Mode::Coast, RawCommand::Coast),
        Mode::Regen => match &config.regen_gate {
            Some(gate) if !gate.allows(input.vehicle_speed_kmh) => {
                log_debug!("Regen gated at speed {:?}", input.vehicle_speed_kmh);
                (Mode::Coast, RawCommand::Coast)
            }
            _ => (
                Mode::Regen,
                RawCommand::Regen(map_regen(value, &config.deadband, &config.factors)),
            ),
        },
    }
}

/// Engine bound to one validated configuration snapshot
#[derive(Debug, Clone, Copy)]
pub struct TorqueEngine {
    config: EngineConfig,
}

impl TorqueEngine {
    /// Validate the snapshot and build an engine around it
    ///
    /// An invalid snapshot is fatal; the vehicle must not drive on it.
    pub fn new(config: EngineConfig) -> MapResult<Self> {
        let config = config.validated()?;
        log_debug!(
            "Engine ready: forward >= {}, regen < {}, max regen {} A",
            config.deadband.forward_threshold,
            config.deadband.regen_threshold,
            config.limits.max_regen_current
        );
        Ok(Self { config })
    }

    /// Snapshot in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute one cycle
    pub fn cycle(&self, input: &CycleInput) -> CycleOutcome {
        compute_command(input, &self.config)
    }

    /// Compute one cycle and convert to controller units
    pub fn cycle_controller(&self, input: &CycleInput) -> (CycleOutcome, ControllerCommand) {
        let outcome = self.cycle(input);
        let command = outcome.command.to_controller(&self.config.limits);
        (outcome, command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TorqueEngine {
        TorqueEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn fault_flag_wins_over_valid_pedals() {
        let outcome = engine().cycle(&CycleInput::new(100.0, 100.0).with_fault(true));
        assert!(outcome.command.is_coast());
        assert!(matches!(outcome.fault, Some(MapError::PlausibilityFault { .. })));
        assert_eq!(outcome.mode, None);
    }

    #[test]
    fn out_of_range_forces_coast() {
        let outcome = engine().cycle(&CycleInput::new(101.0, 50.0));
        assert!(outcome.command.is_coast());
        assert!(matches!(outcome.fault, Some(MapError::OutOfRangeInput { .. })));
        assert!(outcome.into_result().is_err());
    }

    #[test]
    fn coast_band_is_zero() {
        let outcome = engine().cycle(&CycleInput::new(22.0, 22.0));
        assert_eq!(outcome.command, TorqueCommand::Coast);
        assert_eq!(outcome.mode, Some(Mode::Coast));
        assert!(!outcome.is_fail_safe());
    }

    #[test]
    fn regen_gate_blocks_standstill_regen() {
        let config = EngineConfig::builder().regen_min_speed(2.0).build().unwrap();
        let engine = TorqueEngine::new(config).unwrap();

        let parked = engine.cycle(&CycleInput::new(0.0, 0.0).with_speed_kmh(0.0));
        assert_eq!(parked.command, TorqueCommand::Coast);

        let unknown = engine.cycle(&CycleInput::new(0.0, 0.0));
        assert_eq!(unknown.command, TorqueCommand::Coast);

        let moving = engine.cycle(&CycleInput::new(0.0, 0.0).with_speed_kmh(30.0));
        assert_eq!(moving.command, TorqueCommand::Regen(15.0));
    }

    #[test]
    fn speed_in_mph_converted() {
        let input = CycleInput::new(0.0, 0.0).with_speed_mph(10.0);
        let speed = input.vehicle_speed_kmh.unwrap();
        assert!((speed - 16.09).abs() < 1e-3);
    }

    #[test]
    fn controller_command_in_tenths() {
        let (_, command) = engine().cycle_controller(&CycleInput::new(0.0, 0.0));
        assert_eq!(command, ControllerCommand::BrakeCurrent(150));
    }

    #[test]
    fn unvalidated_full_travel_threshold_refused() {
        let mut config = EngineConfig::default();
        config.deadband.forward_threshold = 1.0;
        assert!(matches!(
            TorqueEngine::new(config),
            Err(MapError::InvalidConfiguration { .. })
        ));
        assert!(config.validated().is_err());
    }

    #[test]
    fn invalid_config_refused() {
        let mut config = EngineConfig::default();
        config.deadband.regen_threshold = 0.5;
        assert!(TorqueEngine::new(config).is_err());
    }
}
