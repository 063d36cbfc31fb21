//! Common fixtures for the integration tests
//!
//! This module provides:
//! - The reference drive scenarios with their expected commands
//! - Raw ADC helpers for driving the pedal monitor
//! - Bit-exact comparison of outcomes

#![allow(dead_code)]

use pedalmap_core::{
    config::CalibrationConstants, CycleOutcome, EngineConfig, TorqueCommand,
};

pub mod scenarios;

/// Configuration every scenario is defined against
///
/// forward 0.25, regen 0.20, forward factor 220 Nm, max regen 15 A
pub fn reference_config() -> EngineConfig {
    EngineConfig::default()
}

/// Raw counts for a sensor at `percent` of its travel
pub fn raw_for_percent(calibration: &CalibrationConstants, percent: f32) -> u16 {
    let span = (calibration.max_raw - calibration.offset_raw) as f32;
    calibration.offset_raw + (span * percent / 100.0) as u16
}

/// Raw counts for both sensors at the same travel
pub fn raw_pair(config: &EngineConfig, percent: f32) -> (u16, u16) {
    (
        raw_for_percent(&config.calibration[0], percent),
        raw_for_percent(&config.calibration[1], percent),
    )
}

/// Outcomes equal down to the float bit pattern
pub fn assert_bit_identical(a: &CycleOutcome, b: &CycleOutcome) {
    assert_eq!(a.mode, b.mode);
    assert_eq!(a.fault, b.fault);
    assert_eq!(command_kind(&a.command), command_kind(&b.command));
    assert_eq!(a.command.magnitude_bits(), b.command.magnitude_bits());
}

fn command_kind(command: &TorqueCommand) -> u8 {
    match command {
        TorqueCommand::Forward(_) => 0,
        TorqueCommand::Regen(_) => 1,
        TorqueCommand::Coast => 2,
    }
}
