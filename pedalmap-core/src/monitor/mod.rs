//! Reference Pedal Monitor
//!
//! ## Overview
//!
//! The engine trusts its inputs to be clamped percentages plus a fault flag.
//! Something has to produce them from two raw ADC channels; this module is
//! that collaborator for deployments without one of their own.
//!
//! ```text
//! raw A ──► CalibrationConstants::to_percent ──┐
//!                                              ├──► MonitorReading ──► CycleInput
//! raw B ──► CalibrationConstants::to_percent ──┘        │
//!                                                       └── faults (debounced)
//! ```
//!
//! ## Fault Conditions
//!
//! | Fault                | Condition                                  |
//! |----------------------|--------------------------------------------|
//! | `OpenCircuit`        | either raw reading within 20 counts of 4096|
//! | `ShortCircuit`       | either raw reading below 500 counts        |
//! | `SensorDisagreement` | percentages differ by more than 30         |
//! | `BrakeOverlap`       | hard braking with > 25% accelerator        |
//!
//! The three sensor faults are debounced for 500 ms so a single noisy sample
//! does not cut power. The overlap guard latches instead of debouncing.

mod debounce;
mod overlap;

pub use debounce::Debouncer;
pub use overlap::BrakeOverlapGuard;

use heapless::Vec;

use crate::{
    config::{CalibrationConstants, EngineConfig},
    constants::monitor::{
        ADC_FULL_SCALE, OPEN_CIRCUIT_MARGIN, PEDAL_DIFF_THRESHOLD_PCT,
        PEDAL_FAULT_DEBOUNCE_MS, SHORT_CIRCUIT_RAW_MAX,
    },
    engine::CycleInput,
    errors::{MapError, MapResult},
    normalize::{normalize, PedalPercent},
    time::{TimeSource, Timestamp},
};

/// Number of distinct monitor faults
pub const MAX_ACTIVE_FAULTS: usize = 4;

/// Fault detected by the pedal monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PedalFault {
    /// A sensor reads near full scale (wire broken)
    OpenCircuit,
    /// A sensor reads near zero (shorted to ground)
    ShortCircuit,
    /// The two sensors disagree on pedal position
    SensorDisagreement,
    /// Accelerator pressed while braking hard
    BrakeOverlap,
}

impl PedalFault {
    /// Static description used in logs and in `MapError`
    pub const fn reason(&self) -> &'static str {
        match self {
            PedalFault::OpenCircuit => "pedal open circuit",
            PedalFault::ShortCircuit => "pedal short circuit",
            PedalFault::SensorDisagreement => "pedal sensors disagree",
            PedalFault::BrakeOverlap => "brake and accelerator overlap",
        }
    }
}

impl From<PedalFault> for MapError {
    fn from(fault: PedalFault) -> Self {
        MapError::PlausibilityFault { reason: fault.reason() }
    }
}

/// Monitor output for one cycle
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorReading {
    /// Sensor A, clamped percent
    pub pedal_a: PedalPercent,
    /// Sensor B, clamped percent
    pub pedal_b: PedalPercent,
    /// Faults asserted this cycle
    pub faults: Vec<PedalFault, MAX_ACTIVE_FAULTS>,
}

impl MonitorReading {
    /// No fault asserted
    pub fn is_plausible(&self) -> bool {
        self.faults.is_empty()
    }

    /// First asserted fault as an engine error
    pub fn fault(&self) -> Option<MapError> {
        self.faults.first().map(|f| MapError::from(*f))
    }

    /// Engine input for this reading, with the vehicle speed if known
    pub fn to_cycle_input(&self, speed_kmh: Option<f32>) -> CycleInput {
        CycleInput {
            pedal_a: self.pedal_a.get(),
            pedal_b: self.pedal_b.get(),
            plausibility_fault: !self.is_plausible(),
            vehicle_speed_kmh: speed_kmh,
        }
    }
}

/// Stateful raw-to-percent converter and fault detector
#[derive(Debug, Clone)]
pub struct PedalMonitor {
    calibration: [CalibrationConstants; 2],
    open_circuit: Debouncer,
    short_circuit: Debouncer,
    disagreement: Debouncer,
    overlap: BrakeOverlapGuard,
}

impl PedalMonitor {
    /// Monitor for two calibrated sensors
    pub fn new(calibration: [CalibrationConstants; 2]) -> MapResult<Self> {
        for sensor in &calibration {
            sensor.validate()?;
        }
        Ok(Self {
            calibration,
            open_circuit: Debouncer::new(PEDAL_FAULT_DEBOUNCE_MS),
            short_circuit: Debouncer::new(PEDAL_FAULT_DEBOUNCE_MS),
            disagreement: Debouncer::new(PEDAL_FAULT_DEBOUNCE_MS),
            overlap: BrakeOverlapGuard::default(),
        })
    }

    /// Monitor using the calibration carried by an engine snapshot
    pub fn from_config(config: &EngineConfig) -> MapResult<Self> {
        Self::new(config.calibration)
    }

    /// Replace the overlap guard thresholds
    pub fn with_overlap_guard(mut self, guard: BrakeOverlapGuard) -> Self {
        self.overlap = guard;
        self
    }

    /// Process one sample pair without brake information
    pub fn update(&mut self, raw_a: u16, raw_b: u16, now: Timestamp) -> MonitorReading {
        self.process(raw_a, raw_b, None, now)
    }

    /// Process one sample pair plus the averaged brake pressure
    pub fn update_with_brake(
        &mut self,
        raw_a: u16,
        raw_b: u16,
        brake_pressure: f32,
        now: Timestamp,
    ) -> MonitorReading {
        self.process(raw_a, raw_b, Some(brake_pressure), now)
    }

    /// Process one sample pair, reading the time from a clock
    pub fn poll<T: TimeSource>(&mut self, raw_a: u16, raw_b: u16, clock: &T) -> MonitorReading {
        self.update(raw_a, raw_b, clock.now())
    }

    fn process(
        &mut self,
        raw_a: u16,
        raw_b: u16,
        brake_pressure: Option<f32>,
        now: Timestamp,
    ) -> MonitorReading {
        let pedal_a = self.calibration[0].to_percent(raw_a);
        let pedal_b = self.calibration[1].to_percent(raw_b);

        let open_limit = ADC_FULL_SCALE - OPEN_CIRCUIT_MARGIN;
        let open = raw_a > open_limit || raw_b > open_limit;
        let short = raw_a < SHORT_CIRCUIT_RAW_MAX || raw_b < SHORT_CIRCUIT_RAW_MAX;
        let disagree = libm::fabsf(pedal_a.get() - pedal_b.get()) > PEDAL_DIFF_THRESHOLD_PCT;

        let mut faults = Vec::new();
        // Capacity matches the number of fault kinds, pushes cannot fail
        if self.open_circuit.update(open, now) {
            let _ = faults.push(PedalFault::OpenCircuit);
        }
        if self.short_circuit.update(short, now) {
            let _ = faults.push(PedalFault::ShortCircuit);
        }
        if self.disagreement.update(disagree, now) {
            let _ = faults.push(PedalFault::SensorDisagreement);
        }
        if let Some(pressure) = brake_pressure {
            let accel = normalize(pedal_a, pedal_b).get();
            if self.overlap.update(accel, pressure) {
                let _ = faults.push(PedalFault::BrakeOverlap);
            }
        }

        #[cfg(feature = "log")]
        for fault in &faults {
            log_warn!("Pedal monitor fault: {}", fault.reason());
        }

        MonitorReading { pedal_a, pedal_b, faults }
    }
}
