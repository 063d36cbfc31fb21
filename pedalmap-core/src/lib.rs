//! Core accelerator mapping engine for PedalMap
//!
//! Turns two redundant accelerator pedal readings into one torque or regen
//! command per control cycle. Built for the motor-controller MCU as well as
//! for host-side tuning tools.
//!
//! Key constraints:
//! - No heap allocation in the per-cycle path
//! - No state carried between cycles
//! - Every fault ends in a Coast command, never a partial one
//!
//! ```no_run
//! use pedalmap_core::{TorqueEngine, EngineConfig, PedalMonitor, TorqueCommand};
//!
//! let engine = TorqueEngine::new(EngineConfig::default())?;
//! let mut monitor = PedalMonitor::from_config(engine.config())?;
//!
//! // Once per tick
//! let reading = monitor.update(1866, 3365, 0);
//! let (outcome, controller) = engine.cycle_controller(&reading.to_cycle_input(Some(40.0)));
//! match outcome.command {
//!     TorqueCommand::Forward(_) => {} // drive
//!     TorqueCommand::Regen(_) => {}   // brake current
//!     TorqueCommand::Coast => {}      // zero torque
//! }
//! # let _ = controller;
//! # Ok::<(), pedalmap_core::MapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod command;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod forward;
pub mod limiter;
pub mod mode;
pub mod monitor;
pub mod normalize;
pub mod regen;
#[cfg(feature = "std")]
pub mod snapshot;
pub mod time;

// Public API
pub use command::{ControllerCommand, RawCommand, TorqueCommand};
pub use config::{
    CalibrationConstants, DeadbandConfig, EngineConfig, EngineConfigBuilder, OutputLimits,
    RegenGate, TorqueFactors,
};
pub use engine::{compute_command, CycleInput, CycleOutcome, TorqueEngine};
pub use errors::{MapError, MapResult};
pub use forward::map_forward;
pub use limiter::limit;
pub use mode::{select_mode, Mode};
pub use monitor::{MonitorReading, PedalFault, PedalMonitor};
pub use normalize::{normalize, normalize_percent, AcceleratorValue, PedalPercent};
pub use regen::map_regen;
#[cfg(feature = "std")]
pub use snapshot::SharedConfig;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
