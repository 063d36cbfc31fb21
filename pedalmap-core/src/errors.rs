//! Error Types for the Mapping Engine
//!
//! ## Design Philosophy
//!
//! The engine runs once per control tick on a motor-controller MCU, so its
//! errors follow the same rules as the rest of the hot path:
//!
//! 1. **Small Size**: every variant is a few words; errors are returned on
//!    every faulty cycle and may be pushed into fault queues.
//!
//! 2. **No Heap Allocation**: reasons are `&'static str`, values are inline.
//!
//! 3. **Copy Semantics**: errors are `Copy` so the engine can hand one to the
//!    caller and keep emitting its fail-safe command.
//!
//! ## Error Categories
//!
//! ### Cycle Faults (recoverable by failing safe)
//! - `OutOfRangeInput`: a pedal percentage outside [0, 100] reached the
//!   normalizer. The monitor upstream is broken; the engine emits Coast.
//! - `PlausibilityFault`: the monitor flagged the two sensors as disagreeing
//!   (or shorted, or open). The engine emits Coast.
//!
//! ### Startup Faults (fatal)
//! - `InvalidConfiguration`: a threshold, factor or limit would make the
//!   mapping unsafe. The process must refuse to run with it.
//!
//! ## Handling Strategy
//!
//! ```rust
//! use pedalmap_core::{MapError, EngineConfig, CycleInput, compute_command};
//!
//! let config = EngineConfig::default();
//! let outcome = compute_command(&CycleInput::new(101.0, 50.0), &config);
//!
//! match outcome.fault {
//!     None => {}
//!     Some(MapError::OutOfRangeInput { .. }) => {
//!         // monitor delivered an unclamped value, escalate
//!     }
//!     Some(MapError::PlausibilityFault { .. }) => {
//!         // sensors disagree, the command is already Coast
//!     }
//!     Some(MapError::InvalidConfiguration { .. }) => unreachable!(),
//! }
//! assert!(outcome.command.is_coast());
//! ```

use thiserror_no_std::Error;

/// Result type for mapping operations
pub type MapResult<T> = Result<T, MapError>;

/// Mapping errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MapError {
    /// Pedal percentage outside its contractual range
    #[error("Pedal input {value} outside range [{min}, {max}]")]
    OutOfRangeInput {
        /// The offending reading (may be NaN)
        value: f32,
        /// Lower contractual bound
        min: f32,
        /// Upper contractual bound
        max: f32,
    },

    /// Configuration would make the mapping unsafe
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Which invariant was violated
        reason: &'static str,
    },

    /// Upstream monitor reported a sensor implausibility
    #[error("Plausibility fault: {reason}")]
    PlausibilityFault {
        /// Short description of the detected condition
        reason: &'static str,
    },
}

impl MapError {
    /// Shorthand used by the config validators
    pub(crate) const fn config(reason: &'static str) -> Self {
        Self::InvalidConfiguration { reason }
    }

    /// True for faults that force a Coast command but let the next cycle run
    pub fn is_cycle_fault(&self) -> bool {
        !matches!(self, Self::InvalidConfiguration { .. })
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MapError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::OutOfRangeInput { value, min, max } =>
                defmt::write!(fmt, "Pedal {} outside [{}, {}]", value, min, max),
            Self::InvalidConfiguration { reason } =>
                defmt::write!(fmt, "Invalid config: {}", reason),
            Self::PlausibilityFault { reason } =>
                defmt::write!(fmt, "Plausibility: {}", reason),
        }
    }
}
