//! Calibration Profiles for the PedalMap Engine
//!
//! ## Overview
//!
//! The engine takes one immutable [`EngineConfig`] snapshot. On the vehicle
//! that snapshot is usually compiled in; on the bench and in tuning tools it
//! comes from a named JSON profile instead. This crate owns that path:
//!
//! ```text
//! profile.json ──► ProfileDocument ──► EngineConfigBuilder ──► validate ──► EngineConfig
//! ```
//!
//! A profile that fails engine validation never reaches the registry.
//!
//! ## Profile Format
//!
//! ```json
//! {
//!   "name": "endurance",
//!   "forward_threshold": 0.25,
//!   "regen_threshold": 0.20,
//!   "forward_factor": 220.0,
//!   "max_regen_current": 15.0
//! }
//! ```
//!
//! Optional keys: `description`, `regen_factor` (derived when absent),
//! `command_scale`, `regen_min_speed_kmh`, `calibration`.
//!
//! ## Built-in Profiles
//!
//! The `profiles/` directory is embedded at compile time:
//! - **endurance**: the reference mapping
//! - **low_grip**: softer torque and gated regen for wet conditions
//! - **dyno**: short deadband with a weak fixed regen gain
//!
//! ## Usage Example
//!
//! ```rust
//! use pedalmap_profiles::{ProfileRegistry, BUILTIN_REGISTRY};
//! use pedalmap_core::{compute_command, CycleInput, TorqueCommand};
//!
//! let config = BUILTIN_REGISTRY.get("endurance")?;
//! let outcome = compute_command(&CycleInput::new(100.0, 100.0), &config);
//! assert_eq!(outcome.command, TorqueCommand::Forward(220.0));
//!
//! // Site-specific registry
//! let registry = ProfileRegistry::new();
//! registry.load_builtins()?;
//! assert!(registry.get("low_grip").is_ok());
//! # Ok::<(), pedalmap_profiles::ProfileError>(())
//! ```

pub use pedalmap_core::config::EngineConfig;
use pedalmap_core::MapError;

pub mod document;
pub mod registry;

pub use document::ProfileDocument;
pub use registry::{ProfileRegistry, BUILTIN_REGISTRY};

/// Profile-related errors
#[derive(Debug, thiserror_no_std::Error)]
pub enum ProfileError {
    #[error("Failed to parse profile: {0}")]
    Parse(String),

    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Profile already registered: {0}")]
    Duplicate(String),

    #[error("Failed to read profile: {0}")]
    Io(String),

    #[error("Profile rejected by the engine: {0}")]
    Invalid(MapError),

    #[error("Profile registry lock poisoned")]
    Poisoned,
}

impl From<MapError> for ProfileError {
    fn from(e: MapError) -> Self {
        ProfileError::Invalid(e)
    }
}
