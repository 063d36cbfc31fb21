//! Profile documents
//!
//! A profile is a flat JSON object. Only the deadband, the forward factor and
//! the regen limit are required; everything else falls back to the engine
//! defaults. When `regen_factor` is missing it is derived from the regen
//! threshold and limit, the same way the builder does it.

use std::{fs, path::Path};

use pedalmap_core::config::{CalibrationConstants, EngineConfig};
use serde::{Deserialize, Serialize};

use crate::ProfileError;

/// Serialized form of one calibration profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    /// Registry key
    pub name: String,

    /// Free text shown in tuning tools
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Forward-engage threshold, unit fraction of pedal travel
    pub forward_threshold: f32,

    /// Regen-engage threshold, unit fraction of pedal travel
    pub regen_threshold: f32,

    /// Torque at full pedal (Nm)
    pub forward_factor: f32,

    /// Regen gain (A per percent below threshold), derived when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regen_factor: Option<f32>,

    /// Maximum AC brake current (A)
    pub max_regen_current: f32,

    /// Controller units per Nm or A
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_scale: Option<f32>,

    /// Minimum speed for regen (km/h); no gate when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regen_min_speed_kmh: Option<f32>,

    /// Sensor A and B calibration; engine defaults when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration: Option<[CalibrationConstants; 2]>,
}

impl ProfileDocument {
    /// Parse a profile from JSON text
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        serde_json::from_str(json).map_err(|e| ProfileError::Parse(e.to_string()))
    }

    /// Read and parse a profile file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| ProfileError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Pretty JSON for writing back to disk
    pub fn to_json(&self) -> Result<String, ProfileError> {
        serde_json::to_string_pretty(self).map_err(|e| ProfileError::Parse(e.to_string()))
    }

    /// Build and validate the engine snapshot this profile describes
    pub fn to_config(&self) -> Result<EngineConfig, ProfileError> {
        let mut builder = EngineConfig::builder()
            .forward_threshold(self.forward_threshold)
            .regen_threshold(self.regen_threshold)
            .forward_factor(self.forward_factor)
            .max_regen_current(self.max_regen_current);

        if let Some(factor) = self.regen_factor {
            builder = builder.regen_factor(factor);
        }
        if let Some(scale) = self.command_scale {
            builder = builder.command_scale(scale);
        }
        if let Some(speed) = self.regen_min_speed_kmh {
            builder = builder.regen_min_speed(speed);
        }
        if let Some([a, b]) = self.calibration {
            builder = builder.sensor_a(a).sensor_b(b);
        }

        builder.build().map_err(|e| {
            log::warn!("Profile '{}' rejected: {}", self.name, e);
            ProfileError::Invalid(e)
        })
    }

    /// Capture a snapshot as a profile
    ///
    /// The regen factor is always written out so the round trip is exact.
    pub fn from_config(name: impl Into<String>, config: &EngineConfig) -> Self {
        Self {
            name: name.into(),
            description: None,
            forward_threshold: config.deadband.forward_threshold,
            regen_threshold: config.deadband.regen_threshold,
            forward_factor: config.factors.forward_factor,
            regen_factor: Some(config.factors.regen_factor),
            max_regen_current: config.limits.max_regen_current,
            command_scale: Some(config.limits.command_scale),
            regen_min_speed_kmh: config.regen_gate.map(|gate| gate.min_speed_kmh),
            calibration: Some(config.calibration),
        }
    }
}
