//! Brake and accelerator overlap guard
//!
//! Hard braking with more than a quarter of accelerator travel latches the
//! guard; it only releases once the accelerator is almost fully let go. While
//! latched the monitor reports a fault and the engine coasts.

use crate::constants::monitor::{
    BRAKE_OVERLAP_ACCEL_RELEASE, BRAKE_OVERLAP_ACCEL_TRIP, BRAKE_OVERLAP_PRESSURE,
};

/// Latching brake/accelerator overlap detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrakeOverlapGuard {
    brake_pressure_trip: f32,
    accel_trip: f32,
    accel_release: f32,
    latched: bool,
}

impl Default for BrakeOverlapGuard {
    fn default() -> Self {
        Self {
            brake_pressure_trip: BRAKE_OVERLAP_PRESSURE,
            accel_trip: BRAKE_OVERLAP_ACCEL_TRIP,
            accel_release: BRAKE_OVERLAP_ACCEL_RELEASE,
            latched: false,
        }
    }
}

impl BrakeOverlapGuard {
    /// Guard with custom thresholds
    pub fn new(brake_pressure_trip: f32, accel_trip: f32, accel_release: f32) -> Self {
        Self {
            brake_pressure_trip,
            accel_trip,
            accel_release,
            latched: false,
        }
    }

    /// Feed one cycle; returns whether power must stay cut
    ///
    /// `accel` is the unit accelerator value, `brake_pressure` the averaged
    /// brake sensor reading.
    pub fn update(&mut self, accel: f32, brake_pressure: f32) -> bool {
        if brake_pressure > self.brake_pressure_trip && accel > self.accel_trip {
            if !self.latched {
                log_warn!("Brake overlap: brake {} with accelerator {}", brake_pressure, accel);
            }
            self.latched = true;
        } else if self.latched && accel < self.accel_release {
            log_debug!("Brake overlap released");
            self.latched = false;
        }
        self.latched
    }

    /// Whether power is currently cut
    pub fn is_latched(&self) -> bool {
        self.latched
    }
}
