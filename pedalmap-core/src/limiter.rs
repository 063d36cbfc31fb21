//! Output Limiter
//!
//! Last stage of the cycle. Regen current is clamped to the controller's AC
//! brake rating; forward torque and Coast pass through, since the forward
//! limit is enforced by the controller itself.

use crate::{
    command::{RawCommand, TorqueCommand},
    config::OutputLimits,
};

/// Apply controller limits to a mapper result
pub fn limit(command: RawCommand, limits: &OutputLimits) -> TorqueCommand {
    match command {
        RawCommand::Forward(torque) => TorqueCommand::Forward(torque),
        RawCommand::Regen(current) => {
            let clamped = clamp_regen(current, limits);
            if clamped != current {
                log_trace!("Regen request {} A clamped to {} A", current, clamped);
            }
            TorqueCommand::Regen(clamped)
        }
        RawCommand::Coast => TorqueCommand::Coast,
    }
}

/// Clamp a brake current into [0, max_regen_current]
fn clamp_regen(current: f32, limits: &OutputLimits) -> f32 {
    libm::fminf(libm::fmaxf(current, 0.0), limits.max_regen_current)
}
