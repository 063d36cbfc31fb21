//! Shared configuration snapshot (requires std)
//!
//! The control loop reads a snapshot once per cycle; a tuning task may swap in
//! a new one at any time. A swap replaces the whole `Arc`, so a cycle sees
//! either the old thresholds and factors or the new ones, never a mix.
//!
//! ```rust
//! use pedalmap_core::{snapshot::SharedConfig, compute_command, CycleInput, EngineConfig};
//!
//! let shared = SharedConfig::new(EngineConfig::default())?;
//!
//! let config = shared.snapshot();
//! let outcome = compute_command(&CycleInput::new(0.0, 0.0), &config);
//! assert_eq!(outcome.command.magnitude(), 15.0);
//!
//! let tuned = EngineConfig::builder().max_regen_current(10.0).build()?;
//! shared.replace(tuned)?;
//! assert_eq!(shared.snapshot().limits.max_regen_current, 10.0);
//! # Ok::<(), pedalmap_core::MapError>(())
//! ```

use std::sync::{Arc, RwLock};

use crate::{config::EngineConfig, errors::MapResult};

/// Atomically replaceable, validated engine configuration
#[derive(Debug)]
pub struct SharedConfig {
    current: RwLock<Arc<EngineConfig>>,
}

impl SharedConfig {
    /// Validate and publish the first snapshot
    pub fn new(config: EngineConfig) -> MapResult<Self> {
        let config = config.validated()?;
        Ok(Self { current: RwLock::new(Arc::new(config)) })
    }

    /// Current snapshot; hold it for the whole cycle
    pub fn snapshot(&self) -> Arc<EngineConfig> {
        // A panicked writer cannot leave a half-written Arc behind
        let guard = self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Validate and publish a new snapshot, returning the previous one
    ///
    /// An invalid configuration is rejected and the current one stays live.
    pub fn replace(&self, config: EngineConfig) -> MapResult<Arc<EngineConfig>> {
        let config = Arc::new(config.validated()?);
        let mut guard = self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = std::mem::replace(&mut *guard, config);
        log_debug!(
            "Configuration replaced: forward factor {} -> {}",
            previous.factors.forward_factor,
            guard.factors.forward_factor
        );
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compute_command, CycleInput, TorqueCommand};
    use std::thread;

    #[test]
    fn invalid_replacement_keeps_current() {
        let shared = SharedConfig::new(EngineConfig::default()).unwrap();
        let mut bad = EngineConfig::default();
        bad.limits.max_regen_current = -1.0;

        assert!(shared.replace(bad).is_err());
        assert_eq!(*shared.snapshot(), EngineConfig::default());
    }

    #[test]
    fn held_snapshot_survives_replace() {
        let shared = SharedConfig::new(EngineConfig::default()).unwrap();
        let held = shared.snapshot();

        let tuned = EngineConfig::builder().forward_factor(100.0).build().unwrap();
        let previous = shared.replace(tuned).unwrap();

        assert_eq!(held.factors.forward_factor, 220.0);
        assert_eq!(previous.factors.forward_factor, 220.0);
        assert_eq!(shared.snapshot().factors.forward_factor, 100.0);
    }

    #[test]
    fn readers_never_see_mixed_snapshot() {
        let a = EngineConfig::default();
        let b = EngineConfig::builder()
            .forward_factor(100.0)
            .max_regen_current(10.0)
            .build()
            .unwrap();
        let shared = Arc::new(SharedConfig::new(a).unwrap());

        let writer = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..200 {
                    let next = if i % 2 == 0 { b } else { a };
                    shared.replace(next).unwrap();
                }
            })
        };

        for _ in 0..200 {
            let config = shared.snapshot();
            let full = compute_command(&CycleInput::new(100.0, 100.0), &config).command;
            let released = compute_command(&CycleInput::new(0.0, 0.0), &config).command;
            let pair = (full, released);
            assert!(
                pair == (TorqueCommand::Forward(220.0), TorqueCommand::Regen(15.0))
                    || pair == (TorqueCommand::Forward(100.0), TorqueCommand::Regen(10.0)),
                "mixed snapshot: {:?}",
                pair
            );
        }

        writer.join().unwrap();
    }
}
