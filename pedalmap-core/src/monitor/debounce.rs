//! Time-based debouncing of fault conditions

use crate::time::Timestamp;

/// Reports a condition only after it has held for a full period
///
/// The timer starts on the first cycle the condition is seen and is dropped
/// the first cycle it is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    period_ms: u64,
    started_at: Option<Timestamp>,
}

impl Debouncer {
    /// Debouncer that asserts after `period_ms` of continuous condition
    pub const fn new(period_ms: u64) -> Self {
        Self { period_ms, started_at: None }
    }

    /// Feed this cycle's condition; returns whether the fault is asserted
    pub fn update(&mut self, condition: bool, now: Timestamp) -> bool {
        if !condition {
            self.started_at = None;
            return false;
        }
        let start = *self.started_at.get_or_insert(now);
        now.saturating_sub(start) >= self.period_ms
    }

    /// Whether a condition is currently being timed
    pub fn is_pending(&self) -> bool {
        self.started_at.is_some()
    }

    /// Drop any running timer
    pub fn reset(&mut self) {
        self.started_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asserts_after_period() {
        let mut debounce = Debouncer::new(500);
        assert!(!debounce.update(true, 1000));
        assert!(debounce.is_pending());
        assert!(!debounce.update(true, 1499));
        assert!(debounce.update(true, 1500));
        assert!(debounce.update(true, 2000));
    }

    #[test]
    fn glitch_restarts_timer() {
        let mut debounce = Debouncer::new(500);
        debounce.update(true, 0);
        assert!(!debounce.update(false, 400));
        assert!(!debounce.is_pending());
        assert!(!debounce.update(true, 450));
        assert!(!debounce.update(true, 900));
        assert!(debounce.update(true, 950));
    }

    #[test]
    fn reset_discards_pending_condition() {
        let mut debounce = Debouncer::new(500);
        debounce.update(true, 0);
        debounce.reset();
        assert!(!debounce.is_pending());
        // Timer restarts from the next sighting
        assert!(!debounce.update(true, 600));
        assert!(debounce.update(true, 1100));
    }

    #[test]
    fn zero_period_is_immediate() {
        let mut debounce = Debouncer::new(0);
        assert!(debounce.update(true, 7));
    }
}
