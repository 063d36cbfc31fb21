//! Accelerator Normalizer
//!
//! Turns the two redundant pedal percentages into one accelerator value in
//! [0, 1]. The inputs must already be clamped by the pedal monitor; this
//! module checks that contract and fails instead of clamping, so a monitor bug
//! surfaces as a fault rather than a silently plausible command.

use crate::{
    constants::pedal::{PEDAL_PERCENT_MAX, PEDAL_PERCENT_MIN, PERCENT_PER_UNIT},
    errors::{MapError, MapResult},
};

/// One sensor's reading as percent of pedal travel, in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PedalPercent(f32);

impl PedalPercent {
    /// Fully released pedal
    pub const RELEASED: Self = Self(PEDAL_PERCENT_MIN);

    /// Fully pressed pedal
    pub const FULL: Self = Self(PEDAL_PERCENT_MAX);

    /// Check the contractual range and wrap
    ///
    /// NaN and values outside [0, 100] give `OutOfRangeInput`.
    pub fn new(percent: f32) -> MapResult<Self> {
        if (PEDAL_PERCENT_MIN..=PEDAL_PERCENT_MAX).contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(MapError::OutOfRangeInput {
                value: percent,
                min: PEDAL_PERCENT_MIN,
                max: PEDAL_PERCENT_MAX,
            })
        }
    }

    /// Wrap a value the caller has already clamped
    pub(crate) const fn from_clamped(percent: f32) -> Self {
        Self(percent)
    }

    /// Raw percentage
    pub fn get(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for PedalPercent {
    type Error = MapError;

    fn try_from(percent: f32) -> MapResult<Self> {
        Self::new(percent)
    }
}

/// Combined accelerator position in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AcceleratorValue(f32);

impl AcceleratorValue {
    /// Construct from a unit fraction, used by tests and the overlap guard
    pub fn new(value: f32) -> MapResult<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(MapError::OutOfRangeInput { value, min: 0.0, max: 1.0 })
        }
    }

    /// Unit fraction of pedal travel
    pub fn get(self) -> f32 {
        self.0
    }

    /// Same value in percent
    pub fn percent(self) -> f32 {
        self.0 * PERCENT_PER_UNIT
    }
}

/// Average two pedal readings into one accelerator value
pub fn normalize(pedal_a: PedalPercent, pedal_b: PedalPercent) -> AcceleratorValue {
    AcceleratorValue((pedal_a.0 + pedal_b.0) / 2.0 / PERCENT_PER_UNIT)
}

/// Check two raw percentages and average them
///
/// Sensor A is checked first; the error names the first offending value.
pub fn normalize_percent(pedal_a: f32, pedal_b: f32) -> MapResult<AcceleratorValue> {
    let a = PedalPercent::new(pedal_a)?;
    let b = PedalPercent::new(pedal_b)?;
    Ok(normalize(a, b))
}
