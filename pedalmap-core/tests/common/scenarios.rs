//! Reference drive scenarios
//!
//! Each scenario is one cycle input plus the command and fault class the
//! engine must produce for it under [`super::reference_config`].

use pedalmap_core::{CycleInput, MapError, Mode, TorqueCommand};

/// Fault class expected from a scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpectedFault {
    None,
    OutOfRange,
    Plausibility,
}

impl ExpectedFault {
    pub fn matches(&self, fault: Option<MapError>) -> bool {
        match (self, fault) {
            (ExpectedFault::None, None) => true,
            (ExpectedFault::OutOfRange, Some(MapError::OutOfRangeInput { .. })) => true,
            (ExpectedFault::Plausibility, Some(MapError::PlausibilityFault { .. })) => true,
            _ => false,
        }
    }
}

/// One cycle with its expected outcome
pub struct TestScenario {
    pub name: &'static str,
    pub input: CycleInput,
    pub command: TorqueCommand,
    pub mode: Option<Mode>,
    pub fault: ExpectedFault,
}

/// Pre-built scenario definitions
pub struct Scenarios;

impl Scenarios {
    /// Pedal floored
    pub fn full_throttle() -> TestScenario {
        TestScenario {
            name: "full_throttle",
            input: CycleInput::new(100.0, 100.0),
            command: TorqueCommand::Forward(220.0),
            mode: Some(Mode::Forward),
            fault: ExpectedFault::None,
        }
    }

    /// Pedal released
    pub fn full_regen() -> TestScenario {
        TestScenario {
            name: "full_regen",
            input: CycleInput::new(0.0, 0.0),
            command: TorqueCommand::Regen(15.0),
            mode: Some(Mode::Regen),
            fault: ExpectedFault::None,
        }
    }

    /// Pedal resting inside the deadband
    pub fn coast_band() -> TestScenario {
        TestScenario {
            name: "coast_band",
            input: CycleInput::new(22.0, 22.0),
            command: TorqueCommand::Coast,
            mode: Some(Mode::Coast),
            fault: ExpectedFault::None,
        }
    }

    /// Unclamped reading from a broken monitor
    pub fn out_of_range() -> TestScenario {
        TestScenario {
            name: "out_of_range",
            input: CycleInput::new(101.0, 50.0),
            command: TorqueCommand::Coast,
            mode: None,
            fault: ExpectedFault::OutOfRange,
        }
    }

    /// Valid pedals with the monitor's fault flag raised
    pub fn plausibility_fault() -> TestScenario {
        TestScenario {
            name: "plausibility_fault",
            input: CycleInput::new(100.0, 100.0).with_fault(true),
            command: TorqueCommand::Coast,
            mode: None,
            fault: ExpectedFault::Plausibility,
        }
    }

    /// All reference scenarios
    pub fn all() -> [TestScenario; 5] {
        [
            Self::full_throttle(),
            Self::full_regen(),
            Self::coast_band(),
            Self::out_of_range(),
            Self::plausibility_fault(),
        ]
    }
}
