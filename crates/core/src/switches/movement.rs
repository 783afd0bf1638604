//! Movement detector
//!
//! Reports which switch or pot the user just moved, for "assign by moving
//! the switch" capture and the start-up switch warning. Positions are
//! sampled from the raw pins (not the debounced positions) so the answer is
//! immediate.

use super::debounce::multipos_step;
use super::function::{FunctionSwitchConfig, FunctionSwitchKind};
use crate::config::{HardwareConfig, SwitchKind};
use crate::source::{
    SwitchPosition, SwitchSource, NUM_FUNCTION_SWITCHES, NUM_POTS, NUM_REGULAR_SWITCHES,
    NUM_SWITCHES,
};
use crate::traits::{switch_pin, SwitchInputs};

/// History is discarded if the detector is not polled for longer than this
pub const MOVEMENT_IDLE_TICKS: u32 = 10;

/// Instantaneous position of a regular switch
pub fn raw_position<I: SwitchInputs + ?Sized>(
    inputs: &I,
    switch: usize,
    kind: SwitchKind,
) -> Option<SwitchPosition> {
    match kind {
        SwitchKind::None => None,
        _ if inputs.switch_state(switch_pin(switch, SwitchPosition::Up)) => {
            Some(SwitchPosition::Up)
        }
        SwitchKind::ThreePos if !inputs.switch_state(switch_pin(switch, SwitchPosition::Down)) => {
            Some(SwitchPosition::Mid)
        }
        _ => Some(SwitchPosition::Down),
    }
}

/// Cached sample of every switch and multiposition pot
#[derive(Debug, Clone)]
pub struct MovementDetector {
    switches: [Option<SwitchPosition>; NUM_SWITCHES],
    pots: [Option<u8>; NUM_POTS],
    last_poll: Option<u32>,
}

impl MovementDetector {
    /// Empty cache
    pub const fn new() -> Self {
        Self {
            switches: [None; NUM_SWITCHES],
            pots: [None; NUM_POTS],
            last_poll: None,
        }
    }

    /// Cached position of a switch (regular switches first, then function
    /// switches)
    pub fn cached_position(&self, switch: usize) -> Option<SwitchPosition> {
        self.switches.get(switch).copied().flatten()
    }

    /// Cached step of a multiposition pot
    pub fn cached_step(&self, pot: usize) -> Option<u8> {
        self.pots.get(pot).copied().flatten()
    }

    /// Sample everything and report the first source that changed
    ///
    /// The whole cache is refreshed on every call, so a movement is reported
    /// once. Returns [`SwitchSource::NONE`] when nothing moved, and also when
    /// the previous poll is more than [`MOVEMENT_IDLE_TICKS`] old.
    pub fn poll<I: SwitchInputs + ?Sized>(
        &mut self,
        hardware: &HardwareConfig,
        function_switches: &FunctionSwitchConfig,
        inputs: &I,
        now: u32,
    ) -> SwitchSource {
        let mut moved = SwitchSource::NONE;

        for switch in 0..NUM_REGULAR_SWITCHES {
            let Some(next) = raw_position(inputs, switch, hardware.switch_kind(switch)) else {
                continue;
            };
            if self.switches[switch] != Some(next) {
                self.switches[switch] = Some(next);
                if moved.is_none() {
                    moved = SwitchSource::switch(switch as u8, next);
                }
            }
        }

        for index in 0..NUM_FUNCTION_SWITCHES {
            if function_switches.switches[index].kind == FunctionSwitchKind::None {
                continue;
            }
            let next = function_switches.position(index);
            let slot = &mut self.switches[NUM_REGULAR_SWITCHES + index];
            if *slot != Some(next) {
                *slot = Some(next);
                if moved.is_none() {
                    moved = SwitchSource::function_switch(index as u8, next);
                }
            }
        }

        for pot in 0..NUM_POTS {
            let Some(steps) = hardware.multipos_steps(pot) else {
                continue;
            };
            let next = multipos_step(inputs.analog_in(pot), steps);
            if self.pots[pot] != Some(next) {
                self.pots[pot] = Some(next);
                if moved.is_none() {
                    moved = SwitchSource::multipos(pot as u8, next);
                }
            }
        }

        let idle = match self.last_poll {
            Some(last) => now.wrapping_sub(last) > MOVEMENT_IDLE_TICKS,
            None => true,
        };
        self.last_poll = Some(now);

        if idle {
            SwitchSource::NONE
        } else {
            moved
        }
    }
}

impl Default for MovementDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PotKind;
    use crate::traits::MockInputs;

    fn hardware() -> HardwareConfig {
        HardwareConfig::default()
            .with_switch(0, SwitchKind::ThreePos)
            .with_switch(1, SwitchKind::TwoPos)
            .with_pot(2, PotKind::MultiPos { steps: 4 })
    }

    #[test]
    fn first_poll_only_primes_cache() {
        let inputs = MockInputs::new();
        let mut detector = MovementDetector::new();
        let function_switches = FunctionSwitchConfig::default();

        inputs.set_switch(0, SwitchPosition::Up);
        let moved = detector.poll(&hardware(), &function_switches, &inputs, 0);
        assert!(moved.is_none());
        assert_eq!(detector.cached_position(0), Some(SwitchPosition::Up));
        assert_eq!(detector.cached_position(1), Some(SwitchPosition::Down));
        assert_eq!(detector.cached_step(2), Some(0));
    }

    #[test]
    fn reports_movement_once() {
        let inputs = MockInputs::new();
        let mut detector = MovementDetector::new();
        let function_switches = FunctionSwitchConfig::default();
        let hardware = hardware();

        detector.poll(&hardware, &function_switches, &inputs, 0);
        inputs.set_switch(0, SwitchPosition::Down);
        assert_eq!(
            detector.poll(&hardware, &function_switches, &inputs, 1),
            SwitchSource::switch(0, SwitchPosition::Down)
        );
        assert!(detector
            .poll(&hardware, &function_switches, &inputs, 2)
            .is_none());
    }

    #[test]
    fn reports_first_of_several_movements() {
        let inputs = MockInputs::new();
        let mut detector = MovementDetector::new();
        let function_switches = FunctionSwitchConfig::default();
        let hardware = hardware();

        detector.poll(&hardware, &function_switches, &inputs, 0);
        inputs.set_switch(1, SwitchPosition::Up);
        inputs.set_analog(2, 2000);
        assert_eq!(
            detector.poll(&hardware, &function_switches, &inputs, 1),
            SwitchSource::switch(1, SwitchPosition::Up)
        );
        // The pot was cached too
        assert!(detector
            .poll(&hardware, &function_switches, &inputs, 2)
            .is_none());
        assert_eq!(detector.cached_step(2), Some(3));
    }

    #[test]
    fn idle_gap_discards_history() {
        let inputs = MockInputs::new();
        let mut detector = MovementDetector::new();
        let function_switches = FunctionSwitchConfig::default();
        let hardware = hardware();

        detector.poll(&hardware, &function_switches, &inputs, 0);
        inputs.set_switch(0, SwitchPosition::Up);
        assert!(detector
            .poll(&hardware, &function_switches, &inputs, 11)
            .is_none());

        inputs.set_switch(0, SwitchPosition::Down);
        assert_eq!(
            detector.poll(&hardware, &function_switches, &inputs, 21),
            SwitchSource::switch(0, SwitchPosition::Down)
        );
    }

    #[test]
    fn function_switch_follows_logical_state() {
        let inputs = MockInputs::new();
        let mut detector = MovementDetector::new();
        let mut function_switches = FunctionSwitchConfig::default();
        function_switches.switches[1].kind = FunctionSwitchKind::Latching;
        let hardware = HardwareConfig::default();

        detector.poll(&hardware, &function_switches, &inputs, 0);
        function_switches.set_on(1, true);
        assert_eq!(
            detector.poll(&hardware, &function_switches, &inputs, 1),
            SwitchSource::function_switch(1, SwitchPosition::Down)
        );
        assert_eq!(
            detector.cached_position(NUM_REGULAR_SWITCHES + 1),
            Some(SwitchPosition::Down)
        );
    }

    #[test]
    fn raw_position_by_kind() {
        let inputs = MockInputs::new();
        assert_eq!(raw_position(&inputs, 0, SwitchKind::None), None);
        assert_eq!(
            raw_position(&inputs, 0, SwitchKind::TwoPos),
            Some(SwitchPosition::Down)
        );
        assert_eq!(
            raw_position(&inputs, 0, SwitchKind::ThreePos),
            Some(SwitchPosition::Mid)
        );
        inputs.set_switch(0, SwitchPosition::Up);
        assert_eq!(
            raw_position(&inputs, 0, SwitchKind::ThreePos),
            Some(SwitchPosition::Up)
        );
    }
}
