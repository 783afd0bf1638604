//! Raw switch and pot inputs
//!
//! Pin layout: every physical switch owns three consecutive pins,
//! `3 * switch + position` (up, mid, down). A 2-position switch only wires
//! its up pin; a 3-position switch wires up and down and is in the middle
//! while neither is active. Function switches follow the regular switches
//! and report presses on their down pin.

use crate::source::{SwitchPosition, NUM_POTS, NUM_SWITCHES};
use core::cell::Cell;

/// Number of switch pins
pub const NUM_SWITCH_PINS: usize = NUM_SWITCHES * 3;

/// Full analog scale (calibrated pot values span `-RESX..=RESX`, sampled
/// as `0..=2 * RESX` for step computation)
pub const ANALOG_FULL_SCALE: i32 = 2048;

/// Pin index of a switch position
pub const fn switch_pin(switch: usize, position: SwitchPosition) -> usize {
    switch * 3 + position as usize
}

/// Instantaneous hardware levels
pub trait SwitchInputs {
    /// Level of a switch pin (`true` = active)
    fn switch_state(&self, pin: usize) -> bool;

    /// Calibrated pot position, `0..=ANALOG_FULL_SCALE`
    fn analog_in(&self, pot: usize) -> i32;
}

impl<T: SwitchInputs + ?Sized> SwitchInputs for &T {
    fn switch_state(&self, pin: usize) -> bool {
        (**self).switch_state(pin)
    }

    fn analog_in(&self, pot: usize) -> i32 {
        (**self).analog_in(pot)
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Scripted pins and pots
///
/// Interior mutability lets tests move switches while the engine holds a
/// shared reference.
pub struct MockInputs {
    pins: [Cell<bool>; NUM_SWITCH_PINS],
    analog: [Cell<i32>; NUM_POTS],
}

impl MockInputs {
    /// All pins released, all pots at zero
    pub fn new() -> Self {
        Self {
            pins: [const { Cell::new(false) }; NUM_SWITCH_PINS],
            analog: [const { Cell::new(0) }; NUM_POTS],
        }
    }

    /// Set a raw pin level
    pub fn set_pin(&self, pin: usize, active: bool) {
        if let Some(cell) = self.pins.get(pin) {
            cell.set(active);
        }
    }

    /// Move a switch to a position (activates only that position's pin)
    ///
    /// `Mid` releases both end pins, which is how a 3-position switch reports
    /// the middle; the mid pin itself is never wired.
    pub fn set_switch(&self, switch: usize, position: SwitchPosition) {
        self.set_pin(switch_pin(switch, SwitchPosition::Up), position == SwitchPosition::Up);
        self.set_pin(switch_pin(switch, SwitchPosition::Mid), false);
        self.set_pin(
            switch_pin(switch, SwitchPosition::Down),
            position == SwitchPosition::Down,
        );
    }

    /// Set a pot position
    pub fn set_analog(&self, pot: usize, value: i32) {
        if let Some(cell) = self.analog.get(pot) {
            cell.set(value);
        }
    }
}

impl Default for MockInputs {
    fn default() -> Self {
        Self::new()
    }
}

impl SwitchInputs for MockInputs {
    fn switch_state(&self, pin: usize) -> bool {
        self.pins.get(pin).map(Cell::get).unwrap_or(false)
    }

    fn analog_in(&self, pot: usize) -> i32 {
        self.analog.get(pot).map(Cell::get).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_switch_drives_end_pins() {
        let inputs = MockInputs::new();
        inputs.set_switch(2, SwitchPosition::Down);
        assert!(inputs.switch_state(8));
        assert!(!inputs.switch_state(6));

        inputs.set_switch(2, SwitchPosition::Mid);
        assert!(!inputs.switch_state(6));
        assert!(!inputs.switch_state(7));
        assert!(!inputs.switch_state(8));
    }

    #[test]
    fn out_of_range_reads_inactive() {
        let inputs = MockInputs::new();
        inputs.set_pin(NUM_SWITCH_PINS, true);
        assert!(!inputs.switch_state(NUM_SWITCH_PINS));
        assert_eq!(inputs.analog_in(NUM_POTS), 0);
    }
}
