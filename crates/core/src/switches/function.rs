//! Function switches
//!
//! Customizable push buttons placed after the regular switches. Each one
//! owns a logical on/off bit stored in the model; the button only toggles
//! (or sets) that bit. Buttons may be grouped so that pressing one clears
//! the others in its group, radio-button style.
//!
//! Source resolution: the "up" id is true while the logical bit is off, the
//! "down" id while it is on, and the "mid" id never.

use crate::source::{SwitchPosition, NUM_FUNCTION_SWITCHES, NUM_REGULAR_SWITCHES};
use crate::traits::{switch_pin, SwitchEvents, SwitchInputs};

/// Highest group number (0 = not grouped)
pub const MAX_FUNCTION_SWITCH_GROUP: u8 = 3;

/// Button behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FunctionSwitchKind {
    /// Not used
    #[default]
    None,
    /// Toggles on each press
    Latching,
    /// Toggles on every press and release
    Momentary,
}

/// Logical state applied when the model is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartPosition {
    /// Start off
    Off,
    /// Start on
    On,
    /// Keep the saved state
    #[default]
    Previous,
}

/// Configuration of one function switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FunctionSwitch {
    /// Button behavior
    pub kind: FunctionSwitchKind,
    /// Group (0 = none, 1..=3)
    pub group: u8,
    /// State applied on model load
    pub start: StartPosition,
}

/// Model-side function switch configuration and persisted state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FunctionSwitchConfig {
    /// Per-switch configuration
    pub switches: [FunctionSwitch; NUM_FUNCTION_SWITCHES],
    /// Bit `g` set: group `g` always has one member on
    pub always_on_groups: u8,
    /// Logical state, one bit per switch
    pub logical_state: u8,
}

impl FunctionSwitch {
    /// Unused switch
    pub const NONE: Self = Self {
        kind: FunctionSwitchKind::None,
        group: 0,
        start: StartPosition::Previous,
    };
}

impl FunctionSwitchConfig {
    /// Every switch unused and off
    pub const fn new() -> Self {
        Self {
            switches: [FunctionSwitch::NONE; NUM_FUNCTION_SWITCHES],
            always_on_groups: 0,
            logical_state: 0,
        }
    }

    /// Logical state of a function switch (false when out of range)
    pub fn is_on(&self, index: usize) -> bool {
        index < NUM_FUNCTION_SWITCHES && self.logical_state & (1 << index) != 0
    }

    /// Set the logical state of a function switch
    pub fn set_on(&mut self, index: usize, on: bool) {
        if index >= NUM_FUNCTION_SWITCHES {
            return;
        }
        if on {
            self.logical_state |= 1 << index;
        } else {
            self.logical_state &= !(1 << index);
        }
    }

    /// Check if a group keeps one member on at all times
    pub fn is_group_always_on(&self, group: u8) -> bool {
        group != 0 && group <= MAX_FUNCTION_SWITCH_GROUP && self.always_on_groups & (1 << group) != 0
    }

    /// Position reported for a function switch
    pub fn position(&self, index: usize) -> SwitchPosition {
        if self.is_on(index) {
            SwitchPosition::Down
        } else {
            SwitchPosition::Up
        }
    }

    /// Resolve a function switch source id
    pub fn resolve(&self, index: usize, position: SwitchPosition) -> bool {
        match position {
            SwitchPosition::Up => !self.is_on(index),
            SwitchPosition::Mid => false,
            SwitchPosition::Down => self.is_on(index),
        }
    }

    /// Apply each switch's start position (on model load)
    pub fn apply_start_positions(&mut self) {
        for index in 0..NUM_FUNCTION_SWITCHES {
            match self.switches[index].start {
                StartPosition::Off => self.set_on(index, false),
                StartPosition::On => self.set_on(index, true),
                StartPosition::Previous => {}
            }
        }
    }
}

/// Physical button tracking
///
/// Only the previous physical level lives here; the logical state belongs
/// to the model.
#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionSwitches {
    previous_physical: u8,
}

impl FunctionSwitches {
    /// All buttons released
    pub const fn new() -> Self {
        Self {
            previous_physical: 0,
        }
    }

    /// Button currently pressed
    pub fn is_pressed<I: SwitchInputs + ?Sized>(inputs: &I, index: usize) -> bool {
        inputs.switch_state(switch_pin(NUM_REGULAR_SWITCHES + index, SwitchPosition::Down))
    }

    /// Process button edges and refresh LEDs
    ///
    /// Returns a bitmask of switches whose button edge changed the model.
    pub fn evaluate<I: SwitchInputs + ?Sized>(
        &mut self,
        config: &mut FunctionSwitchConfig,
        inputs: &I,
        events: &mut dyn SwitchEvents,
    ) -> u8 {
        let mut toggled = 0u8;

        for index in 0..NUM_FUNCTION_SWITCHES {
            let switch = config.switches[index];
            if switch.kind == FunctionSwitchKind::None {
                events.function_switch_led(index as u8, false);
                continue;
            }

            let pressed = Self::is_pressed(inputs, index);
            let was_pressed = self.previous_physical & (1 << index) != 0;
            if pressed != was_pressed {
                let acts = match switch.kind {
                    FunctionSwitchKind::Latching => pressed,
                    FunctionSwitchKind::Momentary => true,
                    FunctionSwitchKind::None => false,
                };
                if acts {
                    if config.is_group_always_on(switch.group) {
                        config.set_on(index, true);
                    } else {
                        config.set_on(index, !config.is_on(index));
                    }
                }

                if switch.group != 0 && pressed {
                    for other in 0..NUM_FUNCTION_SWITCHES {
                        if other != index && config.switches[other].group == switch.group {
                            config.set_on(other, false);
                        }
                    }
                }

                self.previous_physical ^= 1 << index;
                toggled |= 1 << index;
                events.model_dirty();
            }

            events.function_switch_led(index as u8, config.is_on(index));
        }

        toggled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockInputs, RecordingEvents, SwitchEvent};

    fn config(kinds: [(FunctionSwitchKind, u8); 3]) -> FunctionSwitchConfig {
        let mut config = FunctionSwitchConfig::default();
        for (index, (kind, group)) in kinds.iter().enumerate() {
            config.switches[index] = FunctionSwitch {
                kind: *kind,
                group: *group,
                start: StartPosition::Previous,
            };
        }
        config
    }

    fn press(inputs: &MockInputs, index: usize, pressed: bool) {
        inputs.set_pin(
            switch_pin(NUM_REGULAR_SWITCHES + index, SwitchPosition::Down),
            pressed,
        );
    }

    #[test]
    fn latching_toggles_on_press_only() {
        let inputs = MockInputs::new();
        let mut events = RecordingEvents::new();
        let mut switches = FunctionSwitches::new();
        let mut config = config([
            (FunctionSwitchKind::Latching, 0),
            (FunctionSwitchKind::None, 0),
            (FunctionSwitchKind::None, 0),
        ]);

        press(&inputs, 0, true);
        switches.evaluate(&mut config, &inputs, &mut events);
        assert!(config.is_on(0));
        assert_eq!(events.leds[0], Some(true));

        press(&inputs, 0, false);
        switches.evaluate(&mut config, &inputs, &mut events);
        assert!(config.is_on(0));

        press(&inputs, 0, true);
        switches.evaluate(&mut config, &inputs, &mut events);
        assert!(!config.is_on(0));
        assert_eq!(events.leds[0], Some(false));
        assert_eq!(events.leds[1], Some(false));
    }

    #[test]
    fn momentary_toggles_on_every_edge() {
        let inputs = MockInputs::new();
        let mut events = RecordingEvents::new();
        let mut switches = FunctionSwitches::new();
        let mut config = config([
            (FunctionSwitchKind::Momentary, 0),
            (FunctionSwitchKind::None, 0),
            (FunctionSwitchKind::None, 0),
        ]);

        press(&inputs, 0, true);
        switches.evaluate(&mut config, &inputs, &mut events);
        assert!(config.is_on(0));

        press(&inputs, 0, false);
        switches.evaluate(&mut config, &inputs, &mut events);
        assert!(!config.is_on(0));
        assert_eq!(
            events
                .events()
                .iter()
                .filter(|e| **e == SwitchEvent::ModelDirty)
                .count(),
            2
        );
    }

    #[test]
    fn group_press_clears_other_members() {
        let inputs = MockInputs::new();
        let mut events = RecordingEvents::new();
        let mut switches = FunctionSwitches::new();
        let mut config = config([
            (FunctionSwitchKind::Latching, 1),
            (FunctionSwitchKind::Latching, 1),
            (FunctionSwitchKind::Latching, 2),
        ]);
        config.set_on(0, true);
        config.set_on(2, true);

        press(&inputs, 1, true);
        switches.evaluate(&mut config, &inputs, &mut events);

        assert!(!config.is_on(0));
        assert!(config.is_on(1));
        assert!(config.is_on(2));
    }

    #[test]
    fn always_on_group_sets_instead_of_toggling() {
        let inputs = MockInputs::new();
        let mut events = RecordingEvents::new();
        let mut switches = FunctionSwitches::new();
        let mut config = config([
            (FunctionSwitchKind::Latching, 1),
            (FunctionSwitchKind::Latching, 1),
            (FunctionSwitchKind::None, 0),
        ]);
        config.always_on_groups = 1 << 1;
        config.set_on(0, true);

        press(&inputs, 0, true);
        switches.evaluate(&mut config, &inputs, &mut events);
        assert!(config.is_on(0));
        assert!(!config.is_on(1));
    }

    #[test]
    fn start_positions() {
        let mut config = FunctionSwitchConfig::default();
        config.switches[0].start = StartPosition::On;
        config.switches[1].start = StartPosition::Off;
        config.switches[2].start = StartPosition::Previous;
        config.logical_state = 0b110;

        config.apply_start_positions();
        assert!(config.is_on(0));
        assert!(!config.is_on(1));
        assert!(config.is_on(2));
    }

    #[test]
    fn resolve_positions() {
        let mut config = FunctionSwitchConfig::default();
        assert!(config.resolve(3, SwitchPosition::Up));
        assert!(!config.resolve(3, SwitchPosition::Down));
        config.set_on(3, true);
        assert!(!config.resolve(3, SwitchPosition::Up));
        assert!(config.resolve(3, SwitchPosition::Down));
        assert!(!config.resolve(3, SwitchPosition::Mid));
        assert_eq!(config.position(3), SwitchPosition::Down);
    }
}
