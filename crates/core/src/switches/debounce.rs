//! Switch position debouncer
//!
//! Turns raw pin levels into committed positions:
//!
//! - 2-position switches follow their up pin with no delay.
//! - 3-position switches commit an end position immediately. The middle
//!   (neither end pin active) is also what a switch reports while travelling
//!   between ends, so it is only committed once it has been held for the
//!   configured delay.
//! - Multiposition pots commit a new step once it has been stable for the
//!   same delay.
//!
//! Every committed change raises exactly one `switch_moved` notification.

use crate::config::{HardwareConfig, SwitchKind};
use crate::parameters::SwitchDelay;
use crate::source::{SwitchPosition, SwitchSource, NUM_POTS, NUM_REGULAR_SWITCHES};
use crate::traits::{switch_pin, SwitchEvents, SwitchInputs, ANALOG_FULL_SCALE};

/// Debounce state of one multiposition pot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MultiposState {
    /// Last committed step
    pub reported: Option<u8>,
    /// Last sampled step
    pub candidate: Option<u8>,
    /// Tick the candidate was first seen
    pub pending_since: Option<u32>,
}

/// Step of a multiposition pot for a calibrated analog value
pub fn multipos_step(raw: i32, steps: u8) -> u8 {
    let steps = steps.max(1) as i32;
    let width = (ANALOG_FULL_SCALE / steps).max(1);
    (raw.max(0) / width).min(steps - 1) as u8
}

/// Committed positions of all regular switches and multiposition pots
#[derive(Debug, Clone)]
pub struct SwitchDebouncer {
    positions: [Option<SwitchPosition>; NUM_REGULAR_SWITCHES],
    mid_pending_since: [Option<u32>; NUM_REGULAR_SWITCHES],
    pots: [MultiposState; NUM_POTS],
}

impl SwitchDebouncer {
    /// Nothing committed yet
    pub const fn new() -> Self {
        Self {
            positions: [None; NUM_REGULAR_SWITCHES],
            mid_pending_since: [None; NUM_REGULAR_SWITCHES],
            pots: [MultiposState {
                reported: None,
                candidate: None,
                pending_since: None,
            }; NUM_POTS],
        }
    }

    /// Committed position of a regular switch
    pub fn position(&self, switch: usize) -> Option<SwitchPosition> {
        self.positions.get(switch).copied().flatten()
    }

    /// Check if a regular switch is committed in a position
    pub fn is_position(&self, switch: usize, position: SwitchPosition) -> bool {
        self.position(switch) == Some(position)
    }

    /// Committed step of a multiposition pot
    pub fn multipos(&self, pot: usize) -> Option<u8> {
        self.pots.get(pot).and_then(|state| state.reported)
    }

    /// Debounce state of a multiposition pot
    pub fn multipos_state(&self, pot: usize) -> Option<&MultiposState> {
        self.pots.get(pot)
    }

    /// Sample every fitted switch and multiposition pot
    ///
    /// `startup` commits every position immediately.
    pub fn update<I: SwitchInputs + ?Sized>(
        &mut self,
        hardware: &HardwareConfig,
        inputs: &I,
        now: u32,
        delay: SwitchDelay,
        startup: bool,
        events: &mut dyn SwitchEvents,
    ) {
        for switch in 0..NUM_REGULAR_SWITCHES {
            match hardware.switch_kind(switch) {
                SwitchKind::None => {}
                SwitchKind::TwoPos => {
                    self.check_two_pos(switch, inputs, events);
                }
                SwitchKind::ThreePos => {
                    self.check_three_pos(switch, inputs, now, delay, startup, events);
                }
            }
        }

        for pot in 0..NUM_POTS {
            if let Some(steps) = hardware.multipos_steps(pot) {
                let raw = inputs.analog_in(pot);
                self.check_multipos(pot, raw, steps, now, delay, startup, events);
            }
        }
    }

    /// Commit the instantaneous position of a 2-position switch
    pub fn check_two_pos<I: SwitchInputs + ?Sized>(
        &mut self,
        switch: usize,
        inputs: &I,
        events: &mut dyn SwitchEvents,
    ) -> SwitchPosition {
        let position = if inputs.switch_state(switch_pin(switch, SwitchPosition::Up)) {
            SwitchPosition::Up
        } else {
            SwitchPosition::Down
        };
        self.commit(switch, Some(position), events);
        position
    }

    /// Debounce a 3-position switch
    ///
    /// Returns the committed position, which lags the pins while the middle
    /// is being held.
    pub fn check_three_pos<I: SwitchInputs + ?Sized>(
        &mut self,
        switch: usize,
        inputs: &I,
        now: u32,
        delay: SwitchDelay,
        startup: bool,
        events: &mut dyn SwitchEvents,
    ) -> Option<SwitchPosition> {
        if switch >= NUM_REGULAR_SWITCHES {
            return None;
        }

        let committed = if inputs.switch_state(switch_pin(switch, SwitchPosition::Up)) {
            self.mid_pending_since[switch] = None;
            Some(SwitchPosition::Up)
        } else if inputs.switch_state(switch_pin(switch, SwitchPosition::Down)) {
            self.mid_pending_since[switch] = None;
            Some(SwitchPosition::Down)
        } else {
            let held = match self.mid_pending_since[switch] {
                Some(since) => delay.has_elapsed(now.wrapping_sub(since)),
                None => false,
            };
            if startup
                || self.positions[switch] == Some(SwitchPosition::Mid)
                || delay == SwitchDelay::None
                || held
            {
                self.mid_pending_since[switch] = None;
                Some(SwitchPosition::Mid)
            } else {
                if self.mid_pending_since[switch].is_none() {
                    self.mid_pending_since[switch] = Some(now);
                }
                self.positions[switch]
            }
        };

        self.commit(switch, committed, events);
        committed
    }

    /// Debounce a multiposition pot
    ///
    /// Returns the committed step.
    #[allow(clippy::too_many_arguments)]
    pub fn check_multipos(
        &mut self,
        pot: usize,
        raw: i32,
        steps: u8,
        now: u32,
        delay: SwitchDelay,
        startup: bool,
        events: &mut dyn SwitchEvents,
    ) -> Option<u8> {
        let state = self.pots.get_mut(pot)?;
        let step = multipos_step(raw, steps);

        if startup {
            *state = MultiposState {
                reported: Some(step),
                candidate: Some(step),
                pending_since: None,
            };
        } else if state.candidate != Some(step) {
            state.candidate = Some(step);
            state.pending_since = Some(now);
        } else {
            let stable = match state.pending_since {
                Some(since) => delay.has_elapsed(now.wrapping_sub(since)),
                None => true,
            };
            if stable {
                state.pending_since = None;
                let previous = state.reported.replace(step);
                if previous != Some(step) {
                    events.switch_moved(SwitchSource::multipos(pot as u8, step));
                }
            }
        }

        state.reported
    }

    fn commit(
        &mut self,
        switch: usize,
        position: Option<SwitchPosition>,
        events: &mut dyn SwitchEvents,
    ) {
        let Some(slot) = self.positions.get_mut(switch) else {
            return;
        };
        if *slot == position {
            return;
        }
        *slot = position;
        if let Some(position) = position {
            events.switch_moved(SwitchSource::switch(switch as u8, position));
        }
    }
}

impl Default for SwitchDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PotKind;
    use crate::traits::{MockInputs, RecordingEvents, SwitchEvent};

    const DELAY: SwitchDelay = SwitchDelay::Ticks(15);

    fn hardware() -> HardwareConfig {
        HardwareConfig::default()
            .with_switch(0, SwitchKind::ThreePos)
            .with_switch(1, SwitchKind::TwoPos)
            .with_pot(0, PotKind::MultiPos { steps: 6 })
    }

    #[test]
    fn two_pos_follows_pin() {
        let inputs = MockInputs::new();
        let mut events = RecordingEvents::new();
        let mut debouncer = SwitchDebouncer::new();

        inputs.set_switch(1, SwitchPosition::Up);
        assert_eq!(
            debouncer.check_two_pos(1, &inputs, &mut events),
            SwitchPosition::Up
        );
        inputs.set_switch(1, SwitchPosition::Down);
        assert_eq!(
            debouncer.check_two_pos(1, &inputs, &mut events),
            SwitchPosition::Down
        );
        debouncer.check_two_pos(1, &inputs, &mut events);

        assert_eq!(events.moved_count(), 2);
    }

    #[test]
    fn three_pos_end_positions_commit_immediately() {
        let inputs = MockInputs::new();
        let mut events = RecordingEvents::new();
        let mut debouncer = SwitchDebouncer::new();

        inputs.set_switch(0, SwitchPosition::Down);
        let position = debouncer.check_three_pos(0, &inputs, 100, DELAY, false, &mut events);
        assert_eq!(position, Some(SwitchPosition::Down));
        assert!(events.contains(SwitchEvent::Moved(SwitchSource::switch(
            0,
            SwitchPosition::Down
        ))));
    }

    #[test]
    fn three_pos_mid_waits_for_delay() {
        let inputs = MockInputs::new();
        let mut events = RecordingEvents::new();
        let mut debouncer = SwitchDebouncer::new();

        inputs.set_switch(0, SwitchPosition::Up);
        debouncer.check_three_pos(0, &inputs, 0, DELAY, false, &mut events);

        inputs.set_switch(0, SwitchPosition::Mid);
        for now in 1..16 {
            let position = debouncer.check_three_pos(0, &inputs, now, DELAY, false, &mut events);
            assert_eq!(position, Some(SwitchPosition::Up), "tick {}", now);
        }
        let position = debouncer.check_three_pos(0, &inputs, 16, DELAY, false, &mut events);
        assert_eq!(position, Some(SwitchPosition::Mid));
        assert_eq!(events.moved_count(), 2);
    }

    #[test]
    fn three_pos_travel_through_mid_is_not_reported() {
        let inputs = MockInputs::new();
        let mut events = RecordingEvents::new();
        let mut debouncer = SwitchDebouncer::new();

        inputs.set_switch(0, SwitchPosition::Up);
        debouncer.check_three_pos(0, &inputs, 0, DELAY, false, &mut events);
        inputs.set_switch(0, SwitchPosition::Mid);
        debouncer.check_three_pos(0, &inputs, 1, DELAY, false, &mut events);
        inputs.set_switch(0, SwitchPosition::Down);
        debouncer.check_three_pos(0, &inputs, 2, DELAY, false, &mut events);

        assert!(!events.contains(SwitchEvent::Moved(SwitchSource::switch(
            0,
            SwitchPosition::Mid
        ))));
        assert_eq!(debouncer.position(0), Some(SwitchPosition::Down));
    }

    #[test]
    fn three_pos_mid_without_delay_or_on_startup() {
        let inputs = MockInputs::new();
        let mut events = RecordingEvents::new();
        let mut debouncer = SwitchDebouncer::new();

        inputs.set_switch(0, SwitchPosition::Mid);
        let position = debouncer.check_three_pos(0, &inputs, 0, DELAY, true, &mut events);
        assert_eq!(position, Some(SwitchPosition::Mid));

        let mut debouncer = SwitchDebouncer::new();
        inputs.set_switch(0, SwitchPosition::Up);
        debouncer.check_three_pos(0, &inputs, 0, SwitchDelay::None, false, &mut events);
        inputs.set_switch(0, SwitchPosition::Mid);
        let position = debouncer.check_three_pos(0, &inputs, 1, SwitchDelay::None, false, &mut events);
        assert_eq!(position, Some(SwitchPosition::Mid));
    }

    #[test]
    fn multipos_commits_after_stable_delay() {
        let mut events = RecordingEvents::new();
        let mut debouncer = SwitchDebouncer::new();

        // 6 steps over 0..=2048: 341 per step
        debouncer.check_multipos(0, 0, 6, 0, DELAY, true, &mut events);
        assert_eq!(debouncer.multipos(0), Some(0));

        debouncer.check_multipos(0, 700, 6, 10, DELAY, false, &mut events);
        assert_eq!(debouncer.multipos(0), Some(0));
        debouncer.check_multipos(0, 700, 6, 20, DELAY, false, &mut events);
        assert_eq!(debouncer.multipos(0), Some(0));
        debouncer.check_multipos(0, 700, 6, 25, DELAY, false, &mut events);
        assert_eq!(debouncer.multipos(0), Some(2));

        assert_eq!(
            events.events(),
            &[SwitchEvent::Moved(SwitchSource::multipos(0, 2))]
        );
    }

    #[test]
    fn multipos_restarts_timer_on_change() {
        let mut events = RecordingEvents::new();
        let mut debouncer = SwitchDebouncer::new();

        debouncer.check_multipos(0, 0, 6, 0, DELAY, true, &mut events);
        debouncer.check_multipos(0, 700, 6, 10, DELAY, false, &mut events);
        debouncer.check_multipos(0, 1100, 6, 20, DELAY, false, &mut events);
        debouncer.check_multipos(0, 1100, 6, 30, DELAY, false, &mut events);
        assert_eq!(debouncer.multipos(0), Some(0));
        debouncer.check_multipos(0, 1100, 6, 35, DELAY, false, &mut events);
        assert_eq!(debouncer.multipos(0), Some(3));
    }

    #[test]
    fn multipos_step_is_clamped() {
        assert_eq!(multipos_step(2048, 6), 5);
        assert_eq!(multipos_step(-5, 6), 0);
        assert_eq!(multipos_step(1024, 2), 1);
        assert_eq!(multipos_step(1023, 2), 0);
    }

    #[test]
    fn update_skips_unfitted_hardware() {
        let inputs = MockInputs::new();
        let mut events = RecordingEvents::new();
        let mut debouncer = SwitchDebouncer::new();

        inputs.set_switch(0, SwitchPosition::Down);
        inputs.set_switch(2, SwitchPosition::Up);
        inputs.set_analog(0, 2048);
        debouncer.update(&hardware(), &inputs, 0, DELAY, true, &mut events);

        assert_eq!(debouncer.position(0), Some(SwitchPosition::Down));
        assert_eq!(debouncer.position(1), Some(SwitchPosition::Down));
        assert_eq!(debouncer.position(2), None);
        assert_eq!(debouncer.multipos(0), Some(5));
        assert_eq!(debouncer.multipos(1), None);
    }
}
