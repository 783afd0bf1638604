//! Movement capture and start-up switch warning

use super::engine::SwitchEngine;
use bitflags::bitflags;
use txswitch_core::config::SwitchKind;
use txswitch_core::source::{SwitchSource, NUM_POTS, NUM_REGULAR_SWITCHES, NUM_SWITCHES};
use txswitch_core::switches::FunctionSwitchKind;
use txswitch_core::traits::{SwitchInputs, TickSource};

bitflags! {
    /// Pots out of their expected start-up position
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PotMask: u16 {
        const POT1 = 1 << 0;
        const POT2 = 1 << 1;
        const POT3 = 1 << 2;
        const POT4 = 1 << 3;
    }
}

impl PotMask {
    /// Flag of a single pot, empty past the last pot
    pub fn pot(index: usize) -> Self {
        if index < NUM_POTS {
            Self::from_bits_truncate(1 << index)
        } else {
            Self::empty()
        }
    }
}

/// Low-resolution pot position used by the start-up warning
fn lowres_position(raw: i32) -> i32 {
    raw >> 4
}

impl<I: SwitchInputs, T: TickSource> SwitchEngine<'_, I, T> {
    /// Report the switch or multiposition pot that just moved
    ///
    /// Returns [`SwitchSource::NONE`] when nothing moved since the previous
    /// call, or when the previous call is more than
    /// [`MOVEMENT_IDLE_TICKS`](txswitch_core::switches::MOVEMENT_IDLE_TICKS)
    /// old.
    pub fn get_moved_switch(&mut self) -> SwitchSource {
        let now = self.ticks.now_10ms();
        self.movement.poll(
            &self.hardware,
            &self.model.function_switches,
            &self.inputs,
            now,
        )
    }

    /// Check the model's start-up switch and pot positions
    ///
    /// Refreshes the movement cache, then compares every checked switch with
    /// its expected position. With the pot warning enabled, `bad_pots` is
    /// rewritten with the enabled pots more than one low-resolution step
    /// away from their expected position.
    pub fn is_switch_warning_required(&mut self, bad_pots: &mut PotMask) -> bool {
        self.get_moved_switch();

        let warning = self.model.warning;
        let mut warn = false;

        for switch in 0..NUM_SWITCHES {
            if !self.is_switch_fitted(switch) {
                continue;
            }
            if let Some(expected) = warning.switches[switch] {
                if self.movement.cached_position(switch) != Some(expected) {
                    warn = true;
                }
            }
        }

        if warning.pots_enabled {
            *bad_pots = PotMask::empty();
            for pot in 0..NUM_POTS {
                if !self.hardware.is_pot_available(pot) || warning.pot_mask & (1 << pot) == 0 {
                    continue;
                }
                let current = lowres_position(self.inputs.analog_in(pot));
                let expected = warning.pot_positions[pot] as i32;
                if (expected - current).abs() > 1 {
                    warn = true;
                    bad_pots.insert(PotMask::pot(pot));
                }
            }
        }

        if warn {
            crate::log_warn!("Switch warning: pots={}", bad_pots.bits());
        }
        warn
    }

    /// Regular switch present on the radio, or function switch in use
    fn is_switch_fitted(&self, switch: usize) -> bool {
        if switch < NUM_REGULAR_SWITCHES {
            self.hardware.switch_kind(switch) != SwitchKind::None
        } else {
            self.model
                .function_switches
                .switches
                .get(switch - NUM_REGULAR_SWITCHES)
                .is_some_and(|function| function.kind != FunctionSwitchKind::None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use txswitch_core::config::{HardwareConfig, ModelSwitches, PotKind, SwitchKind};
    use txswitch_core::mailbox::StickyMailbox;
    use txswitch_core::parameters::SwitchParams;
    use txswitch_core::source::SwitchPosition;
    use txswitch_core::traits::{MockInputs, MockTicks};

    #[test]
    fn pot_mask_bits() {
        let mut mask = PotMask::empty();
        mask.insert(PotMask::pot(2));
        mask.insert(PotMask::pot(40));
        assert_eq!(mask, PotMask::POT3);
        assert!(!mask.contains(PotMask::POT2));
        assert_eq!(mask.bits(), 0b100);
        assert!(PotMask::pot(NUM_POTS).is_empty());
    }

    #[test]
    fn warns_on_unexpected_switch_position() {
        let inputs = MockInputs::new();
        let ticks = MockTicks::new();
        let mut mailbox = StickyMailbox::new();
        let (_, consumer) = mailbox.split();
        let mut model = ModelSwitches::default();
        model.warning.switches[0] = Some(SwitchPosition::Up);
        let hardware = HardwareConfig::default().with_switch(0, SwitchKind::ThreePos);
        let mut engine = SwitchEngine::new(
            &inputs,
            &ticks,
            SwitchParams::default(),
            hardware,
            model,
            consumer,
        )
        .unwrap();
        let mut bad_pots = PotMask::empty();

        inputs.set_switch(0, SwitchPosition::Down);
        assert!(engine.is_switch_warning_required(&mut bad_pots));

        inputs.set_switch(0, SwitchPosition::Up);
        ticks.advance(1);
        assert!(!engine.is_switch_warning_required(&mut bad_pots));
        assert!(bad_pots.is_empty());
    }

    #[test]
    fn flags_pots_away_from_expected_position() {
        let inputs = MockInputs::new();
        let ticks = MockTicks::new();
        let mut mailbox = StickyMailbox::new();
        let (_, consumer) = mailbox.split();
        let mut model = ModelSwitches::default();
        model.warning.pots_enabled = true;
        model.warning.pot_mask = 0b0111;
        model.warning.pot_positions = [64, 64, 64, 64];
        let hardware = HardwareConfig::default()
            .with_pot(0, PotKind::Pot)
            .with_pot(1, PotKind::Slider)
            .with_pot(3, PotKind::Pot);
        let mut engine = SwitchEngine::new(
            &inputs,
            &ticks,
            SwitchParams::default(),
            hardware,
            model,
            consumer,
        )
        .unwrap();
        let mut bad_pots = PotMask::empty();
        bad_pots.insert(PotMask::POT4);

        // 64 << 4 = 1024; one low-resolution step of slack
        inputs.set_analog(0, 1024 + 16);
        inputs.set_analog(1, 1024 + 32);
        inputs.set_analog(3, 0);

        assert!(engine.is_switch_warning_required(&mut bad_pots));
        assert!(!bad_pots.contains(PotMask::POT1));
        assert!(bad_pots.contains(PotMask::POT2));
        // Pot 2 is not fitted, pot 3 is not enabled
        assert!(!bad_pots.contains(PotMask::POT3));
        assert!(!bad_pots.contains(PotMask::POT4));
    }

    #[test]
    fn ignores_expectation_on_missing_switch() {
        let inputs = MockInputs::new();
        let ticks = MockTicks::new();
        let mut mailbox = StickyMailbox::new();
        let (_, consumer) = mailbox.split();
        let mut model = ModelSwitches::default();
        model.warning.switches[1] = Some(SwitchPosition::Up);
        let hardware = HardwareConfig::default().with_switch(0, SwitchKind::ThreePos);
        let mut engine = SwitchEngine::new(
            &inputs,
            &ticks,
            SwitchParams::default(),
            hardware,
            model,
            consumer,
        )
        .unwrap();
        let mut bad_pots = PotMask::empty();

        for _ in 0..3 {
            assert!(!engine.is_switch_warning_required(&mut bad_pots));
            ticks.advance(1);
        }
    }

    #[test]
    fn ignores_expectation_on_unused_function_switch() {
        let inputs = MockInputs::new();
        let ticks = MockTicks::new();
        let mut mailbox = StickyMailbox::new();
        let (_, consumer) = mailbox.split();
        let mut model = ModelSwitches::default();
        model.warning.switches[NUM_REGULAR_SWITCHES] = Some(SwitchPosition::Down);
        let mut engine = SwitchEngine::new(
            &inputs,
            &ticks,
            SwitchParams::default(),
            HardwareConfig::default(),
            model,
            consumer,
        )
        .unwrap();
        let mut bad_pots = PotMask::empty();

        assert!(!engine.is_switch_warning_required(&mut bad_pots));
    }

    #[test]
    fn warns_on_function_switch_in_use() {
        let inputs = MockInputs::new();
        let ticks = MockTicks::new();
        let mut mailbox = StickyMailbox::new();
        let (_, consumer) = mailbox.split();
        let mut model = ModelSwitches::default();
        model.function_switches.switches[0].kind = FunctionSwitchKind::Latching;
        model.warning.switches[NUM_REGULAR_SWITCHES] = Some(SwitchPosition::Down);
        let mut engine = SwitchEngine::new(
            &inputs,
            &ticks,
            SwitchParams::default(),
            HardwareConfig::default(),
            model,
            consumer,
        )
        .unwrap();
        let mut bad_pots = PotMask::empty();

        assert!(engine.is_switch_warning_required(&mut bad_pots));
    }
}
