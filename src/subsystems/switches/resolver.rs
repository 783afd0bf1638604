//! Switch source resolution

use super::engine::SwitchEngine;
use super::GetSwitchFlags;
use txswitch_core::source::{SwitchSource, SwitchSourceKind};
use txswitch_core::traits::{SourceProvider, SwitchInputs, TickSource};

impl<I: SwitchInputs, T: TickSource> SwitchEngine<'_, I, T> {
    /// Resolve a switch source to its current boolean value
    ///
    /// A negative id inverts the result. `NONE` is always true; ids outside
    /// the layout are always false, whatever their sign.
    pub fn get_switch(
        &self,
        source: SwitchSource,
        flags: GetSwitchFlags,
        sources: &dyn SourceProvider,
    ) -> bool {
        let result = match source.kind() {
            SwitchSourceKind::None => return true,
            SwitchSourceKind::Invalid => return false,
            SwitchSourceKind::One => !self.mixer_first_run_done,
            SwitchSourceKind::On => true,
            SwitchSourceKind::Switch { index, position } => {
                self.debouncer.is_position(index as usize, position)
            }
            SwitchSourceKind::FunctionSwitch { index, position } => self
                .model
                .function_switches
                .resolve(index as usize, position),
            SwitchSourceKind::MultiPos { pot, step } => {
                self.debouncer.multipos(pot as usize) == Some(step)
            }
            SwitchSourceKind::Trim { trim, direction } => sources.trim_pressed(trim, direction),
            SwitchSourceKind::RadioActivity => {
                sources.inactivity_counter() < self.params.inactivity_threshold
            }
            SwitchSourceKind::Sensor(sensor) => sources.sensor_fresh(sensor),
            SwitchSourceKind::TelemetryStreaming => sources.telemetry_streaming(),
            SwitchSourceKind::FlightMode(mode) => {
                if flags.contains(GetSwitchFlags::MIDPOS_DELAY) {
                    mode == self.transition_flight_mode
                } else {
                    mode == self.current_flight_mode
                }
            }
            SwitchSourceKind::LogicalSwitch(index) => self
                .bank
                .context(self.current_flight_mode as usize, index as usize)
                .map(|context| context.state)
                .unwrap_or(false),
        };

        if source.is_negated() {
            !result
        } else {
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use txswitch_core::config::{HardwareConfig, ModelSwitches, PotKind, SwitchKind};
    use txswitch_core::mailbox::StickyMailbox;
    use txswitch_core::parameters::SwitchParams;
    use txswitch_core::source::{SwitchPosition, TrimDirection, SWITCH_SOURCE_COUNT};
    use txswitch_core::switches::FunctionSwitchKind;
    use txswitch_core::traits::{MockInputs, MockSources, MockTicks};

    fn hardware() -> HardwareConfig {
        HardwareConfig::default()
            .with_switch(0, SwitchKind::ThreePos)
            .with_switch(1, SwitchKind::TwoPos)
            .with_pot(0, PotKind::MultiPos { steps: 6 })
    }

    #[test]
    fn resolves_fixed_sources() {
        let inputs = MockInputs::new();
        let ticks = MockTicks::new();
        let mut mailbox = StickyMailbox::new();
        let (_, consumer) = mailbox.split();
        let mut engine = SwitchEngine::new(
            &inputs,
            &ticks,
            SwitchParams::default(),
            hardware(),
            ModelSwitches::default(),
            consumer,
        )
        .unwrap();
        let sources = MockSources::new();
        let flags = GetSwitchFlags::empty();

        assert!(engine.get_switch(SwitchSource::NONE, flags, &sources));
        assert!(engine.get_switch(SwitchSource::ON, flags, &sources));
        assert!(!engine.get_switch(-SwitchSource::ON, flags, &sources));
        assert!(engine.get_switch(SwitchSource::ONE, flags, &sources));
        engine.mark_mixer_run();
        assert!(!engine.get_switch(SwitchSource::ONE, flags, &sources));
        assert!(!engine.get_switch(SwitchSource(SWITCH_SOURCE_COUNT), flags, &sources));
        assert!(!engine.get_switch(SwitchSource(-SWITCH_SOURCE_COUNT), flags, &sources));
    }

    #[test]
    fn resolves_debounced_positions() {
        let inputs = MockInputs::new();
        let ticks = MockTicks::new();
        let mut mailbox = StickyMailbox::new();
        let (_, consumer) = mailbox.split();
        let mut engine = SwitchEngine::new(
            &inputs,
            &ticks,
            SwitchParams::default(),
            hardware(),
            ModelSwitches::default(),
            consumer,
        )
        .unwrap();
        let sources = MockSources::new();
        let flags = GetSwitchFlags::empty();

        inputs.set_switch(0, SwitchPosition::Up);
        inputs.set_analog(0, 2047);
        engine.update_switch_positions(&mut ());

        let up = SwitchSource::switch(0, SwitchPosition::Up);
        assert!(engine.get_switch(up, flags, &sources));
        assert!(!engine.get_switch(-up, flags, &sources));
        assert!(!engine.get_switch(SwitchSource::switch(0, SwitchPosition::Mid), flags, &sources));
        assert!(engine.get_switch(SwitchSource::switch(1, SwitchPosition::Down), flags, &sources));
        assert!(engine.get_switch(SwitchSource::multipos(0, 5), flags, &sources));
        assert!(!engine.get_switch(SwitchSource::multipos(0, 0), flags, &sources));
    }

    #[test]
    fn resolves_function_switches() {
        let inputs = MockInputs::new();
        let ticks = MockTicks::new();
        let mut mailbox = StickyMailbox::new();
        let (_, consumer) = mailbox.split();
        let mut model = ModelSwitches::default();
        model.function_switches.switches[0].kind = FunctionSwitchKind::Latching;
        model.function_switches.set_on(0, true);
        let engine = SwitchEngine::new(
            &inputs,
            &ticks,
            SwitchParams::default(),
            HardwareConfig::default(),
            model,
            consumer,
        )
        .unwrap();
        let sources = MockSources::new();
        let flags = GetSwitchFlags::empty();

        assert!(engine.get_switch(
            SwitchSource::function_switch(0, SwitchPosition::Down),
            flags,
            &sources
        ));
        assert!(!engine.get_switch(
            SwitchSource::function_switch(0, SwitchPosition::Up),
            flags,
            &sources
        ));
        assert!(!engine.get_switch(
            SwitchSource::function_switch(0, SwitchPosition::Mid),
            flags,
            &sources
        ));
    }

    #[test]
    fn resolves_firmware_state() {
        let inputs = MockInputs::new();
        let ticks = MockTicks::new();
        let mut mailbox = StickyMailbox::new();
        let (_, consumer) = mailbox.split();
        let engine = SwitchEngine::new(
            &inputs,
            &ticks,
            SwitchParams::default(),
            HardwareConfig::default(),
            ModelSwitches::default(),
            consumer,
        )
        .unwrap();
        let mut sources = MockSources::new();
        let flags = GetSwitchFlags::empty();

        sources.set_trim(1, TrimDirection::Low, true);
        sources.set_sensor_fresh(4, true);
        sources.streaming = true;
        sources.inactivity = 1;

        assert!(engine.get_switch(SwitchSource::trim(1, TrimDirection::Low), flags, &sources));
        assert!(!engine.get_switch(SwitchSource::trim(1, TrimDirection::High), flags, &sources));
        assert!(engine.get_switch(SwitchSource::sensor(4), flags, &sources));
        assert!(!engine.get_switch(SwitchSource::sensor(5), flags, &sources));
        assert!(engine.get_switch(SwitchSource::TELEMETRY_STREAMING, flags, &sources));
        assert!(engine.get_switch(SwitchSource::RADIO_ACTIVITY, flags, &sources));

        sources.inactivity = 2;
        assert!(!engine.get_switch(SwitchSource::RADIO_ACTIVITY, flags, &sources));
    }

    #[test]
    fn flight_mode_follows_transition_with_flag() {
        let inputs = MockInputs::new();
        let ticks = MockTicks::new();
        let mut mailbox = StickyMailbox::new();
        let (_, consumer) = mailbox.split();
        let mut engine = SwitchEngine::new(
            &inputs,
            &ticks,
            SwitchParams::default(),
            HardwareConfig::default(),
            ModelSwitches::default(),
            consumer,
        )
        .unwrap();
        let sources = MockSources::new();

        engine.set_flight_modes(1, 3);
        let fm1 = SwitchSource::flight_mode(1);
        let fm3 = SwitchSource::flight_mode(3);
        assert!(engine.get_switch(fm1, GetSwitchFlags::empty(), &sources));
        assert!(!engine.get_switch(fm3, GetSwitchFlags::empty(), &sources));
        assert!(engine.get_switch(fm3, GetSwitchFlags::MIDPOS_DELAY, &sources));
        assert!(!engine.get_switch(fm1, GetSwitchFlags::MIDPOS_DELAY, &sources));
    }
}
