//! Periodic logical switch tick
//!
//! Runs once per 10 ms for every flight mode, active or not: applies queued
//! sticky commands, then advances timers, sticky latches, edge detectors and
//! the delay/duration gate countdowns.

use super::engine::SwitchEngine;
use super::GetSwitchFlags;
use txswitch_core::logical::{
    timer_value, LogicalSwitchConfig, LogicalSwitchContext, LogicalSwitchFunction,
    LogicalSwitchMemory, EDGE_DURATION_CAP,
};
use txswitch_core::source::MAX_LOGICAL_SWITCHES;
use txswitch_core::traits::{SourceProvider, SwitchInputs, TickSource};

/// Resolved levels of a switch's `v1` and `v2` sources
type Levels = (bool, bool);

impl<I: SwitchInputs, T: TickSource> SwitchEngine<'_, I, T> {
    /// Drain the sticky mailbox and advance every per flight mode automaton
    pub fn logical_switches_timer_tick(&mut self, sources: &dyn SourceProvider) {
        let no_flags = GetSwitchFlags::empty();

        while let Some(command) = self.mailbox.pop() {
            let index = command.index as usize;
            let config = self.model.logical_switch(index);
            if config.function != LogicalSwitchFunction::Sticky {
                crate::log_warn!("Sticky command for non-sticky logical switch L{}", index + 1);
                continue;
            }

            let source = if command.state {
                config.v2_switch()
            } else {
                config.v1_switch()
            };
            let last = self.get_switch(source, no_flags, sources);
            for mode in self.bank.modes_mut() {
                mode[index].memory = LogicalSwitchMemory::Sticky {
                    state: command.state,
                    last,
                };
            }
            crate::log_debug!("Sticky L{} set to {}", index + 1, command.state);
        }

        // Source levels do not depend on the flight mode being advanced
        let mut levels: [Levels; MAX_LOGICAL_SWITCHES] = [(false, false); MAX_LOGICAL_SWITCHES];
        for (index, config) in self.model.logical.iter().enumerate() {
            match config.function {
                LogicalSwitchFunction::Sticky => {
                    levels[index] = (
                        self.get_switch(config.v1_switch(), no_flags, sources),
                        self.get_switch(config.v2_switch(), no_flags, sources),
                    );
                }
                LogicalSwitchFunction::Edge => {
                    levels[index].0 = self.get_switch(config.v1_switch(), no_flags, sources);
                }
                _ => {}
            }
        }

        let logical = &self.model.logical;
        for mode in self.bank.modes_mut() {
            for (index, context) in mode.iter_mut().enumerate() {
                let config = &logical[index];
                match config.function {
                    LogicalSwitchFunction::Timer => advance_timer(context, config),
                    LogicalSwitchFunction::Sticky => advance_sticky(context, config, levels[index]),
                    LogicalSwitchFunction::Edge => advance_edge(context, config, levels[index].0),
                    _ => {}
                }
                context.timer = context.timer.saturating_sub(1);
            }
        }
    }
}

/// Negative countdown while on (`v1`), positive while off (`v2`)
fn advance_timer(context: &mut LogicalSwitchContext, config: &LogicalSwitchConfig) {
    let next = match context.memory.scalar() {
        None | Some(0) => -timer_value(config.v1),
        Some(countdown) if countdown < 0 => {
            let countdown = countdown + 1;
            if countdown == 0 {
                timer_value(config.v2)
            } else {
                countdown
            }
        }
        Some(countdown) => countdown - 1,
    };
    context.memory = LogicalSwitchMemory::Scalar(next);
}

/// Follow the turn-off source while latched, the turn-on source otherwise
///
/// `last` tracks the level of whichever source is being watched; the latch
/// flips on that source's rising edge.
fn advance_sticky(context: &mut LogicalSwitchContext, config: &LogicalSwitchConfig, levels: Levels) {
    let (mut state, mut last) = context.memory.sticky();
    let before = last;
    let (on_level, off_level) = levels;

    if state {
        if !config.v2_switch().is_none() && off_level != before {
            last = !last;
            if !before {
                state = false;
            }
        }
    } else if !config.v1_switch().is_none() && on_level != before {
        last = !last;
        if !before {
            state = true;
        }
    }

    context.memory = LogicalSwitchMemory::Sticky { state, last };
}

/// Count how long `v1` is held and pulse on the configured window
///
/// `v3 == -1` pulses as the hold time reaches `v2`; otherwise the pulse
/// comes on release after a hold longer than `v2` and, unless `v3 == 0`,
/// no longer than `v2 + v3`.
fn advance_edge(context: &mut LogicalSwitchContext, config: &LogicalSwitchConfig, level: bool) {
    let (_, mut duration) = context.memory.edge();
    let held = duration as i32;
    let minimum = timer_value(config.v2) as i32;
    let mut state = false;

    if level {
        if config.v3 == -1 && held == minimum {
            state = true;
        }
        if duration < EDGE_DURATION_CAP {
            duration += 1;
        }
    } else {
        let maximum = timer_value(config.v2.saturating_add(config.v3)) as i32;
        if held > minimum && (config.v3 == 0 || held <= maximum) {
            state = true;
        }
        duration = 0;
    }

    context.memory = LogicalSwitchMemory::Edge { state, duration };
}
