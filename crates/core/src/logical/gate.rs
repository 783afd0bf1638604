//! Delay/duration gate
//!
//! Wraps the raw result of a logical switch:
//!
//! ```text
//!   raw true          timer == 0          duration expired
//! Start ------> Delay ------------> Enable ----------------> false
//!   ^             | raw false         | raw false, timer == 0
//!   +-------------+-------------------+
//! ```
//!
//! `duration` is a minimum visible time: once enabled with a non-zero
//! duration the output stays true until the timer runs out, even if the raw
//! result drops earlier. Timers are decremented by the periodic tick, not
//! here.

use super::config::LogicalSwitchConfig;
use super::context::{LogicalSwitchContext, LogicalSwitchMemory, TimerState};
use super::function::LogicalSwitchFunction;

/// Apply the delay/duration gate to a raw result
///
/// Returns the raw result unchanged when the switch has no timing configured.
pub fn apply_delay_duration(
    context: &mut LogicalSwitchContext,
    config: &LogicalSwitchConfig,
    raw: bool,
) -> bool {
    if !config.has_timing() {
        return raw;
    }

    if !raw {
        if context.timer_state == TimerState::Enable && config.duration > 0 && context.timer > 0 {
            return true;
        }
        context.timer_state = TimerState::Start;
        context.timer = 0;
        return false;
    }

    if context.timer_state == TimerState::Start {
        context.timer_state = TimerState::Delay;
        // Edges fire on a single tick; delaying them would lose the pulse
        context.timer = if config.function == LogicalSwitchFunction::Edge {
            0
        } else {
            config.delay
        };
    }

    if context.timer_state == TimerState::Delay {
        if context.timer > 0 {
            return false;
        }
        context.timer_state = TimerState::Enable;
        context.timer = config.duration;
    }

    let result = config.duration == 0 || context.timer > 0;
    if !result && config.function == LogicalSwitchFunction::Sticky {
        let (_, last) = context.memory.sticky();
        context.memory = LogicalSwitchMemory::Sticky { state: false, last };
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(context: &mut LogicalSwitchContext) {
        context.timer = context.timer.saturating_sub(1);
    }

    fn and_config(delay: u8, duration: u8) -> LogicalSwitchConfig {
        LogicalSwitchConfig::new(LogicalSwitchFunction::And, 1, 2).with_timing(delay, duration)
    }

    #[test]
    fn test_no_timing_passes_through() {
        let mut context = LogicalSwitchContext::RESET;
        let config = and_config(0, 0);
        assert!(apply_delay_duration(&mut context, &config, true));
        assert!(!apply_delay_duration(&mut context, &config, false));
        assert_eq!(context.timer_state, TimerState::Start);
    }

    #[test]
    fn test_delay_holds_output_low() {
        let mut context = LogicalSwitchContext::RESET;
        let config = and_config(3, 0);

        for _ in 0..3 {
            assert!(!apply_delay_duration(&mut context, &config, true));
            tick(&mut context);
        }
        assert!(apply_delay_duration(&mut context, &config, true));
        assert_eq!(context.timer_state, TimerState::Enable);
    }

    #[test]
    fn test_delay_restarts_when_raw_drops() {
        let mut context = LogicalSwitchContext::RESET;
        let config = and_config(3, 0);

        assert!(!apply_delay_duration(&mut context, &config, true));
        tick(&mut context);
        assert!(!apply_delay_duration(&mut context, &config, false));
        assert_eq!(context.timer_state, TimerState::Start);
        assert_eq!(context.timer, 0);
    }

    #[test]
    fn test_duration_is_minimum_visible_time() {
        let mut context = LogicalSwitchContext::RESET;
        let config = and_config(0, 4);

        assert!(apply_delay_duration(&mut context, &config, true));
        tick(&mut context);
        for _ in 0..3 {
            assert!(apply_delay_duration(&mut context, &config, false));
            tick(&mut context);
        }
        assert!(!apply_delay_duration(&mut context, &config, false));
        assert_eq!(context.timer_state, TimerState::Start);
    }

    #[test]
    fn test_duration_caps_output_while_raw_stays_true() {
        let mut context = LogicalSwitchContext::RESET;
        let config = and_config(0, 2);

        assert!(apply_delay_duration(&mut context, &config, true));
        tick(&mut context);
        assert!(apply_delay_duration(&mut context, &config, true));
        tick(&mut context);
        assert!(!apply_delay_duration(&mut context, &config, true));
    }

    #[test]
    fn test_edge_bypasses_delay() {
        let mut context = LogicalSwitchContext::RESET;
        let config =
            LogicalSwitchConfig::new(LogicalSwitchFunction::Edge, 1, -129).with_timing(10, 0);
        assert!(apply_delay_duration(&mut context, &config, true));
    }

    #[test]
    fn test_expired_duration_clears_sticky_latch() {
        let mut context = LogicalSwitchContext::RESET;
        context.memory = LogicalSwitchMemory::Sticky {
            state: true,
            last: true,
        };
        let config = LogicalSwitchConfig::new(LogicalSwitchFunction::Sticky, 1, 2).with_timing(0, 1);

        assert!(apply_delay_duration(&mut context, &config, true));
        tick(&mut context);
        assert!(!apply_delay_duration(&mut context, &config, true));
        assert_eq!(
            context.memory,
            LogicalSwitchMemory::Sticky {
                state: false,
                last: true
            }
        );
    }
}
