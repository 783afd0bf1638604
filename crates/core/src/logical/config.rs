//! Logical switch configuration
//!
//! Operands are stored raw; their meaning depends on the function family:
//!
//! | Family       | `v1`            | `v2`                    | `v3`            |
//! |--------------|-----------------|-------------------------|-----------------|
//! | Bool         | switch source   | switch source           | -               |
//! | Sticky       | set source      | clear source            | -               |
//! | Edge         | switch source   | min duration (timer)    | window (timer)  |
//! | Timer        | on time (timer) | off time (timer)        | -               |
//! | Offset/Diff  | value source    | threshold               | -               |
//! | Comparison   | value source    | value source            | -               |

use super::function::{FunctionFamily, LogicalSwitchFunction};
use crate::source::{SwitchSource, ValueSource};

/// Configuration of one logical switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogicalSwitchConfig {
    /// Function evaluated every tick
    pub function: LogicalSwitchFunction,
    /// First operand
    pub v1: i16,
    /// Second operand
    pub v2: i16,
    /// Third operand (edge window only)
    pub v3: i16,
    /// Gate source; the function only runs while it resolves true
    pub and_switch: SwitchSource,
    /// Activation delay (ticks)
    pub delay: u8,
    /// Minimum visible duration (ticks, 0 = unlimited)
    pub duration: u8,
}

impl LogicalSwitchConfig {
    /// Disabled logical switch
    pub const DISABLED: Self = Self {
        function: LogicalSwitchFunction::None,
        v1: 0,
        v2: 0,
        v3: 0,
        and_switch: SwitchSource::NONE,
        delay: 0,
        duration: 0,
    };

    /// Create a logical switch with two operands and no gate or timing
    pub const fn new(function: LogicalSwitchFunction, v1: i16, v2: i16) -> Self {
        Self {
            function,
            v1,
            v2,
            v3: 0,
            and_switch: SwitchSource::NONE,
            delay: 0,
            duration: 0,
        }
    }

    /// Set the gate source
    pub const fn with_and_switch(mut self, and_switch: SwitchSource) -> Self {
        self.and_switch = and_switch;
        self
    }

    /// Set the activation delay and minimum duration
    pub const fn with_timing(mut self, delay: u8, duration: u8) -> Self {
        self.delay = delay;
        self.duration = duration;
        self
    }

    /// Set the third operand
    pub const fn with_v3(mut self, v3: i16) -> Self {
        self.v3 = v3;
        self
    }

    /// Evaluation family of the configured function
    pub const fn family(&self) -> FunctionFamily {
        self.function.family()
    }

    /// First operand as a switch source
    pub const fn v1_switch(&self) -> SwitchSource {
        SwitchSource(self.v1)
    }

    /// Second operand as a switch source
    pub const fn v2_switch(&self) -> SwitchSource {
        SwitchSource(self.v2)
    }

    /// First operand as a value source
    pub const fn v1_value(&self) -> ValueSource {
        ValueSource(self.v1 as u16)
    }

    /// Second operand as a value source
    pub const fn v2_value(&self) -> ValueSource {
        ValueSource(self.v2 as u16)
    }

    /// Check if the delay/duration gate applies
    pub const fn has_timing(&self) -> bool {
        self.delay != 0 || self.duration != 0
    }
}

/// Smallest timer operand (0 ticks)
pub const TIMER_OPERAND_MIN: i16 = -129;

/// Largest timer operand (1750 ticks)
pub const TIMER_OPERAND_MAX: i16 = 122;

/// Decode a timer operand into ticks
///
/// The stored value is a compressed step table:
///
/// ```text
/// [-129, -110]  ->  [0, 19]       step 1
/// [-109,    6]  ->  [20, 595]     step 5
/// [   7,  122]  ->  [600, 1750]   step 10
/// ```
///
/// Operands outside the table saturate at its ends.
pub const fn timer_value(value: i16) -> i16 {
    let value = if value < TIMER_OPERAND_MIN {
        TIMER_OPERAND_MIN
    } else if value > TIMER_OPERAND_MAX {
        TIMER_OPERAND_MAX
    } else {
        value
    };

    if value < -109 {
        129 + value
    } else if value < 7 {
        (113 + value) * 5
    } else {
        (53 + value) * 10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_value_table() {
        assert_eq!(timer_value(-129), 0);
        assert_eq!(timer_value(-110), 19);
        assert_eq!(timer_value(-109), 20);
        assert_eq!(timer_value(6), 595);
        assert_eq!(timer_value(7), 600);
        assert_eq!(timer_value(122), 1750);
    }

    #[test]
    fn test_timer_value_saturates() {
        assert_eq!(timer_value(i16::MIN), 0);
        assert_eq!(timer_value(i16::MAX), 1750);
    }

    #[test]
    fn test_has_timing() {
        let config = LogicalSwitchConfig::new(LogicalSwitchFunction::And, 1, 2);
        assert!(!config.has_timing());
        assert!(config.with_timing(0, 5).has_timing());
        assert!(config.with_timing(3, 0).has_timing());
    }

    #[test]
    fn test_disabled_default() {
        assert_eq!(LogicalSwitchConfig::default(), LogicalSwitchConfig::DISABLED);
        assert_eq!(
            LogicalSwitchConfig::DISABLED.family(),
            FunctionFamily::Disabled
        );
    }
}
