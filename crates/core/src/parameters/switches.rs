//! Switch Parameter Definitions
//!
//! # Parameters
//!
//! - `SW_DELAY` - Mid-position / multiposition hold delay (10 ms ticks,
//!   `<= 0` disables the delay)
//! - `SW_INACT_THR` - Inactivity counter threshold for `RADIO_ACTIVITY`
//! - `SW_STICK_TOL` - Stick tolerance divisor used by "almost equal"
//!   comparisons (**read-only**)

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};

/// Default hold delay (150 ms)
pub const DEFAULT_SWITCH_DELAY: i32 = 15;

/// Default inactivity threshold
pub const DEFAULT_INACTIVITY_THRESHOLD: i32 = 2;

/// Default stick tolerance divisor
pub const DEFAULT_STICK_TOLERANCE: i32 = 64;

/// Hold delay applied to ambiguous switch positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchDelay {
    /// Commit every position immediately
    None,
    /// Hold for this many 10 ms ticks
    Ticks(u16),
}

impl SwitchDelay {
    /// Delay from a raw parameter value (`<= 0` disables the delay)
    pub fn from_raw(raw: i32) -> Self {
        if raw <= 0 {
            SwitchDelay::None
        } else {
            SwitchDelay::Ticks(raw.min(u16::MAX as i32) as u16)
        }
    }

    /// Check if a position pending since `elapsed` ticks may be committed
    pub fn has_elapsed(self, elapsed: u32) -> bool {
        match self {
            SwitchDelay::None => true,
            SwitchDelay::Ticks(ticks) => elapsed >= ticks as u32,
        }
    }
}

/// Switch engine parameters loaded from parameter store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchParams {
    /// Mid-position / multiposition hold delay
    pub delay: SwitchDelay,
    /// `RADIO_ACTIVITY` is true while the inactivity counter is below this
    pub inactivity_threshold: u16,
    /// "Almost equal" tolerance is `1024 / stick_tolerance`
    pub stick_tolerance: u16,
}

impl SwitchParams {
    /// Register switch parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            "SW_DELAY",
            ParamValue::Int(DEFAULT_SWITCH_DELAY),
            ParamFlags::empty(),
        )?;
        store.register(
            "SW_INACT_THR",
            ParamValue::Int(DEFAULT_INACTIVITY_THRESHOLD),
            ParamFlags::empty(),
        )?;
        store.register(
            "SW_STICK_TOL",
            ParamValue::Int(DEFAULT_STICK_TOLERANCE),
            ParamFlags::READ_ONLY,
        )?;

        Ok(())
    }

    /// Load switch parameters from parameter store
    ///
    /// Missing or mistyped entries fall back to their defaults.
    pub fn from_store(store: &ParameterStore) -> Self {
        let delay = SwitchDelay::from_raw(
            store
                .get_int("SW_DELAY")
                .unwrap_or(DEFAULT_SWITCH_DELAY),
        );

        let inactivity_threshold = store
            .get_int("SW_INACT_THR")
            .unwrap_or(DEFAULT_INACTIVITY_THRESHOLD)
            .clamp(0, u16::MAX as i32) as u16;

        // A zero divisor would make the tolerance undefined
        let stick_tolerance = match store.get_int("SW_STICK_TOL") {
            Ok(v) if v > 0 => v.min(1024) as u16,
            _ => DEFAULT_STICK_TOLERANCE as u16,
        };

        Self {
            delay,
            inactivity_threshold,
            stick_tolerance,
        }
    }

    /// Absolute tolerance of "almost equal" comparisons
    pub fn almost_equal_tolerance(&self) -> i32 {
        1024 / self.stick_tolerance.max(1) as i32
    }
}

impl Default for SwitchParams {
    fn default() -> Self {
        Self {
            delay: SwitchDelay::Ticks(DEFAULT_SWITCH_DELAY as u16),
            inactivity_threshold: DEFAULT_INACTIVITY_THRESHOLD as u16,
            stick_tolerance: DEFAULT_STICK_TOLERANCE as u16,
        }
    }
}
