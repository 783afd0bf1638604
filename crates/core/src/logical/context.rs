//! Per flight mode logical switch runtime state

use crate::source::{MAX_FLIGHT_MODES, MAX_LOGICAL_SWITCHES};

/// Delay/duration gate state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    /// Waiting for the raw result to become true
    #[default]
    Start,
    /// Raw result true, activation delay running
    Delay,
    /// Output enabled, duration running
    Enable,
}

/// Function-specific memory of a logical switch
///
/// The variant in use is selected by the function family. A context whose
/// memory does not match its family reads as freshly reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogicalSwitchMemory {
    /// No sample taken since reset
    #[default]
    Uninitialized,
    /// Timer countdown or last triggering value
    Scalar(i16),
    /// Sticky latch
    Sticky {
        /// Latched output
        state: bool,
        /// Last observed level of the active edge source
        last: bool,
    },
    /// Edge detector
    Edge {
        /// One-tick pulse output
        state: bool,
        /// Ticks the source has been held true (capped)
        duration: u16,
    },
}

impl LogicalSwitchMemory {
    /// Scalar value, if one has been stored
    pub const fn scalar(self) -> Option<i16> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Sticky `(state, last)` pair
    pub const fn sticky(self) -> (bool, bool) {
        match self {
            Self::Sticky { state, last } => (state, last),
            _ => (false, false),
        }
    }

    /// Edge `(state, duration)` pair
    pub const fn edge(self) -> (bool, u16) {
        match self {
            Self::Edge { state, duration } => (state, duration),
            _ => (false, 0),
        }
    }
}

/// Runtime state of one logical switch in one flight mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogicalSwitchContext {
    /// Last published result
    pub state: bool,
    /// Delay/duration gate state
    pub timer_state: TimerState,
    /// Gate ticks remaining
    pub timer: u8,
    /// Function-specific memory
    pub memory: LogicalSwitchMemory,
}

impl LogicalSwitchContext {
    /// Freshly reset context
    pub const RESET: Self = Self {
        state: false,
        timer_state: TimerState::Start,
        timer: 0,
        memory: LogicalSwitchMemory::Uninitialized,
    };
}

/// Logical switch contexts of one flight mode
pub type FlightModeContexts = [LogicalSwitchContext; MAX_LOGICAL_SWITCHES];

/// Independent logical switch state for every flight mode
///
/// Flight modes never share state implicitly; [`FlightModeStateBank::copy_state`]
/// is the only way state moves between them.
#[derive(Debug, Clone)]
pub struct FlightModeStateBank {
    modes: [FlightModeContexts; MAX_FLIGHT_MODES],
}

impl FlightModeStateBank {
    /// Create a bank with every context reset
    pub const fn new() -> Self {
        Self {
            modes: [[LogicalSwitchContext::RESET; MAX_LOGICAL_SWITCHES]; MAX_FLIGHT_MODES],
        }
    }

    /// Reset every context of every flight mode
    pub fn reset(&mut self) {
        for mode in self.modes.iter_mut() {
            mode.fill(LogicalSwitchContext::RESET);
        }
    }

    /// Copy all contexts of `src` over `dst`
    ///
    /// Out-of-range flight modes are ignored.
    pub fn copy_state(&mut self, src: usize, dst: usize) {
        if src >= MAX_FLIGHT_MODES || dst >= MAX_FLIGHT_MODES || src == dst {
            return;
        }
        self.modes[dst] = self.modes[src];
    }

    /// Contexts of one flight mode
    pub fn mode(&self, flight_mode: usize) -> Option<&FlightModeContexts> {
        self.modes.get(flight_mode)
    }

    /// Mutable contexts of one flight mode
    pub fn mode_mut(&mut self, flight_mode: usize) -> Option<&mut FlightModeContexts> {
        self.modes.get_mut(flight_mode)
    }

    /// Context of one logical switch in one flight mode
    pub fn context(&self, flight_mode: usize, index: usize) -> Option<&LogicalSwitchContext> {
        self.modes.get(flight_mode)?.get(index)
    }

    /// Mutable context of one logical switch in one flight mode
    pub fn context_mut(
        &mut self,
        flight_mode: usize,
        index: usize,
    ) -> Option<&mut LogicalSwitchContext> {
        self.modes.get_mut(flight_mode)?.get_mut(index)
    }

    /// Iterate over every flight mode's contexts
    pub fn modes_mut(&mut self) -> impl Iterator<Item = &mut FlightModeContexts> {
        self.modes.iter_mut()
    }
}

impl Default for FlightModeStateBank {
    fn default() -> Self {
        Self::new()
    }
}
