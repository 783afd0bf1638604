//! Tick source abstraction
//!
//! The switch engine counts time in 10 ms ticks from a wrapping `u32`
//! counter. `TickSource` abstracts over the tick provider (Embassy, mock) so
//! debounce timing can be tested on host.

use core::cell::Cell;

/// Monotonic 10 ms tick counter
///
/// The counter wraps; differences are taken with wrapping subtraction.
///
/// # Example
///
/// ```
/// use txswitch_core::traits::{MockTicks, TickSource};
///
/// let ticks = MockTicks::new();
/// let since = ticks.now_10ms();
/// ticks.advance(15);
/// assert_eq!(ticks.elapsed_since(since), 15);
/// ```
pub trait TickSource {
    /// Current tick count (10 ms per tick)
    fn now_10ms(&self) -> u32;

    /// Ticks elapsed since `reference`
    fn elapsed_since(&self, reference: u32) -> u32 {
        self.now_10ms().wrapping_sub(reference)
    }
}

impl<T: TickSource + ?Sized> TickSource for &T {
    fn now_10ms(&self) -> u32 {
        (**self).now_10ms()
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock tick source with manual advancement
#[derive(Clone, Default)]
pub struct MockTicks {
    current: Cell<u32>,
}

impl MockTicks {
    /// Creates a new `MockTicks` starting at tick 0
    pub fn new() -> Self {
        Self {
            current: Cell::new(0),
        }
    }

    /// Creates a new `MockTicks` starting at the given tick
    pub fn with_initial(ticks: u32) -> Self {
        Self {
            current: Cell::new(ticks),
        }
    }

    /// Sets the current tick to an absolute value
    pub fn set(&self, ticks: u32) {
        self.current.set(ticks);
    }

    /// Advances the current tick, wrapping like the hardware counter
    pub fn advance(&self, ticks: u32) {
        self.current.set(self.current.get().wrapping_add(ticks));
    }
}

impl TickSource for MockTicks {
    fn now_10ms(&self) -> u32 {
        self.current.get()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
