//! Notifications raised by the switch engine
//!
//! Audio prompts, LEDs and storage live elsewhere; the engine only reports
//! what happened. Every method has an empty default so consumers implement
//! just the events they care about.

use crate::source::SwitchSource;
use heapless::Vec;

/// Capacity of [`RecordingEvents`]
pub const RECORDED_EVENTS: usize = 64;

/// Sink for engine notifications
pub trait SwitchEvents {
    /// A debounced switch position (or multipos step) was committed
    fn switch_moved(&mut self, source: SwitchSource) {
        let _ = source;
    }

    /// A logical switch changed state in the active flight mode
    fn logical_switch_changed(&mut self, index: u8, on: bool) {
        let _ = (index, on);
    }

    /// Drive a function switch LED
    fn function_switch_led(&mut self, index: u8, on: bool) {
        let _ = (index, on);
    }

    /// Model data changed and needs saving
    fn model_dirty(&mut self) {}
}

/// Discards every notification
impl SwitchEvents for () {}

/// Recorded notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchEvent {
    /// See [`SwitchEvents::switch_moved`]
    Moved(SwitchSource),
    /// See [`SwitchEvents::logical_switch_changed`]
    LogicalSwitch {
        /// Logical switch index
        index: u8,
        /// New state
        on: bool,
    },
    /// See [`SwitchEvents::model_dirty`]
    ModelDirty,
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Records notifications in order
///
/// LED updates are kept as the latest state per switch instead of a log
/// entry, since they are refreshed every tick.
#[derive(Debug, Default)]
pub struct RecordingEvents {
    events: Vec<SwitchEvent, RECORDED_EVENTS>,
    /// Latest LED state per function switch
    pub leds: [Option<bool>; crate::source::NUM_FUNCTION_SWITCHES],
    /// Notifications dropped because the log was full
    pub overflowed: usize,
}

impl RecordingEvents {
    /// Empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded notifications, oldest first
    pub fn events(&self) -> &[SwitchEvent] {
        &self.events
    }

    /// Forget recorded notifications
    pub fn clear(&mut self) {
        self.events.clear();
        self.overflowed = 0;
    }

    /// Check if a notification was recorded
    pub fn contains(&self, event: SwitchEvent) -> bool {
        self.events.contains(&event)
    }

    /// Number of recorded `switch_moved` notifications
    pub fn moved_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SwitchEvent::Moved(_)))
            .count()
    }

    fn record(&mut self, event: SwitchEvent) {
        if self.events.push(event).is_err() {
            self.overflowed += 1;
        }
    }
}

impl SwitchEvents for RecordingEvents {
    fn switch_moved(&mut self, source: SwitchSource) {
        self.record(SwitchEvent::Moved(source));
    }

    fn logical_switch_changed(&mut self, index: u8, on: bool) {
        self.record(SwitchEvent::LogicalSwitch { index, on });
    }

    fn function_switch_led(&mut self, index: u8, on: bool) {
        if let Some(led) = self.leds.get_mut(index as usize) {
            *led = Some(on);
        }
    }

    fn model_dirty(&mut self) {
        self.record(SwitchEvent::ModelDirty);
    }
}
