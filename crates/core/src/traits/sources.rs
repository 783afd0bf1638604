//! Firmware state consumed while resolving sources
//!
//! Values, trims, telemetry and the inactivity counter belong to other
//! firmware subsystems. The engine reads them through `SourceProvider`,
//! passed into each evaluating call.

use crate::source::{TrimDirection, ValueSource, MAX_SENSORS, NUM_TRIMS};
use heapless::index_map::FnvIndexMap;

/// Maximum number of scripted values in [`MockSources`]
pub const MOCK_VALUE_CAPACITY: usize = 32;

/// Read access to the rest of the firmware
pub trait SourceProvider {
    /// Current value of a mixer source (stick, pot, channel, GVAR,
    /// telemetry), in internal units
    fn value(&self, source: ValueSource) -> i32;

    /// Trim button pressed
    fn trim_pressed(&self, trim: u8, direction: TrimDirection) -> bool;

    /// Ticks since the user last touched the radio
    fn inactivity_counter(&self) -> u16;

    /// Telemetry sensor slot holds fresh data
    fn sensor_fresh(&self, sensor: u8) -> bool;

    /// Telemetry link is streaming
    fn telemetry_streaming(&self) -> bool;

    /// Convert a logical switch threshold into the telemetry source's units
    fn telemetry_threshold(&self, source: ValueSource, threshold: i16) -> i32 {
        let _ = source;
        threshold as i32
    }

    /// Source is hidden by contest rules
    fn contest_forbidden(&self, source: ValueSource) -> bool {
        let _ = source;
        false
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Scripted firmware state
///
/// Unset values read as 0, trims as released, sensors as stale.
pub struct MockSources {
    values: FnvIndexMap<u16, i32, MOCK_VALUE_CAPACITY>,
    trims: [[bool; 2]; NUM_TRIMS],
    sensors: [bool; MAX_SENSORS],
    /// Inactivity counter
    pub inactivity: u16,
    /// Telemetry streaming flag
    pub streaming: bool,
    /// Sources hidden by contest rules
    pub forbidden: Option<ValueSource>,
    /// Scale applied to telemetry thresholds
    pub telemetry_scale: i32,
}

impl MockSources {
    /// Idle radio, no telemetry
    pub fn new() -> Self {
        Self {
            values: FnvIndexMap::new(),
            trims: [[false; 2]; NUM_TRIMS],
            sensors: [false; MAX_SENSORS],
            inactivity: 0,
            streaming: false,
            forbidden: None,
            telemetry_scale: 1,
        }
    }

    /// Set a source value
    ///
    /// Returns `false` if the mock is out of slots.
    pub fn set_value(&mut self, source: ValueSource, value: i32) -> bool {
        self.values.insert(source.0, value).is_ok()
    }

    /// Press or release a trim button
    pub fn set_trim(&mut self, trim: u8, direction: TrimDirection, pressed: bool) {
        if let Some(buttons) = self.trims.get_mut(trim as usize) {
            buttons[direction_index(direction)] = pressed;
        }
    }

    /// Mark a sensor fresh or stale
    pub fn set_sensor_fresh(&mut self, sensor: u8, fresh: bool) {
        if let Some(slot) = self.sensors.get_mut(sensor as usize) {
            *slot = fresh;
        }
    }
}

impl Default for MockSources {
    fn default() -> Self {
        Self::new()
    }
}

fn direction_index(direction: TrimDirection) -> usize {
    match direction {
        TrimDirection::Low => 0,
        TrimDirection::High => 1,
    }
}

impl SourceProvider for MockSources {
    fn value(&self, source: ValueSource) -> i32 {
        self.values.get(&source.0).copied().unwrap_or(0)
    }

    fn trim_pressed(&self, trim: u8, direction: TrimDirection) -> bool {
        self.trims
            .get(trim as usize)
            .map(|buttons| buttons[direction_index(direction)])
            .unwrap_or(false)
    }

    fn inactivity_counter(&self) -> u16 {
        self.inactivity
    }

    fn sensor_fresh(&self, sensor: u8) -> bool {
        self.sensors.get(sensor as usize).copied().unwrap_or(false)
    }

    fn telemetry_streaming(&self) -> bool {
        self.streaming
    }

    fn telemetry_threshold(&self, _source: ValueSource, threshold: i16) -> i32 {
        threshold as i32 * self.telemetry_scale
    }

    fn contest_forbidden(&self, source: ValueSource) -> bool {
        self.forbidden == Some(source)
    }
}
