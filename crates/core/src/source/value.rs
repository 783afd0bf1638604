//! Value sources compared by logical switches
//!
//! Comparison and threshold functions read numeric mixer sources. Only the
//! coarse range matters to the evaluator: global variables compare their raw
//! value, telemetry channels need the threshold converted into sensor units,
//! and everything else uses the -1024..=1024 internal range.

/// Number of global variables per model
pub const MAX_GVARS: u16 = 9;

/// First global variable in the mixer source numbering
pub const VALUE_SOURCE_FIRST_GVAR: u16 = 200;

/// First telemetry channel in the mixer source numbering
pub const VALUE_SOURCE_FIRST_TELEMETRY: u16 = 256;

/// Mixer source entries per telemetry sensor (value, min, max)
pub const TELEMETRY_ENTRIES_PER_SENSOR: u16 = 3;

/// Full scale of the internal range
pub const RESX: i32 = 1024;

/// Coarse category of a value source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSourceKind {
    /// Stick, pot, channel, timer and other internal-range sources
    Regular,
    /// Global variable
    GlobalVariable(u8),
    /// Telemetry sensor channel
    Telemetry {
        /// Sensor slot
        sensor: u8,
    },
}

/// Mixer source id used as a logical switch operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ValueSource(pub u16);

impl ValueSource {
    /// Id of a global variable
    pub const fn gvar(index: u8) -> Self {
        Self(VALUE_SOURCE_FIRST_GVAR + index as u16)
    }

    /// Id of a telemetry sensor's current value
    pub const fn telemetry(sensor: u8) -> Self {
        Self(VALUE_SOURCE_FIRST_TELEMETRY + sensor as u16 * TELEMETRY_ENTRIES_PER_SENSOR)
    }

    /// Category of this source
    pub fn kind(self) -> ValueSourceKind {
        if self.0 >= VALUE_SOURCE_FIRST_TELEMETRY {
            ValueSourceKind::Telemetry {
                sensor: ((self.0 - VALUE_SOURCE_FIRST_TELEMETRY) / TELEMETRY_ENTRIES_PER_SENSOR)
                    as u8,
            }
        } else if self.0 >= VALUE_SOURCE_FIRST_GVAR
            && self.0 < VALUE_SOURCE_FIRST_GVAR + MAX_GVARS
        {
            ValueSourceKind::GlobalVariable((self.0 - VALUE_SOURCE_FIRST_GVAR) as u8)
        } else {
            ValueSourceKind::Regular
        }
    }
}

/// Convert a percentage (-100..=100) into the internal range, rounding to
/// the closest integer
pub fn percent_to_resx(percent: i16) -> i32 {
    let scaled = percent as i32 * RESX;
    if scaled >= 0 {
        (scaled + 50) / 100
    } else {
        (scaled - 50) / 100
    }
}
