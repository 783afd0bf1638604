//! Switch source identifiers
//!
//! A [`SwitchSource`] is a signed id: the magnitude selects what is read and
//! a negative sign inverts the resolved boolean. Ids are decoded once into a
//! [`SwitchSourceKind`] at the boundary; consumers match on the kind instead
//! of comparing against range constants.
//!
//! # Id layout
//!
//! ```text
//! 0                     NONE (always true)
//! 1 ..= 42              physical switches, 3 positions each
//!                       (regular switches first, then function switches)
//! 43 ..= 66             multiposition pot steps
//! 67 ..= 78             trim buttons (2 directions per trim)
//! 79 ..= 142            logical switches
//! 143, 144              ON, ONE
//! 145 ..= 153           flight modes
//! 154                   TELEMETRY_STREAMING
//! 155 ..= 214           telemetry sensor presence
//! 215                   RADIO_ACTIVITY
//! ```

pub mod value;

pub use value::{percent_to_resx, ValueSource, ValueSourceKind};

/// Number of regular (debounced) physical switches
pub const NUM_REGULAR_SWITCHES: usize = 8;

/// Number of customizable function switches
pub const NUM_FUNCTION_SWITCHES: usize = 6;

/// Total number of physical switches (regular + function)
pub const NUM_SWITCHES: usize = NUM_REGULAR_SWITCHES + NUM_FUNCTION_SWITCHES;

/// Number of pots/sliders that can be configured as multiposition switches
pub const NUM_POTS: usize = 4;

/// Maximum number of steps on a multiposition pot
pub const MULTIPOS_STEPS: usize = 6;

/// Number of trims (each has a low and a high button)
pub const NUM_TRIMS: usize = 6;

/// Number of logical switches per model
pub const MAX_LOGICAL_SWITCHES: usize = 64;

/// Number of flight modes per model
pub const MAX_FLIGHT_MODES: usize = 9;

/// Number of telemetry sensor slots
pub const MAX_SENSORS: usize = 60;

const POSITIONS_PER_SWITCH: i16 = 3;

const FIRST_SWITCH: i16 = 1;
const LAST_SWITCH: i16 = FIRST_SWITCH + NUM_SWITCHES as i16 * POSITIONS_PER_SWITCH - 1;
const FIRST_MULTIPOS: i16 = LAST_SWITCH + 1;
const LAST_MULTIPOS: i16 = FIRST_MULTIPOS + (NUM_POTS * MULTIPOS_STEPS) as i16 - 1;
const FIRST_TRIM: i16 = LAST_MULTIPOS + 1;
const LAST_TRIM: i16 = FIRST_TRIM + NUM_TRIMS as i16 * 2 - 1;
const FIRST_LOGICAL_SWITCH: i16 = LAST_TRIM + 1;
const LAST_LOGICAL_SWITCH: i16 = FIRST_LOGICAL_SWITCH + MAX_LOGICAL_SWITCHES as i16 - 1;
const ON: i16 = LAST_LOGICAL_SWITCH + 1;
const ONE: i16 = ON + 1;
const FIRST_FLIGHT_MODE: i16 = ONE + 1;
const LAST_FLIGHT_MODE: i16 = FIRST_FLIGHT_MODE + MAX_FLIGHT_MODES as i16 - 1;
const TELEMETRY_STREAMING: i16 = LAST_FLIGHT_MODE + 1;
const FIRST_SENSOR: i16 = TELEMETRY_STREAMING + 1;
const LAST_SENSOR: i16 = FIRST_SENSOR + MAX_SENSORS as i16 - 1;
const RADIO_ACTIVITY: i16 = LAST_SENSOR + 1;

/// One past the largest valid source magnitude
pub const SWITCH_SOURCE_COUNT: i16 = RADIO_ACTIVITY + 1;

/// Discrete position of a physical switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SwitchPosition {
    /// Away from the pilot (pin 0)
    Up = 0,
    /// Centre position of a 3-position switch (pin 1)
    Mid = 1,
    /// Towards the pilot (pin 2)
    Down = 2,
}

impl SwitchPosition {
    /// Position from its pin offset (0, 1, 2)
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Up),
            1 => Some(Self::Mid),
            2 => Some(Self::Down),
            _ => None,
        }
    }

    /// Pin offset of this position within its switch
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// Direction of a trim button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimDirection {
    /// Button trimming towards the low end
    Low,
    /// Button trimming towards the high end
    High,
}

/// Decoded switch source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchSourceKind {
    /// No source configured (always true)
    None,
    /// True until the first mixer run after boot
    One,
    /// Always true
    On,
    /// Regular physical switch position
    Switch {
        /// Switch index (0-based, regular switches only)
        index: u8,
        /// Position this id asks about
        position: SwitchPosition,
    },
    /// Function switch position
    FunctionSwitch {
        /// Function switch index (0-based)
        index: u8,
        /// Position this id asks about
        position: SwitchPosition,
    },
    /// Multiposition pot step
    MultiPos {
        /// Pot index
        pot: u8,
        /// Step index
        step: u8,
    },
    /// Trim button
    Trim {
        /// Trim index
        trim: u8,
        /// Button direction
        direction: TrimDirection,
    },
    /// Logical switch state in the current flight mode
    LogicalSwitch(u8),
    /// Flight mode active
    FlightMode(u8),
    /// Telemetry link streaming
    TelemetryStreaming,
    /// Telemetry sensor has fresh data
    Sensor(u8),
    /// Radio has recently been handled
    RadioActivity,
    /// Magnitude outside the id layout (resolves false)
    Invalid,
}

/// Signed switch source id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SwitchSource(pub i16);

impl SwitchSource {
    /// No source, always true
    pub const NONE: Self = Self(0);
    /// Always true
    pub const ON: Self = Self(ON);
    /// True until the mixer has run once
    pub const ONE: Self = Self(ONE);
    /// Telemetry streaming flag
    pub const TELEMETRY_STREAMING: Self = Self(TELEMETRY_STREAMING);
    /// Radio activity flag
    pub const RADIO_ACTIVITY: Self = Self(RADIO_ACTIVITY);

    /// Id of a physical switch position (function switches follow the
    /// regular switches, see [`SwitchSource::function_switch`])
    pub const fn switch(index: u8, position: SwitchPosition) -> Self {
        Self(FIRST_SWITCH + index as i16 * POSITIONS_PER_SWITCH + position as i16)
    }

    /// Id of a function switch position
    pub const fn function_switch(index: u8, position: SwitchPosition) -> Self {
        Self::switch(NUM_REGULAR_SWITCHES as u8 + index, position)
    }

    /// Id of a multiposition pot step
    pub const fn multipos(pot: u8, step: u8) -> Self {
        Self(FIRST_MULTIPOS + pot as i16 * MULTIPOS_STEPS as i16 + step as i16)
    }

    /// Id of a trim button
    pub const fn trim(trim: u8, direction: TrimDirection) -> Self {
        let offset = match direction {
            TrimDirection::Low => 0,
            TrimDirection::High => 1,
        };
        Self(FIRST_TRIM + trim as i16 * 2 + offset)
    }

    /// Id of a logical switch
    pub const fn logical(index: u8) -> Self {
        Self(FIRST_LOGICAL_SWITCH + index as i16)
    }

    /// Id of a flight mode
    pub const fn flight_mode(index: u8) -> Self {
        Self(FIRST_FLIGHT_MODE + index as i16)
    }

    /// Id of a telemetry sensor presence flag
    pub const fn sensor(index: u8) -> Self {
        Self(FIRST_SENSOR + index as i16)
    }

    /// Raw signed id
    pub const fn raw(self) -> i16 {
        self.0
    }

    /// Check if this is the `NONE` source
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Check if the resolved value is inverted
    pub const fn is_negated(self) -> bool {
        self.0 < 0
    }

    /// Same source with the opposite sign
    pub const fn negated(self) -> Self {
        Self(self.0.wrapping_neg())
    }

    /// Decode the magnitude into a source kind (sign is ignored)
    pub fn kind(self) -> SwitchSourceKind {
        let magnitude = self.0.unsigned_abs() as i16;

        match magnitude {
            0 => SwitchSourceKind::None,
            ON => SwitchSourceKind::On,
            ONE => SwitchSourceKind::One,
            FIRST_SWITCH..=LAST_SWITCH => {
                let offset = magnitude - FIRST_SWITCH;
                let switch = (offset / POSITIONS_PER_SWITCH) as u8;
                let position = match SwitchPosition::from_index((offset % POSITIONS_PER_SWITCH) as u8) {
                    Some(position) => position,
                    None => return SwitchSourceKind::Invalid,
                };
                if (switch as usize) < NUM_REGULAR_SWITCHES {
                    SwitchSourceKind::Switch {
                        index: switch,
                        position,
                    }
                } else {
                    SwitchSourceKind::FunctionSwitch {
                        index: switch - NUM_REGULAR_SWITCHES as u8,
                        position,
                    }
                }
            }
            FIRST_MULTIPOS..=LAST_MULTIPOS => {
                let offset = magnitude - FIRST_MULTIPOS;
                SwitchSourceKind::MultiPos {
                    pot: (offset / MULTIPOS_STEPS as i16) as u8,
                    step: (offset % MULTIPOS_STEPS as i16) as u8,
                }
            }
            FIRST_TRIM..=LAST_TRIM => {
                let offset = magnitude - FIRST_TRIM;
                SwitchSourceKind::Trim {
                    trim: (offset / 2) as u8,
                    direction: if offset % 2 == 0 {
                        TrimDirection::Low
                    } else {
                        TrimDirection::High
                    },
                }
            }
            FIRST_LOGICAL_SWITCH..=LAST_LOGICAL_SWITCH => {
                SwitchSourceKind::LogicalSwitch((magnitude - FIRST_LOGICAL_SWITCH) as u8)
            }
            FIRST_FLIGHT_MODE..=LAST_FLIGHT_MODE => {
                SwitchSourceKind::FlightMode((magnitude - FIRST_FLIGHT_MODE) as u8)
            }
            TELEMETRY_STREAMING => SwitchSourceKind::TelemetryStreaming,
            FIRST_SENSOR..=LAST_SENSOR => SwitchSourceKind::Sensor((magnitude - FIRST_SENSOR) as u8),
            RADIO_ACTIVITY => SwitchSourceKind::RadioActivity,
            _ => SwitchSourceKind::Invalid,
        }
    }
}

impl From<i16> for SwitchSource {
    fn from(raw: i16) -> Self {
        Self(raw)
    }
}

impl core::ops::Neg for SwitchSource {
    type Output = Self;

    fn neg(self) -> Self {
        self.negated()
    }
}
