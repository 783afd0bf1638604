//! Configuration error types

/// Malformed hardware or model configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Multiposition pot with no steps or more steps than supported
    MultiposSteps {
        /// Pot index
        pot: u8,
        /// Configured step count
        steps: u8,
    },
    /// Function switch group outside `0..=3`
    FunctionSwitchGroup {
        /// Function switch index
        index: u8,
        /// Configured group
        group: u8,
    },
    /// Switch source operand outside the id layout
    SwitchSourceOutOfRange {
        /// Logical switch index
        index: u8,
        /// Offending source id
        source: i16,
    },
    /// Edge window other than `-1` (exact), `0` (open) or a positive length
    EdgeWindow {
        /// Logical switch index
        index: u8,
        /// Configured window
        window: i16,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::MultiposSteps { pot, steps } => {
                write!(f, "pot {} has invalid multipos step count {}", pot, steps)
            }
            ConfigError::FunctionSwitchGroup { index, group } => {
                write!(f, "function switch {} has invalid group {}", index, group)
            }
            ConfigError::SwitchSourceOutOfRange { index, source } => {
                write!(f, "logical switch {} uses invalid source {}", index, source)
            }
            ConfigError::EdgeWindow { index, window } => {
                write!(f, "logical switch {} has invalid edge window {}", index, window)
            }
        }
    }
}
