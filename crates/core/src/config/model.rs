//! Per-model switch setup

use super::error::ConfigError;
use crate::logical::{FunctionFamily, LogicalSwitchConfig};
use crate::source::{
    SwitchPosition, SwitchSource, SwitchSourceKind, MAX_LOGICAL_SWITCHES, NUM_POTS, NUM_SWITCHES,
};
use crate::switches::function::{FunctionSwitchConfig, MAX_FUNCTION_SWITCH_GROUP};

/// Expected start-up positions checked before flying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwitchWarning {
    /// Expected position per switch (`None` = not checked)
    pub switches: [Option<SwitchPosition>; NUM_SWITCHES],
    /// Check pot positions too
    pub pots_enabled: bool,
    /// Bit `p` set: pot `p` is checked
    pub pot_mask: u8,
    /// Expected low-resolution pot positions (`analog_in >> 4`)
    pub pot_positions: [i16; NUM_POTS],
}

/// Switch-related part of a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSwitches {
    /// Logical switch definitions
    pub logical: [LogicalSwitchConfig; MAX_LOGICAL_SWITCHES],
    /// Function switch setup and persisted state
    pub function_switches: FunctionSwitchConfig,
    /// Start-up warning setup
    pub warning: SwitchWarning,
}

impl ModelSwitches {
    /// Model with every logical switch disabled
    pub const fn new() -> Self {
        Self {
            logical: [LogicalSwitchConfig::DISABLED; MAX_LOGICAL_SWITCHES],
            function_switches: FunctionSwitchConfig::new(),
            warning: SwitchWarning {
                switches: [None; NUM_SWITCHES],
                pots_enabled: false,
                pot_mask: 0,
                pot_positions: [0; NUM_POTS],
            },
        }
    }

    /// Configuration of one logical switch (disabled when out of range)
    pub fn logical_switch(&self, index: usize) -> LogicalSwitchConfig {
        self.logical
            .get(index)
            .copied()
            .unwrap_or(LogicalSwitchConfig::DISABLED)
    }

    /// Replace one logical switch
    ///
    /// Returns `false` if the index is out of range.
    pub fn set_logical_switch(&mut self, index: usize, config: LogicalSwitchConfig) -> bool {
        match self.logical.get_mut(index) {
            Some(slot) => {
                *slot = config;
                true
            }
            None => false,
        }
    }

    /// Reject operands and groups the engine cannot interpret
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, switch) in self.function_switches.switches.iter().enumerate() {
            if switch.group > MAX_FUNCTION_SWITCH_GROUP {
                return Err(ConfigError::FunctionSwitchGroup {
                    index: index as u8,
                    group: switch.group,
                });
            }
        }

        for (index, config) in self.logical.iter().enumerate() {
            let index = index as u8;
            check_source(index, config.and_switch)?;

            match config.family() {
                FunctionFamily::Bool | FunctionFamily::Sticky => {
                    check_source(index, config.v1_switch())?;
                    check_source(index, config.v2_switch())?;
                }
                FunctionFamily::Edge => {
                    check_source(index, config.v1_switch())?;
                    if config.v3 < -1 {
                        return Err(ConfigError::EdgeWindow {
                            index,
                            window: config.v3,
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}

impl Default for ModelSwitches {
    fn default() -> Self {
        Self::new()
    }
}

fn check_source(index: u8, source: SwitchSource) -> Result<(), ConfigError> {
    if source.kind() == SwitchSourceKind::Invalid {
        return Err(ConfigError::SwitchSourceOutOfRange {
            index,
            source: source.raw(),
        });
    }
    Ok(())
}
