//! Radio hardware description

use super::error::ConfigError;
use crate::source::{MULTIPOS_STEPS, NUM_POTS, NUM_REGULAR_SWITCHES};

/// Fitted regular switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitchKind {
    /// Not fitted
    #[default]
    None,
    /// Two positions, up pin only
    TwoPos,
    /// Three positions, up and down pins
    ThreePos,
}

/// Fitted pot or slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PotKind {
    /// Not fitted
    #[default]
    None,
    /// Rotary pot
    Pot,
    /// Linear slider
    Slider,
    /// Calibrated multiposition switch
    MultiPos {
        /// Number of detents (1..=6)
        steps: u8,
    },
}

/// What the radio has fitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HardwareConfig {
    /// Regular switches
    pub switches: [SwitchKind; NUM_REGULAR_SWITCHES],
    /// Pots and sliders
    pub pots: [PotKind; NUM_POTS],
}

impl HardwareConfig {
    /// Set a switch kind (builder style)
    pub fn with_switch(mut self, index: usize, kind: SwitchKind) -> Self {
        if let Some(slot) = self.switches.get_mut(index) {
            *slot = kind;
        }
        self
    }

    /// Set a pot kind (builder style)
    pub fn with_pot(mut self, index: usize, kind: PotKind) -> Self {
        if let Some(slot) = self.pots.get_mut(index) {
            *slot = kind;
        }
        self
    }

    /// Kind of a regular switch
    pub fn switch_kind(&self, index: usize) -> SwitchKind {
        self.switches.get(index).copied().unwrap_or_default()
    }

    /// Step count of a multiposition pot
    pub fn multipos_steps(&self, pot: usize) -> Option<u8> {
        match self.pots.get(pot) {
            Some(PotKind::MultiPos { steps }) => Some(*steps),
            _ => None,
        }
    }

    /// Pot or slider is fitted
    pub fn is_pot_available(&self, pot: usize) -> bool {
        !matches!(self.pots.get(pot), None | Some(PotKind::None))
    }

    /// Reject impossible multiposition step counts
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (pot, kind) in self.pots.iter().enumerate() {
            if let PotKind::MultiPos { steps } = kind {
                if *steps == 0 || *steps as usize > MULTIPOS_STEPS {
                    return Err(ConfigError::MultiposSteps {
                        pot: pot as u8,
                        steps: *steps,
                    });
                }
            }
        }
        Ok(())
    }
}
