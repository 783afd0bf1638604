//! Script bridge
//!
//! Scripts run in their own context. They can only queue sticky commands
//! through the mailbox producer; the commands take effect on the next timer
//! tick. Reading a logical switch goes through the engine, serialized by
//! the caller.

use super::engine::SwitchEngine;
use txswitch_core::mailbox::StickyProducer;
use txswitch_core::source::MAX_LOGICAL_SWITCHES;
use txswitch_core::traits::{SwitchInputs, TickSource};

/// Script-side handle for sticky logical switches
pub struct ScriptSwitches<'a> {
    producer: StickyProducer<'a>,
}

impl<'a> ScriptSwitches<'a> {
    /// Wrap the mailbox producer
    pub fn new(producer: StickyProducer<'a>) -> Self {
        Self { producer }
    }

    /// Request a sticky logical switch state
    ///
    /// Returns `false` if the index is out of range or the mailbox is full;
    /// the script may retry on a later tick.
    pub fn set_sticky_switch(&mut self, index: u8, state: bool) -> bool {
        if index as usize >= MAX_LOGICAL_SWITCHES {
            return false;
        }
        self.producer.try_push(index, state)
    }
}

impl<I: SwitchInputs, T: TickSource> SwitchEngine<'_, I, T> {
    /// Published state of a logical switch in the current flight mode
    ///
    /// `None` for an index outside the model.
    pub fn get_logical_switch_value(&self, index: u8) -> Option<bool> {
        self.bank
            .context(self.current_flight_mode as usize, index as usize)
            .map(|context| context.state)
    }
}
