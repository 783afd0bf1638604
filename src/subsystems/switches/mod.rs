//! Switch subsystem
//!
//! Owns every piece of runtime switch state and runs it once per 10 ms tick:
//!
//! ```text
//!  SwitchInputs ──► SwitchDebouncer ──┐
//!                  FunctionSwitches ──┤
//!                                     ▼
//!  SourceProvider ──────────────► get_switch ◄──── FlightModeStateBank
//!                                     │                    ▲
//!                                     ▼                    │
//!  StickyConsumer ──► timer tick ──► evaluator ──► delay/duration gate
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use txswitch::subsystems::switches::{ScriptSwitches, SwitchEngine};
//! use txswitch_core::mailbox::StickyMailbox;
//!
//! let mut mailbox = StickyMailbox::new();
//! let (producer, consumer) = mailbox.split();
//! let mut engine = SwitchEngine::new(inputs, ticks, params, hardware, model, consumer)?;
//! let mut script = ScriptSwitches::new(producer);
//!
//! // Every 10 ms:
//! engine.run_cycle(&sources, &mut events);
//! ```

mod engine;
mod evaluator;
mod resolver;
pub mod script;
#[cfg(feature = "embassy")]
pub mod task;
mod timers;
mod warning;

pub use engine::SwitchEngine;
pub use script::ScriptSwitches;
pub use warning::PotMask;

#[cfg(feature = "embassy")]
pub use task::run_switches_task;

use bitflags::bitflags;

bitflags! {
    /// Options for [`SwitchEngine::get_switch`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct GetSwitchFlags: u8 {
        /// Resolve flight mode ids against the mode being transitioned to
        const MIDPOS_DELAY = 0x01;
    }
}
