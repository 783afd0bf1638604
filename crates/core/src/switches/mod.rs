//! Physical switch processing
//!
//! - [`debounce`]: committed positions of regular switches and
//!   multiposition pots
//! - [`function`]: customizable push-button switches
//! - [`movement`]: "which switch did the user just move" detection

pub mod debounce;
pub mod function;
pub mod movement;

pub use debounce::{multipos_step, MultiposState, SwitchDebouncer};
pub use function::{
    FunctionSwitch, FunctionSwitchConfig, FunctionSwitchKind, FunctionSwitches, StartPosition,
};
pub use movement::{MovementDetector, MOVEMENT_IDLE_TICKS};
