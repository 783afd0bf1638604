//! Logical switch types
//!
//! Pure building blocks of logical switch evaluation: function codes and
//! families, per-switch configuration, the per flight mode runtime contexts,
//! and the delay/duration gate automaton. The evaluator that ties them to
//! live sources lives in the firmware crate.

pub mod config;
pub mod context;
pub mod function;
pub mod gate;

pub use config::{timer_value, LogicalSwitchConfig};
pub use context::{
    FlightModeContexts, FlightModeStateBank, LogicalSwitchContext, LogicalSwitchMemory,
    TimerState,
};
pub use function::{FunctionFamily, LogicalSwitchFunction};
pub use gate::apply_delay_duration;

/// Maximum ticks an edge source's hold time is counted to
pub const EDGE_DURATION_CAP: u16 = 1000;
