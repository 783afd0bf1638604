#![cfg_attr(not(test), no_std)]

//! txswitch - Switch engine for RC transmitters
//!
//! This library turns raw switch pins and pot readings into debounced switch
//! positions, resolves switch source ids, and evaluates the model's logical
//! switches once per 10 ms tick.
//!
//! Pure types and algorithms live in [`txswitch_core`]; this crate owns the
//! runtime state and the firmware-facing glue.

// Platform glue (tick source for embassy targets)
pub mod platform;

// Core systems (logging)
pub mod core;

// Subsystems (switch engine)
pub mod subsystems;

pub use txswitch_core;
