//! Platform abstraction layer
//!
//! Target-specific implementations of the core collaborator traits. Host
//! builds use the mocks from `txswitch_core::traits` instead.

#[cfg(feature = "embassy")]
pub mod time;

#[cfg(feature = "embassy")]
pub use time::EmbassyTicks;
