//! Collaborator traits
//!
//! The engine never touches hardware or other firmware subsystems directly.
//! Each collaborator is a trait with a mock that is always compiled, so the
//! whole engine runs on host.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Platform implementations (Embassy) live in the root crate

pub mod events;
pub mod inputs;
pub mod sources;
pub mod time;

pub use events::{RecordingEvents, SwitchEvent, SwitchEvents};
pub use inputs::{switch_pin, MockInputs, SwitchInputs, ANALOG_FULL_SCALE, NUM_SWITCH_PINS};
pub use sources::{MockSources, SourceProvider};
pub use time::{MockTicks, TickSource};
