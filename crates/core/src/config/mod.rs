//! Hardware and model configuration
//!
//! [`HardwareConfig`] describes what the radio has fitted; [`ModelSwitches`]
//! holds the per-model switch setup. Both are plain values handed to the
//! engine; loading and saving them is up to the storage layer. `validate`
//! rejects malformed data before it reaches the engine.

pub mod error;
pub mod hardware;
pub mod model;

pub use error::ConfigError;
pub use hardware::{HardwareConfig, PotKind, SwitchKind};
pub use model::{ModelSwitches, SwitchWarning};
