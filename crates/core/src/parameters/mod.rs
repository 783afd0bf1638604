//! Radio parameters
//!
//! Radio-wide settings that tune the switch engine (hold delay, inactivity
//! threshold, stick tolerance). Values live in a bounded [`ParameterStore`];
//! typed groups register their defaults and are read back with
//! `from_store`. Persistence is handled outside this crate.

pub mod error;
pub mod storage;
pub mod switches;

pub use error::ParameterError;
pub use storage::{ParamFlags, ParamMetadata, ParamValue, ParameterStore};
pub use storage::{MAX_PARAMS, PARAM_NAME_LEN};
pub use switches::{SwitchDelay, SwitchParams};
