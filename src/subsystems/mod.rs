//! Firmware subsystems

pub mod switches;
