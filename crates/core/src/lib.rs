//! txswitch_core - Pure no_std switch logic for RC transmitters
//!
//! This crate contains the platform-agnostic types and algorithms of the
//! switch engine. Everything can be tested on host without any feature flags
//! or embassy dependencies.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies, no allocation
//! - **Trait abstractions**: Hardware and firmware state injected via traits
//!
//! # Modules
//!
//! - [`source`]: Switch source ids and value source categories
//! - [`logical`]: Logical switch functions, configuration, per flight mode
//!   contexts and the delay/duration gate
//! - [`mailbox`]: Lock-free sticky switch command queue
//! - [`switches`]: Debouncer, function switches and movement detection
//! - [`config`]: Hardware and model configuration with validation
//! - [`parameters`]: Radio parameter store and switch parameters
//! - [`traits`]: Collaborator traits (inputs, ticks, sources, events) and mocks

#![no_std]

pub mod config;
pub mod logical;
pub mod mailbox;
pub mod parameters;
pub mod source;
pub mod switches;
pub mod traits;
