//! Flexrig CLI library.
//!
//! This crate provides the command implementations behind the `flexrig`
//! binary: profile loading, validation, rig building, and profile editing.

pub mod commands;
pub mod input;
pub mod logging;
