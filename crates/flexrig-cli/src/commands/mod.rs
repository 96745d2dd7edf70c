//! CLI command implementations

pub mod build;
pub mod json_output;
pub mod list;
pub mod mirror;
pub mod validate;
