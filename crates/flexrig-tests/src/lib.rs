//! Flexrig Integration Test Infrastructure
//!
//! This crate holds cross-crate tests for the profile to rig flow:
//!
//! - Scenarios: reference profiles and the exact rigs they must produce
//! - Properties: naming, connectivity, and pole angle properties over
//!   generated profiles
//! - CLI: the `flexrig` commands against profile files on disk
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p flexrig-tests
//! cargo test -p flexrig-tests --test proptest_rig
//! ```

pub mod fixtures;
