//! Engine test support utilities
//!
//! This crate provides utilities shared by the engine's integration test
//! binaries. Today that is the unified logging initialization.

pub mod logging;
