//! Integration test utilities for the forum reactions server
//!
//! Spawns the real router on an ephemeral port over the in-memory store and
//! drives it with an HTTP client.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
