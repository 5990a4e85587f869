//! Integration test utilities for the Bridged API
//!
//! Spawns the real server against PostgreSQL and drives it over HTTP.

pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
