//! Outbound adapters implementing the store and catalog ports.
//!
//! - [`memory`]: Process-local maps for tests and demos
//! - [`sqlite`]: Diesel-backed persistence

pub mod memory;
pub mod sqlite;
