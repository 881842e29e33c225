//! SQLite persistence adapters.
//!
//! Provides SQLite-backed implementations of the affinity store and catalog
//! ports using Diesel ORM.

pub mod affinity;
pub mod catalog;
pub mod database;

pub use affinity::SqliteAffinityStore;
pub use catalog::SqliteCatalog;
