//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`]: Builders for product IDs, products and catalogs.
//! - [`store`]: Affinity store doubles: `FailingStore`, `RecordingStore`.
//! - [`catalog`]: Catalog doubles: `ShuffledCatalog`, `FailingCatalog`.
//! - [`config`]: Canonical test configurations.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod store;
