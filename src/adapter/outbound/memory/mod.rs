//! In-memory adapters for the affinity store and catalog ports.

pub mod affinity;
pub mod catalog;

pub use affinity::MemoryAffinityStore;
pub use catalog::MemoryCatalog;
