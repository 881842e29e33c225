//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the infrastructure the engine depends on: the
//! scoring store and the product catalog.

pub mod affinity;
pub mod catalog;
