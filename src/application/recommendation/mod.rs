//! Co-purchase recommendation use cases.
//!
//! - [`config`]: Result counts and aggregation strategy
//! - [`service`]: The recommender over an affinity store and a catalog

pub mod config;
pub mod service;

pub use config::{AggregationMode, RecommenderConfig};
pub use service::{RecommenderService, StoreState};
