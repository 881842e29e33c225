//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::application::recommendation::{AggregationMode, RecommenderConfig};
use crate::infrastructure::config::store::{StoreBackend, StoreConfig};

/// Recommender config with default counts and the given aggregation mode.
pub fn recommender(aggregation: AggregationMode) -> RecommenderConfig {
    RecommenderConfig {
        aggregation,
        ..RecommenderConfig::default()
    }
}

/// SQLite store config pointing at `database`, with short timeouts.
pub fn sqlite_store(database: &str) -> StoreConfig {
    StoreConfig {
        backend: StoreBackend::Sqlite,
        database: database.to_string(),
        pool_size: 4,
        busy_timeout_ms: 2000,
        connect_timeout_ms: 500,
    }
}
