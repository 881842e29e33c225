//! Affinity store and catalog persistence configuration.

use serde::Deserialize;

use crate::adapter::outbound::sqlite::database::connection::PoolOptions;

/// Which backend holds affinity scores and products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// SQLite file via a Diesel connection pool.
    #[default]
    Sqlite,
    /// Process-local maps. Contents vanish on exit.
    Memory,
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Path to the SQLite database file, or `:memory:`.
    ///
    /// Overridden by the `AFFINITY_DATABASE` environment variable.
    #[serde(default = "default_database")]
    pub database: String,

    /// Maximum pooled SQLite connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// How long a statement waits on a locked database.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// How long to wait for a pooled connection.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl StoreConfig {
    /// Pool options derived from this configuration.
    #[must_use]
    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_size: self.pool_size,
            busy_timeout_ms: self.busy_timeout_ms,
            connect_timeout_ms: self.connect_timeout_ms,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            database: default_database(),
            pool_size: default_pool_size(),
            busy_timeout_ms: default_busy_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

fn default_database() -> String {
    "affinity.db".to_string()
}

const fn default_pool_size() -> u32 {
    5
}

const fn default_busy_timeout_ms() -> u64 {
    5000
}

const fn default_connect_timeout_ms() -> u64 {
    2000
}
