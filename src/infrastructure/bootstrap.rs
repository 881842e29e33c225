//! Infrastructure bootstrap helpers for runtime wiring.

use tracing::{info, warn};

use super::backend::{AnyAffinityStore, AnyCatalog};
use crate::adapter::outbound::memory::{MemoryAffinityStore, MemoryCatalog};
use crate::adapter::outbound::sqlite::database::connection::{
    create_pool_with, run_migrations, DbPool,
};
use crate::adapter::outbound::sqlite::{SqliteAffinityStore, SqliteCatalog};
use crate::application::recommendation::RecommenderService;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::store::{StoreBackend, StoreConfig};

/// The recommender as wired from configuration.
pub type Recommender = RecommenderService<AnyAffinityStore, AnyCatalog>;

/// Open the SQLite pool and bring the schema up to date.
///
/// # Errors
/// Returns [`Error::Connection`](crate::error::Error::Connection) if the
/// database cannot be opened, or a database error if migrations fail.
pub fn open_pool(config: &StoreConfig) -> Result<DbPool> {
    let pool = create_pool_with(&config.database, &config.pool_options())?;
    run_migrations(&pool)?;
    Ok(pool)
}

/// Open the configured catalog on its own.
///
/// # Errors
/// Returns an error if the SQLite database cannot be opened.
pub fn open_catalog(config: &StoreConfig) -> Result<AnyCatalog> {
    match config.backend {
        StoreBackend::Sqlite => Ok(AnyCatalog::Sqlite(SqliteCatalog::new(open_pool(config)?))),
        StoreBackend::Memory => Ok(AnyCatalog::Memory(MemoryCatalog::new())),
    }
}

/// Build the recommender from configuration.
///
/// Never fails: a database that cannot be opened leaves the service
/// disabled over an empty catalog, exactly like a store that fails its
/// initial ping.
pub async fn build_recommender(config: &Config) -> Recommender {
    let recommender = config.recommender.clone();

    let (store, catalog) = match config.store.backend {
        StoreBackend::Memory => (
            AnyAffinityStore::Memory(MemoryAffinityStore::new()),
            AnyCatalog::Memory(MemoryCatalog::new()),
        ),
        StoreBackend::Sqlite => match open_pool(&config.store) {
            Ok(pool) => (
                AnyAffinityStore::Sqlite(SqliteAffinityStore::new(pool.clone())),
                AnyCatalog::Sqlite(SqliteCatalog::new(pool)),
            ),
            Err(e) => {
                warn!(
                    database = %config.store.database,
                    error = %e,
                    "Cannot open affinity database, recommendations disabled"
                );
                return RecommenderService::disabled(
                    AnyCatalog::Memory(MemoryCatalog::new()),
                    recommender,
                );
            }
        },
    };

    let service = RecommenderService::connect(store, catalog, recommender).await;
    info!(
        backend = ?config.store.backend,
        enabled = service.store().is_some(),
        "Recommender ready"
    );
    service
}
