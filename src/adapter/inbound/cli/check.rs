//! Handler for `check`.

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::memory::MemoryAffinityStore;
use crate::adapter::outbound::sqlite::SqliteAffinityStore;
use crate::error::Result;
use crate::infrastructure::bootstrap::open_pool;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::store::StoreBackend;
use crate::port::outbound::affinity::AffinityStore;

/// Ping the configured store and report the effective settings.
///
/// # Errors
/// Returns [`Error::Connection`](crate::error::Error::Connection) when the
/// store cannot be reached.
pub async fn execute(config: &Config) -> Result<()> {
    output::section("Store Check");

    match config.store.backend {
        StoreBackend::Sqlite => {
            output::field("Backend", "sqlite");
            output::field("Database", &config.store.database);
            let store = SqliteAffinityStore::new(open_pool(&config.store)?);
            store.ping().await?;
        }
        StoreBackend::Memory => {
            output::field("Backend", "memory");
            MemoryAffinityStore::new().ping().await?;
        }
    }
    output::success("Store reachable");

    output::section("Recommender");
    let recommender = &config.recommender;
    output::field("Enabled", recommender.enabled);
    output::field("Aggregation", format!("{:?}", recommender.aggregation).to_lowercase());
    output::count("Default", recommender.max_results);
    output::count("Product page", recommender.product_page_results);
    output::count("Cart", recommender.cart_results);

    if !recommender.enabled {
        output::warning("Recommendations disabled by configuration");
    }
    Ok(())
}
