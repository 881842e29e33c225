//! Co-purchase recommender.
//!
//! Records which products are bought together and answers "what else is
//! bought with these?" from the per-product affinity maps.
//!
//! # Failure model
//!
//! ```text
//! connect() --ping ok--> Connected(store) --op fails--> empty result for that call
//!     |
//!     +--ping fails---> Disabled ------------------> every call is a no-op
//! ```
//!
//! Neither path surfaces an error: recommendations are additive and must
//! never block an order or a page render.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::config::{AggregationMode, RecommenderConfig};
use crate::domain::suggestion::top_k;
use crate::domain::{Basket, Product, ProductId, StoreKey, Suggestion};
use crate::error::Result;
use crate::port::inbound::recommendation::Recommendations;
use crate::port::outbound::affinity::AffinityStore;
use crate::port::outbound::catalog::Catalog;

/// Whether the affinity store was reachable when the service was built.
///
/// Fixed for the lifetime of the service.
#[derive(Debug)]
pub enum StoreState<S> {
    Connected(S),
    Disabled,
}

impl<S> StoreState<S> {
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }
}

/// Recommendation service over an [`AffinityStore`] and a [`Catalog`].
pub struct RecommenderService<S, C> {
    store: StoreState<S>,
    catalog: C,
    config: RecommenderConfig,
}

impl<S: AffinityStore, C: Catalog> RecommenderService<S, C> {
    /// Build the service, probing the store once.
    ///
    /// An unreachable store, or `enabled = false` in the config, yields a
    /// disabled service.
    pub async fn connect(store: S, catalog: C, config: RecommenderConfig) -> Self {
        if !config.enabled {
            info!("Recommendations disabled by configuration");
            return Self::disabled(catalog, config);
        }

        match store.ping().await {
            Ok(()) => {
                debug!("Affinity store reachable");
                Self {
                    store: StoreState::Connected(store),
                    catalog,
                    config,
                }
            }
            Err(e) => {
                warn!(error = %e, "Affinity store unavailable, recommendations disabled");
                Self::disabled(catalog, config)
            }
        }
    }

    /// Build a service with no store. Every operation is a no-op.
    pub fn disabled(catalog: C, config: RecommenderConfig) -> Self {
        Self {
            store: StoreState::Disabled,
            catalog,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The store, if connected.
    #[must_use]
    pub fn store(&self) -> Option<&S> {
        match &self.store {
            StoreState::Connected(store) => Some(store),
            StoreState::Disabled => None,
        }
    }

    /// Suggestions for a product detail page.
    pub async fn suggest_for_product(&self, product: ProductId) -> Vec<Product> {
        self.suggest(&[product], self.config.product_page_results)
            .await
    }

    /// Suggestions for the products currently in a cart.
    pub async fn suggest_for_cart(&self, products: &[ProductId]) -> Vec<Product> {
        self.suggest(products, self.config.cart_results).await
    }

    /// Suggestions using the configured default result count.
    pub async fn suggest_default(&self, products: &[ProductId]) -> Vec<Product> {
        self.suggest(products, self.config.max_results).await
    }

    /// Both directions of every pair in the basket, committed as one batch.
    async fn increment_pairs(store: &S, basket: &Basket) -> Result<usize> {
        let entries: Vec<(StoreKey, ProductId)> = basket
            .ordered_pairs()
            .map(|(product, with)| (StoreKey::affinity(product), with))
            .collect();
        store.increment_all(&entries, 1).await?;
        Ok(entries.len())
    }

    async fn rank(&self, store: &S, basket: &Basket, limit: usize) -> Result<Vec<Suggestion>> {
        if let Some(product) = basket.single() {
            return store.range_desc(&StoreKey::affinity(product), limit).await;
        }
        match self.config.aggregation {
            AggregationMode::Store => Self::rank_on_store(store, basket, limit).await,
            AggregationMode::Client => Self::rank_in_process(store, basket, limit).await,
        }
    }

    /// Union → exclude → range on a transient key minted for this call.
    ///
    /// The transient key is deleted whatever happened in between.
    async fn rank_on_store(store: &S, basket: &Basket, limit: usize) -> Result<Vec<Suggestion>> {
        let transient = StoreKey::transient(basket);
        let sources: Vec<StoreKey> = basket.iter().map(StoreKey::affinity).collect();
        let queried = basket.to_vec();

        let ranked = async {
            store.union_into(&transient, &sources).await?;
            store.remove_members(&transient, &queried).await?;
            store.range_desc(&transient, limit).await
        }
        .await;

        if let Err(e) = store.delete_key(&transient).await {
            warn!(key = %transient, error = %e, "Failed to release transient aggregate");
        }

        ranked
    }

    async fn rank_in_process(store: &S, basket: &Basket, limit: usize) -> Result<Vec<Suggestion>> {
        let mut combined: HashMap<ProductId, u64> = HashMap::new();
        for product in basket.iter() {
            let entries = store
                .range_desc(&StoreKey::affinity(product), usize::MAX)
                .await?;
            for entry in entries {
                if basket.contains(entry.product) {
                    continue;
                }
                let total = combined.entry(entry.product).or_insert(0);
                *total = total.saturating_add(entry.score);
            }
        }
        Ok(top_k(combined, limit))
    }
}

impl<S: AffinityStore, C: Catalog> Recommendations for RecommenderService<S, C> {
    async fn record_co_purchase(&self, products: &[ProductId]) {
        let StoreState::Connected(store) = &self.store else {
            debug!("Store disabled, co-purchase not recorded");
            return;
        };

        let basket = Basket::new(products.iter().copied());
        if basket.len() < 2 {
            debug!(products = basket.len(), "Nothing bought together");
            return;
        }

        match Self::increment_pairs(store, &basket).await {
            Ok(increments) => {
                debug!(products = basket.len(), increments, "Recorded co-purchase");
            }
            Err(e) => {
                warn!(products = basket.len(), error = %e, "Co-purchase recording aborted");
            }
        }
    }

    async fn suggest_ids(&self, products: &[ProductId], max_results: usize) -> Vec<Suggestion> {
        let StoreState::Connected(store) = &self.store else {
            debug!("Store disabled, no suggestions");
            return Vec::new();
        };

        let basket = Basket::new(products.iter().copied());
        if basket.is_empty() || max_results == 0 {
            return Vec::new();
        }

        match self.rank(store, &basket, max_results).await {
            Ok(ranked) => ranked,
            Err(e) => {
                warn!(products = basket.len(), error = %e, "Suggestion lookup failed");
                Vec::new()
            }
        }
    }

    async fn suggest(&self, products: &[ProductId], max_results: usize) -> Vec<Product> {
        let ranked: Vec<ProductId> = self
            .suggest_ids(products, max_results)
            .await
            .into_iter()
            .map(|suggestion| suggestion.product)
            .collect();
        if ranked.is_empty() {
            return Vec::new();
        }

        match self.catalog.products_by_ids(&ranked).await {
            Ok(found) => {
                let resolved = order_by_rank(&ranked, found);
                if resolved.len() < ranked.len() {
                    debug!(
                        missing = ranked.len() - resolved.len(),
                        "Dropped suggestions missing from catalog"
                    );
                }
                resolved
            }
            Err(e) => {
                warn!(error = %e, "Catalog lookup failed");
                Vec::new()
            }
        }
    }

    async fn clear_all(&self, products: &[ProductId]) -> usize {
        let StoreState::Connected(store) = &self.store else {
            return 0;
        };

        let mut cleared = 0;
        for product in products {
            match store.delete_key(&StoreKey::affinity(*product)).await {
                Ok(_) => cleared += 1,
                Err(e) => warn!(product = %product, error = %e, "Failed to clear affinity data"),
            }
        }
        info!(requested = products.len(), cleared, "Cleared affinity data");
        cleared
    }

    async fn clear_catalog(&self) -> usize {
        if !self.store.is_connected() {
            return 0;
        }
        match self.catalog.product_ids().await {
            Ok(ids) => self.clear_all(&ids).await,
            Err(e) => {
                warn!(error = %e, "Catalog enumeration failed, nothing cleared");
                0
            }
        }
    }

    fn is_enabled(&self) -> bool {
        self.store.is_connected()
    }
}

/// Re-impose rank order on catalog records returned in arbitrary order.
///
/// Ranked IDs with no record are dropped.
#[must_use]
pub fn order_by_rank(ranked: &[ProductId], products: Vec<Product>) -> Vec<Product> {
    let mut by_id: HashMap<ProductId, Product> = products
        .into_iter()
        .map(|product| (product.id, product))
        .collect();
    ranked.iter().filter_map(|id| by_id.remove(id)).collect()
}
