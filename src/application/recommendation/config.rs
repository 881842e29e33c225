//! Recommendation service configuration.

use serde::Deserialize;

/// Where a multi-product query's score maps are summed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    /// Union into a per-call transient key on the store, then rank there.
    #[default]
    Store,
    /// Read every source map and merge in process. No transient key.
    Client,
}

/// Configuration for the recommendation service.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommenderConfig {
    /// Whether recommendations are served at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Result count when the caller does not pick one.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Result count for a single product's detail page.
    #[serde(default = "default_product_page_results")]
    pub product_page_results: usize,
    /// Result count for the cart page.
    #[serde(default = "default_cart_results")]
    pub cart_results: usize,
    /// Aggregation strategy for multi-product queries.
    #[serde(default)]
    pub aggregation: AggregationMode,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_results: default_max_results(),
            product_page_results: default_product_page_results(),
            cart_results: default_cart_results(),
            aggregation: AggregationMode::default(),
        }
    }
}

const fn default_enabled() -> bool {
    true
}

const fn default_max_results() -> usize {
    6
}

const fn default_product_page_results() -> usize {
    2
}

const fn default_cart_results() -> usize {
    4
}
