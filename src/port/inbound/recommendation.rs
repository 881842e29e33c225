//! Recommendation use cases.
//!
//! Every operation fails open: store or catalog trouble shows up as "no
//! recommendations", never as an error the caller has to handle.

use std::future::Future;

use crate::domain::{Product, ProductId, Suggestion};

/// Co-purchase recording and "bought together" queries.
pub trait Recommendations: Send + Sync {
    /// Record that `products` were bought in one completed order.
    fn record_co_purchase(&self, products: &[ProductId]) -> impl Future<Output = ()> + Send;

    /// Ranked product IDs most often bought with `products`.
    fn suggest_ids(
        &self,
        products: &[ProductId],
        max_results: usize,
    ) -> impl Future<Output = Vec<Suggestion>> + Send;

    /// Catalog records most often bought with `products`, in rank order.
    fn suggest(
        &self,
        products: &[ProductId],
        max_results: usize,
    ) -> impl Future<Output = Vec<Product>> + Send;

    /// Delete the affinity data of every product in `products`.
    ///
    /// Returns the number of keys that were cleared successfully.
    fn clear_all(&self, products: &[ProductId]) -> impl Future<Output = usize> + Send;

    /// Delete the affinity data of every product the catalog knows.
    fn clear_catalog(&self) -> impl Future<Output = usize> + Send;

    /// Whether the backing store was reachable at construction.
    fn is_enabled(&self) -> bool;
}
