//! Catalog port.
//!
//! The product catalog is owned by the storefront. The engine only needs a
//! batched lookup and an enumeration of known IDs for full resets.

use std::future::Future;

use crate::domain::{Product, ProductId};
use crate::error::Result;

/// Read-only product lookup.
pub trait Catalog: Send + Sync {
    /// Fetch the records for `ids`.
    ///
    /// Order of the result is unspecified. IDs with no record are simply
    /// absent; that is not an error.
    fn products_by_ids(&self, ids: &[ProductId])
        -> impl Future<Output = Result<Vec<Product>>> + Send;

    /// Every product ID known to the catalog.
    fn product_ids(&self) -> impl Future<Output = Result<Vec<ProductId>>> + Send;
}
