//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`ProductId`], [`Product`] and
//! populated catalogs so tests focus on assertions rather than
//! construction boilerplate.

use rust_decimal::Decimal;

use crate::adapter::outbound::memory::MemoryCatalog;
use crate::domain::{Product, ProductId};

/// Create product IDs from raw values, preserving order and duplicates.
pub fn ids(values: &[u64]) -> Vec<ProductId> {
    values.iter().copied().map(ProductId::new).collect()
}

/// Create a product named `Product {id}` priced at `id` units.
pub fn product(id: u64) -> Product {
    Product::new(
        ProductId::new(id),
        format!("Product {id}"),
        Decimal::from(id),
    )
}

/// Create an in-memory catalog holding [`product`] for every ID in `range`.
pub fn catalog_with(range: impl IntoIterator<Item = u64>) -> MemoryCatalog {
    MemoryCatalog::with_products(range.into_iter().map(product))
}
