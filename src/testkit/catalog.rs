//! Catalog doubles.

use crate::domain::{Product, ProductId};
use crate::error::{Error, Result};
use crate::port::outbound::catalog::Catalog;

/// Wraps a catalog and returns lookups in reverse order, the way a
/// database answering an `IN (...)` query is free to.
#[derive(Debug)]
pub struct ShuffledCatalog<C> {
    inner: C,
}

impl<C> ShuffledCatalog<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Catalog> Catalog for ShuffledCatalog<C> {
    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        let mut products = self.inner.products_by_ids(ids).await?;
        products.reverse();
        Ok(products)
    }

    async fn product_ids(&self) -> Result<Vec<ProductId>> {
        self.inner.product_ids().await
    }
}

/// Catalog whose every lookup fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingCatalog;

impl Catalog for FailingCatalog {
    async fn products_by_ids(&self, _ids: &[ProductId]) -> Result<Vec<Product>> {
        Err(Error::Database("catalog offline".into()))
    }

    async fn product_ids(&self) -> Result<Vec<ProductId>> {
        Err(Error::Database("catalog offline".into()))
    }
}
