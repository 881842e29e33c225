//! In-memory catalog for testing and demos.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::{Product, ProductId};
use crate::error::Result;
use crate::port::outbound::catalog::Catalog;

/// In-memory product catalog.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl MemoryCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-populated with `products`.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let catalog = Self::new();
        for product in products {
            catalog.insert(product);
        }
        catalog
    }

    /// Insert or replace a product.
    pub fn insert(&self, product: Product) {
        self.products.write().insert(product.id, product);
    }

    /// Remove a product. Returns true if it existed.
    pub fn remove(&self, id: ProductId) -> bool {
        self.products.write().remove(&id).is_some()
    }

}

impl Catalog for MemoryCatalog {
    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        let products = self.products.read();
        Ok(ids
            .iter()
            .filter_map(|id| products.get(id).cloned())
            .collect())
    }

    async fn product_ids(&self) -> Result<Vec<ProductId>> {
        let mut ids: Vec<ProductId> = self.products.read().keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(id: u64) -> Product {
        Product::new(ProductId::new(id), format!("Product {id}"), dec!(1.00))
    }

    #[tokio::test]
    async fn lookup_skips_unknown_ids() {
        let catalog = MemoryCatalog::with_products([product(1), product(2)]);

        let found = catalog
            .products_by_ids(&[ProductId::new(2), ProductId::new(7)])
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ProductId::new(2));
    }

    #[tokio::test]
    async fn product_ids_are_sorted() {
        let catalog = MemoryCatalog::with_products([product(3), product(1), product(2)]);

        let ids = catalog.product_ids().await.unwrap();

        assert_eq!(
            ids,
            vec![ProductId::new(1), ProductId::new(2), ProductId::new(3)]
        );
    }

    #[test]
    fn remove_reports_existence() {
        let catalog = MemoryCatalog::with_products([product(1)]);
        assert!(catalog.remove(ProductId::new(1)));
        assert!(!catalog.remove(ProductId::new(1)));
        assert!(tokio_test::block_on(catalog.product_ids()).unwrap().is_empty());
    }
}
