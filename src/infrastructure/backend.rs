//! Runtime-selected backends.
//!
//! The service is generic over its store and catalog; these enums let the
//! composition root pick an adapter from configuration without boxing.

use crate::adapter::outbound::memory::{MemoryAffinityStore, MemoryCatalog};
use crate::adapter::outbound::sqlite::{SqliteAffinityStore, SqliteCatalog};
use crate::domain::{Product, ProductId, StoreKey, Suggestion};
use crate::error::Result;
use crate::port::outbound::affinity::AffinityStore;
use crate::port::outbound::catalog::Catalog;

/// Affinity store chosen by `store.backend`.
pub enum AnyAffinityStore {
    Sqlite(SqliteAffinityStore),
    Memory(MemoryAffinityStore),
}

impl AffinityStore for AnyAffinityStore {
    async fn ping(&self) -> Result<()> {
        match self {
            Self::Sqlite(store) => store.ping().await,
            Self::Memory(store) => store.ping().await,
        }
    }

    async fn increment(&self, key: &StoreKey, member: ProductId, delta: u64) -> Result<()> {
        match self {
            Self::Sqlite(store) => store.increment(key, member, delta).await,
            Self::Memory(store) => store.increment(key, member, delta).await,
        }
    }

    async fn increment_all(&self, entries: &[(StoreKey, ProductId)], delta: u64) -> Result<()> {
        match self {
            Self::Sqlite(store) => store.increment_all(entries, delta).await,
            Self::Memory(store) => store.increment_all(entries, delta).await,
        }
    }

    async fn range_desc(&self, key: &StoreKey, limit: usize) -> Result<Vec<Suggestion>> {
        match self {
            Self::Sqlite(store) => store.range_desc(key, limit).await,
            Self::Memory(store) => store.range_desc(key, limit).await,
        }
    }

    async fn union_into(&self, dest: &StoreKey, sources: &[StoreKey]) -> Result<()> {
        match self {
            Self::Sqlite(store) => store.union_into(dest, sources).await,
            Self::Memory(store) => store.union_into(dest, sources).await,
        }
    }

    async fn remove_members(&self, key: &StoreKey, members: &[ProductId]) -> Result<()> {
        match self {
            Self::Sqlite(store) => store.remove_members(key, members).await,
            Self::Memory(store) => store.remove_members(key, members).await,
        }
    }

    async fn delete_key(&self, key: &StoreKey) -> Result<bool> {
        match self {
            Self::Sqlite(store) => store.delete_key(key).await,
            Self::Memory(store) => store.delete_key(key).await,
        }
    }
}

/// Catalog chosen by `store.backend`.
pub enum AnyCatalog {
    Sqlite(SqliteCatalog),
    Memory(MemoryCatalog),
}

impl AnyCatalog {
    /// Insert or replace a product.
    ///
    /// # Errors
    /// Returns an error if the SQLite write fails.
    pub fn save(&self, product: Product) -> Result<()> {
        match self {
            Self::Sqlite(catalog) => catalog.save(&product),
            Self::Memory(catalog) => {
                catalog.insert(product);
                Ok(())
            }
        }
    }

    /// Every product, ordered by ID.
    ///
    /// # Errors
    /// Returns an error if the SQLite read fails.
    pub async fn list(&self) -> Result<Vec<Product>> {
        match self {
            Self::Sqlite(catalog) => catalog.list(),
            Self::Memory(catalog) => {
                let ids = catalog.product_ids().await?;
                catalog.products_by_ids(&ids).await
            }
        }
    }
}

impl Catalog for AnyCatalog {
    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        match self {
            Self::Sqlite(catalog) => catalog.products_by_ids(ids).await,
            Self::Memory(catalog) => catalog.products_by_ids(ids).await,
        }
    }

    async fn product_ids(&self) -> Result<Vec<ProductId>> {
        match self {
            Self::Sqlite(catalog) => catalog.product_ids().await,
            Self::Memory(catalog) => catalog.product_ids().await,
        }
    }
}
