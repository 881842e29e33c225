#![allow(dead_code)]

use std::collections::BTreeMap;

use affinity::adapter::outbound::memory::{MemoryAffinityStore, MemoryCatalog};
use affinity::adapter::outbound::sqlite::SqliteAffinityStore;
use affinity::application::recommendation::{AggregationMode, RecommenderService};
use affinity::domain::{ProductId, StoreKey};
use affinity::infrastructure::backend::AnyAffinityStore;
use affinity::port::outbound::affinity::AffinityStore;
use affinity::testkit::config::recommender;
use affinity::testkit::domain::catalog_with;

use crate::harness::temp_db::TempDb;

pub type Service = RecommenderService<AnyAffinityStore, MemoryCatalog>;

/// Store backends every behavioral test runs against.
#[derive(Debug, Clone, Copy)]
pub enum Backend {
    Memory,
    Sqlite,
}

pub const BACKENDS: [Backend; 2] = [Backend::Memory, Backend::Sqlite];

/// A connected service over a fresh store and a catalog of products 1..=20.
pub struct Fixture {
    pub backend: Backend,
    pub service: Service,
    _db: Option<TempDb>,
}

impl Fixture {
    pub async fn new(backend: Backend) -> Self {
        Self::with_aggregation(backend, AggregationMode::Store).await
    }

    pub async fn with_aggregation(backend: Backend, aggregation: AggregationMode) -> Self {
        let (store, db) = match backend {
            Backend::Memory => (AnyAffinityStore::Memory(MemoryAffinityStore::new()), None),
            Backend::Sqlite => {
                let db = TempDb::create();
                let store = AnyAffinityStore::Sqlite(SqliteAffinityStore::new(db.pool().clone()));
                (store, Some(db))
            }
        };
        let service =
            RecommenderService::connect(store, catalog_with(1..=20), recommender(aggregation)).await;
        assert!(service.store().is_some(), "{backend:?} store failed its ping");

        Self {
            backend,
            service,
            _db: db,
        }
    }

    fn store(&self) -> &AnyAffinityStore {
        self.service.store().expect("connected store")
    }

    /// Full score map stored under `product`'s affinity key.
    pub async fn scores(&self, product: u64) -> BTreeMap<u64, u64> {
        self.store()
            .range_desc(&StoreKey::affinity(ProductId::new(product)), usize::MAX)
            .await
            .expect("read scores")
            .into_iter()
            .map(|s| (s.product.get(), s.score))
            .collect()
    }

    /// Number of distinct keys in the store, transient ones included.
    pub fn key_count(&self) -> usize {
        match self.store() {
            AnyAffinityStore::Memory(store) => store.key_count(),
            AnyAffinityStore::Sqlite(store) => store.key_count().expect("count keys"),
        }
    }

    /// Every key in the store, sorted.
    pub fn keys(&self) -> Vec<StoreKey> {
        match self.store() {
            AnyAffinityStore::Memory(store) => store.keys(),
            AnyAffinityStore::Sqlite(store) => store.keys().expect("list keys"),
        }
    }
}

/// Convert ranked suggestions or products to raw IDs.
pub fn raw_ids(ids: impl IntoIterator<Item = ProductId>) -> Vec<u64> {
    ids.into_iter().map(ProductId::get).collect()
}
