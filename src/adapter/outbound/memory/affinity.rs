//! In-process affinity store.
//!
//! Score maps live in a sharded concurrent map; each key's map is mutated
//! under its shard lock, which gives the per-key atomic increment the port
//! requires. Suitable for tests, single-process deployments, and as the
//! reference behavior for other backends.

use std::collections::HashMap;

use dashmap::DashMap;

use crate::domain::suggestion::top_k;
use crate::domain::{ProductId, StoreKey, Suggestion};
use crate::error::Result;
use crate::port::outbound::affinity::AffinityStore;

/// Concurrent in-memory implementation of [`AffinityStore`].
#[derive(Debug, Default)]
pub struct MemoryAffinityStore {
    maps: DashMap<StoreKey, HashMap<ProductId, u64>>,
}

impl MemoryAffinityStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current score of `member` under `key`, if any.
    #[must_use]
    pub fn score(&self, key: &StoreKey, member: ProductId) -> Option<u64> {
        self.maps.get(key)?.get(&member).copied()
    }

    /// Number of keys currently held.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.maps.len()
    }

    /// All keys currently held, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<StoreKey> {
        let mut keys: Vec<StoreKey> = self.maps.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        keys
    }

    fn add(&self, key: &StoreKey, member: ProductId, delta: u64) {
        let mut map = self.maps.entry(key.clone()).or_default();
        let score = map.entry(member).or_insert(0);
        *score = score.saturating_add(delta);
    }
}

impl AffinityStore for MemoryAffinityStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn increment(&self, key: &StoreKey, member: ProductId, delta: u64) -> Result<()> {
        self.add(key, member, delta);
        Ok(())
    }

    async fn increment_all(&self, entries: &[(StoreKey, ProductId)], delta: u64) -> Result<()> {
        // Infallible per entry, so the batch always lands whole.
        for (key, member) in entries {
            self.add(key, *member, delta);
        }
        Ok(())
    }

    async fn range_desc(&self, key: &StoreKey, limit: usize) -> Result<Vec<Suggestion>> {
        let snapshot = match self.maps.get(key) {
            Some(map) => map.clone(),
            None => return Ok(Vec::new()),
        };
        Ok(top_k(snapshot, limit))
    }

    async fn union_into(&self, dest: &StoreKey, sources: &[StoreKey]) -> Result<()> {
        // Sum before touching `dest`, which may itself be one of the sources.
        let mut combined: HashMap<ProductId, u64> = HashMap::new();
        for source in sources {
            if let Some(map) = self.maps.get(source) {
                for (member, score) in map.iter() {
                    let total = combined.entry(*member).or_insert(0);
                    *total = total.saturating_add(*score);
                }
            }
        }

        if combined.is_empty() {
            self.maps.remove(dest);
        } else {
            self.maps.insert(dest.clone(), combined);
        }
        Ok(())
    }

    async fn remove_members(&self, key: &StoreKey, members: &[ProductId]) -> Result<()> {
        if let Some(mut map) = self.maps.get_mut(key) {
            for member in members {
                map.remove(member);
            }
        }
        // Empty maps do not exist as keys.
        self.maps.remove_if(key, |_, map| map.is_empty());
        Ok(())
    }

    async fn delete_key(&self, key: &StoreKey) -> Result<bool> {
        Ok(self.maps.remove(key).is_some())
    }
}
