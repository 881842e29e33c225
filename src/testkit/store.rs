//! Affinity store doubles.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{ProductId, StoreKey, Suggestion};
use crate::error::{Error, Result};
use crate::port::outbound::affinity::AffinityStore;

/// Store whose every operation fails.
///
/// `unreachable()` also fails `ping`, so a service built on it starts
/// disabled. `reachable()` passes `ping` and fails everything after.
#[derive(Debug, Clone, Copy)]
pub struct FailingStore {
    reachable: bool,
}

impl FailingStore {
    pub fn unreachable() -> Self {
        Self { reachable: false }
    }

    pub fn reachable() -> Self {
        Self { reachable: true }
    }

    fn fail<T>(&self) -> Result<T> {
        if self.reachable {
            Err(Error::Database("injected failure".into()))
        } else {
            Err(Error::Connection("connection refused".into()))
        }
    }
}

impl AffinityStore for FailingStore {
    async fn ping(&self) -> Result<()> {
        if self.reachable {
            Ok(())
        } else {
            self.fail()
        }
    }

    async fn increment(&self, _key: &StoreKey, _member: ProductId, _delta: u64) -> Result<()> {
        self.fail()
    }

    async fn increment_all(&self, _entries: &[(StoreKey, ProductId)], _delta: u64) -> Result<()> {
        self.fail()
    }

    async fn range_desc(&self, _key: &StoreKey, _limit: usize) -> Result<Vec<Suggestion>> {
        self.fail()
    }

    async fn union_into(&self, _dest: &StoreKey, _sources: &[StoreKey]) -> Result<()> {
        self.fail()
    }

    async fn remove_members(&self, _key: &StoreKey, _members: &[ProductId]) -> Result<()> {
        self.fail()
    }

    async fn delete_key(&self, _key: &StoreKey) -> Result<bool> {
        self.fail()
    }
}

/// Wraps a store, counting calls and optionally injecting failures.
#[derive(Debug)]
pub struct RecordingStore<S> {
    inner: S,
    increments: AtomicUsize,
    deletes: AtomicUsize,
    unions: AtomicUsize,
    increment_budget: Option<usize>,
    fail_unions: bool,
}

impl<S> RecordingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            increments: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            unions: AtomicUsize::new(0),
            increment_budget: None,
            fail_unions: false,
        }
    }

    /// Let `budget` increments through, then fail every one after.
    ///
    /// A batch that would cross the budget fails whole, writing nothing.
    #[must_use]
    pub fn fail_increments_after(mut self, budget: usize) -> Self {
        self.increment_budget = Some(budget);
        self
    }

    /// Fail every `union_into` after writing nothing.
    #[must_use]
    pub fn fail_unions(mut self) -> Self {
        self.fail_unions = true;
        self
    }

    /// Increments attempted, successful or not.
    pub fn increments(&self) -> usize {
        self.increments.load(Ordering::SeqCst)
    }

    /// Deletes attempted.
    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// Unions attempted.
    pub fn unions(&self) -> usize {
        self.unions.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: AffinityStore> AffinityStore for RecordingStore<S> {
    async fn ping(&self) -> Result<()> {
        self.inner.ping().await
    }

    async fn increment(&self, key: &StoreKey, member: ProductId, delta: u64) -> Result<()> {
        let attempt = self.increments.fetch_add(1, Ordering::SeqCst);
        if self.increment_budget.is_some_and(|budget| attempt >= budget) {
            return Err(Error::Database("injected increment failure".into()));
        }
        self.inner.increment(key, member, delta).await
    }

    async fn increment_all(&self, entries: &[(StoreKey, ProductId)], delta: u64) -> Result<()> {
        let attempted = self.increments.fetch_add(entries.len(), Ordering::SeqCst) + entries.len();
        if self.increment_budget.is_some_and(|budget| attempted > budget) {
            return Err(Error::Database("injected increment failure".into()));
        }
        self.inner.increment_all(entries, delta).await
    }

    async fn range_desc(&self, key: &StoreKey, limit: usize) -> Result<Vec<Suggestion>> {
        self.inner.range_desc(key, limit).await
    }

    async fn union_into(&self, dest: &StoreKey, sources: &[StoreKey]) -> Result<()> {
        self.unions.fetch_add(1, Ordering::SeqCst);
        if self.fail_unions {
            return Err(Error::Database("injected union failure".into()));
        }
        self.inner.union_into(dest, sources).await
    }

    async fn remove_members(&self, key: &StoreKey, members: &[ProductId]) -> Result<()> {
        self.inner.remove_members(key, members).await
    }

    async fn delete_key(&self, key: &StoreKey) -> Result<bool> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_key(key).await
    }
}
