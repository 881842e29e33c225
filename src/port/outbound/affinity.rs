//! Affinity store port.
//!
//! A thin contract over an associative scoring store: per-key maps from
//! product to integer score with atomic increment, multi-key union, member
//! removal, descending range reads and key deletion.

use std::future::Future;

use crate::domain::{ProductId, StoreKey, Suggestion};
use crate::error::Result;

/// Scored key-value store backing the co-purchase index.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `increment` must be an atomic read-modify-write per key
/// - `increment_all` applies every entry or none of them
/// - Unreachable stores report [`Error::Connection`](crate::error::Error::Connection);
///   failed operations report [`Error::Database`](crate::error::Error::Database)
pub trait AffinityStore: Send + Sync {
    /// Check that the store is reachable.
    fn ping(&self) -> impl Future<Output = Result<()>> + Send;

    /// Add `delta` to `member`'s score under `key`, creating either if absent.
    fn increment(
        &self,
        key: &StoreKey,
        member: ProductId,
        delta: u64,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Add `delta` to every `(key, member)` entry as one unit.
    ///
    /// On error no entry has been applied.
    fn increment_all(
        &self,
        entries: &[(StoreKey, ProductId)],
        delta: u64,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Up to `limit` entries of `key`, score descending, ties by ascending member.
    fn range_desc(
        &self,
        key: &StoreKey,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Suggestion>>> + Send;

    /// Overwrite `dest` with the element-wise sum of all `sources`.
    fn union_into(
        &self,
        dest: &StoreKey,
        sources: &[StoreKey],
    ) -> impl Future<Output = Result<()>> + Send;

    /// Remove `members` from `key`. Absent members are ignored.
    fn remove_members(
        &self,
        key: &StoreKey,
        members: &[ProductId],
    ) -> impl Future<Output = Result<()>> + Send;

    /// Delete `key` and its whole map. Returns true if the key existed.
    fn delete_key(&self, key: &StoreKey) -> impl Future<Output = Result<bool>> + Send;
}
