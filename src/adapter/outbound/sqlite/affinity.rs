//! SQLite affinity store implementation.
//!
//! Each affinity map is the set of `affinity_scores` rows sharing a
//! `store_key`. Increments are single-statement upserts, so concurrent
//! writers to the same key serialize inside SQLite. Batched increments
//! share one transaction and commit together.

use std::collections::BTreeMap;

use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::{checkout, DbConnection, DbPool};
use crate::adapter::outbound::sqlite::database::model::NewScoreRow;
use crate::adapter::outbound::sqlite::database::schema::affinity_scores;
use crate::domain::{ProductId, StoreKey, Suggestion};
use crate::error::{Error, Result};
use crate::port::outbound::affinity::AffinityStore;

/// Rows per INSERT statement when materializing a union.
const INSERT_CHUNK: usize = 300;

fn member_to_sql(member: ProductId) -> Result<i64> {
    i64::try_from(member.get())
        .map_err(|_| Error::Database(format!("product id {member} exceeds SQLite integer range")))
}

fn member_from_sql(member: i64) -> Result<ProductId> {
    u64::try_from(member)
        .map(ProductId::new)
        .map_err(|_| Error::Parse(format!("negative product id {member} in affinity_scores")))
}

fn delta_to_sql(delta: u64) -> Result<i64> {
    i64::try_from(delta)
        .map_err(|_| Error::Database(format!("increment {delta} exceeds SQLite integer range")))
}

fn score_from_sql(score: i64) -> u64 {
    u64::try_from(score).unwrap_or(0)
}

fn limit_to_sql(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// SQLite-backed affinity store.
///
/// Implements the [`AffinityStore`] trait over the `affinity_scores` table.
pub struct SqliteAffinityStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteAffinityStore {
    /// Create a new SQLite affinity store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConnection> {
        checkout(&self.pool)
    }

    /// Number of distinct keys currently stored.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn key_count(&self) -> Result<usize> {
        let mut conn = self.conn()?;
        let count: i64 = affinity_scores::table
            .select(diesel::dsl::count_distinct(affinity_scores::store_key))
            .first(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// All keys currently stored, sorted.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn keys(&self) -> Result<Vec<StoreKey>> {
        let mut conn = self.conn()?;
        let keys: Vec<String> = affinity_scores::table
            .select(affinity_scores::store_key)
            .distinct()
            .order(affinity_scores::store_key.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(keys.into_iter().map(StoreKey::from_raw).collect())
    }

    /// Current score of `member` under `key`, if any.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn score(&self, key: &StoreKey, member: ProductId) -> Result<Option<u64>> {
        let mut conn = self.conn()?;
        let score: Option<i64> = affinity_scores::table
            .filter(affinity_scores::store_key.eq(key.as_str()))
            .filter(affinity_scores::member.eq(member_to_sql(member)?))
            .select(affinity_scores::score)
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(score.map(score_from_sql))
    }
}

impl AffinityStore for SqliteAffinityStore {
    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .map_err(|e| Error::Connection(e.to_string()))?;
        Ok(())
    }

    async fn increment(&self, key: &StoreKey, member: ProductId, delta: u64) -> Result<()> {
        let delta = delta_to_sql(delta)?;
        let row = NewScoreRow {
            store_key: key.as_str(),
            member: member_to_sql(member)?,
            score: delta,
        };
        let mut conn = self.conn()?;

        diesel::insert_into(affinity_scores::table)
            .values(&row)
            .on_conflict((affinity_scores::store_key, affinity_scores::member))
            .do_update()
            .set(affinity_scores::score.eq(affinity_scores::score + delta))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn increment_all(&self, entries: &[(StoreKey, ProductId)], delta: u64) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }
        let delta = delta_to_sql(delta)?;
        let rows = entries
            .iter()
            .map(|(key, member)| {
                Ok(NewScoreRow {
                    store_key: key.as_str(),
                    member: member_to_sql(*member)?,
                    score: delta,
                })
            })
            .collect::<Result<Vec<NewScoreRow<'_>>>>()?;
        let mut conn = self.conn()?;

        conn.immediate_transaction(|conn| {
            for row in &rows {
                diesel::insert_into(affinity_scores::table)
                    .values(row)
                    .on_conflict((affinity_scores::store_key, affinity_scores::member))
                    .do_update()
                    .set(affinity_scores::score.eq(affinity_scores::score + delta))
                    .execute(conn)?;
            }
            Ok::<(), diesel::result::Error>(())
        })
        .map_err(|e| Error::Database(e.to_string()))
    }

    async fn range_desc(&self, key: &StoreKey, limit: usize) -> Result<Vec<Suggestion>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self.conn()?;

        let rows: Vec<(i64, i64)> = affinity_scores::table
            .filter(affinity_scores::store_key.eq(key.as_str()))
            .order((affinity_scores::score.desc(), affinity_scores::member.asc()))
            .select((affinity_scores::member, affinity_scores::score))
            .limit(limit_to_sql(limit))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter()
            .map(|(member, score)| Ok(Suggestion::new(member_from_sql(member)?, score_from_sql(score))))
            .collect()
    }

    async fn union_into(&self, dest: &StoreKey, sources: &[StoreKey]) -> Result<()> {
        let source_keys: Vec<&str> = sources.iter().map(StoreKey::as_str).collect();
        let mut conn = self.conn()?;

        // Immediate: concurrent unions queue on busy_timeout.
        conn.immediate_transaction(|conn| {
            // Read before deleting: `dest` may itself be one of the sources.
            let rows: Vec<(i64, i64)> = affinity_scores::table
                .filter(affinity_scores::store_key.eq_any(source_keys))
                .select((affinity_scores::member, affinity_scores::score))
                .load(conn)?;

            let mut combined: BTreeMap<i64, i64> = BTreeMap::new();
            for (member, score) in rows {
                let total = combined.entry(member).or_insert(0);
                *total = total.saturating_add(score);
            }

            diesel::delete(affinity_scores::table.filter(affinity_scores::store_key.eq(dest.as_str())))
                .execute(conn)?;

            let new_rows: Vec<NewScoreRow<'_>> = combined
                .into_iter()
                .map(|(member, score)| NewScoreRow {
                    store_key: dest.as_str(),
                    member,
                    score,
                })
                .collect();
            for chunk in new_rows.chunks(INSERT_CHUNK) {
                diesel::insert_into(affinity_scores::table)
                    .values(chunk)
                    .execute(conn)?;
            }

            Ok::<(), diesel::result::Error>(())
        })
        .map_err(|e| Error::Database(e.to_string()))
    }

    async fn remove_members(&self, key: &StoreKey, members: &[ProductId]) -> Result<()> {
        if members.is_empty() {
            return Ok(());
        }
        let members = members
            .iter()
            .copied()
            .map(member_to_sql)
            .collect::<Result<Vec<i64>>>()?;
        let mut conn = self.conn()?;

        diesel::delete(
            affinity_scores::table
                .filter(affinity_scores::store_key.eq(key.as_str()))
                .filter(affinity_scores::member.eq_any(members)),
        )
        .execute(&mut conn)
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn delete_key(&self, key: &StoreKey) -> Result<bool> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            affinity_scores::table.filter(affinity_scores::store_key.eq(key.as_str())),
        )
        .execute(&mut conn)
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};

    fn setup_store() -> SqliteAffinityStore {
        let pool = create_pool(":memory:").expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        SqliteAffinityStore::new(pool)
    }

    fn id(value: u64) -> ProductId {
        ProductId::new(value)
    }

    fn key(value: u64) -> StoreKey {
        StoreKey::affinity(id(value))
    }

    // -------------------------------------------------------------------------
    // Single-key operations
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn ping_succeeds_on_open_pool() {
        let store = setup_store();
        assert!(store.ping().await.is_ok());
    }

    #[tokio::test]
    async fn increment_upserts_and_accumulates() {
        let store = setup_store();

        store.increment(&key(1), id(2), 1).await.unwrap();
        store.increment(&key(1), id(2), 1).await.unwrap();
        store.increment(&key(1), id(3), 5).await.unwrap();

        assert_eq!(store.score(&key(1), id(2)).unwrap(), Some(2));
        assert_eq!(store.score(&key(1), id(3)).unwrap(), Some(5));
        assert_eq!(store.key_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn increment_all_commits_every_entry() {
        let store = setup_store();
        let entries = vec![(key(1), id(2)), (key(2), id(1)), (key(1), id(3))];

        store.increment_all(&entries, 1).await.unwrap();
        store.increment_all(&entries, 1).await.unwrap();

        assert_eq!(store.score(&key(1), id(2)).unwrap(), Some(2));
        assert_eq!(store.score(&key(2), id(1)).unwrap(), Some(2));
        assert_eq!(store.score(&key(1), id(3)).unwrap(), Some(2));
        assert_eq!(store.keys().unwrap(), vec![key(1), key(2)]);
    }

    #[tokio::test]
    async fn increment_all_with_bad_entry_writes_nothing() {
        let store = setup_store();
        let entries = vec![(key(1), id(2)), (key(2), id(u64::MAX))];

        let result = store.increment_all(&entries, 1).await;

        assert!(matches!(result, Err(Error::Database(_))));
        assert_eq!(store.key_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn range_desc_breaks_ties_by_member() {
        let store = setup_store();
        store.increment(&key(1), id(9), 1).await.unwrap();
        store.increment(&key(1), id(4), 1).await.unwrap();
        store.increment(&key(1), id(7), 3).await.unwrap();

        let ranked = store.range_desc(&key(1), 10).await.unwrap();

        assert_eq!(
            ranked,
            vec![
                Suggestion::new(id(7), 3),
                Suggestion::new(id(4), 1),
                Suggestion::new(id(9), 1),
            ]
        );
    }

    #[tokio::test]
    async fn range_desc_respects_limit() {
        let store = setup_store();
        for member in 2..=6 {
            store.increment(&key(1), id(member), member).await.unwrap();
        }

        assert_eq!(store.range_desc(&key(1), 2).await.unwrap().len(), 2);
        assert!(store.range_desc(&key(1), 0).await.unwrap().is_empty());
        assert_eq!(store.range_desc(&key(1), usize::MAX).await.unwrap().len(), 5);
    }

    // -------------------------------------------------------------------------
    // Multi-key operations
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn union_into_sums_and_replaces_dest() {
        let store = setup_store();
        store.increment(&key(1), id(3), 1).await.unwrap();
        store.increment(&key(2), id(3), 1).await.unwrap();
        store.increment(&key(2), id(1), 1).await.unwrap();

        let dest = StoreKey::from_raw("tmp:1-2:test");
        store.increment(&dest, id(42), 9).await.unwrap();
        store.union_into(&dest, &[key(1), key(2)]).await.unwrap();

        assert_eq!(store.score(&dest, id(3)).unwrap(), Some(2));
        assert_eq!(store.score(&dest, id(1)).unwrap(), Some(1));
        assert_eq!(store.score(&dest, id(42)).unwrap(), None);
    }

    #[tokio::test]
    async fn remove_members_and_delete_key() {
        let store = setup_store();
        store.increment(&key(1), id(2), 1).await.unwrap();
        store.increment(&key(1), id(3), 1).await.unwrap();

        store.remove_members(&key(1), &[id(2), id(99)]).await.unwrap();
        assert_eq!(store.score(&key(1), id(2)).unwrap(), None);
        assert_eq!(store.score(&key(1), id(3)).unwrap(), Some(1));

        assert!(store.delete_key(&key(1)).await.unwrap());
        assert!(!store.delete_key(&key(1)).await.unwrap());
        assert_eq!(store.key_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn out_of_range_member_is_rejected() {
        let store = setup_store();

        let result = store.increment(&key(1), id(u64::MAX), 1).await;

        assert!(matches!(result, Err(Error::Database(_))));
    }
}
