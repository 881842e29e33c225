//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and per-connection
//! pragmas for SQLite databases.

use std::time::Duration;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Type alias for a connection checked out of a [`DbPool`].
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

const IN_MEMORY_URL: &str = ":memory:";

/// Pool sizing and connection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    /// Maximum number of pooled connections.
    pub max_size: u32,
    /// How long SQLite waits on a locked database before failing a statement.
    pub busy_timeout_ms: u64,
    /// How long to wait for a connection when building or using the pool.
    pub connect_timeout_ms: u64,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_size: 5,
            busy_timeout_ms: 5000,
            connect_timeout_ms: 2000,
        }
    }
}

/// Applies pragmas to every connection as it leaves the pool.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas {
    busy_timeout_ms: u64,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        diesel::sql_query(format!("PRAGMA busy_timeout={}", self.busy_timeout_ms))
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;
        Ok(())
    }
}

/// Create a connection pool for the given database URL with default options.
///
/// # Errors
/// Returns [`Error::Connection`] if the pool cannot be created.
pub fn create_pool(database_url: &str) -> Result<DbPool> {
    create_pool_with(database_url, &PoolOptions::default())
}

/// Create a connection pool for the given database URL.
///
/// Every `:memory:` connection is a separate database, so an in-memory pool
/// is capped at a single connection.
///
/// # Errors
/// Returns [`Error::Connection`] if the pool cannot be created.
pub fn create_pool_with(database_url: &str, options: &PoolOptions) -> Result<DbPool> {
    let max_size = if database_url == IN_MEMORY_URL {
        1
    } else {
        options.max_size.max(1)
    };

    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_millis(options.connect_timeout_ms))
        .connection_customizer(Box::new(SqlitePragmas {
            busy_timeout_ms: options.busy_timeout_ms,
        }))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Check a connection out of the pool.
///
/// # Errors
/// Returns [`Error::Connection`] if no connection is available.
pub fn checkout(pool: &DbPool) -> Result<DbConnection> {
    pool.get().map_err(|e| Error::Connection(e.to_string()))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = checkout(pool)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(e.to_string()))?;
    Ok(())
}
