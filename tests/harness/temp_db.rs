use std::path::{Path, PathBuf};

use affinity::adapter::outbound::sqlite::database::connection::{
    create_pool_with, run_migrations, DbPool, PoolOptions,
};
use diesel::prelude::*;
use tempfile::TempDir;

/// Temporary SQLite database for integration tests.
///
/// The file lives in its own temp directory and is removed on drop.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("affinity.db");

        let options = PoolOptions {
            max_size: 8,
            ..PoolOptions::default()
        };
        let pool = create_pool_with(path.to_str().expect("utf-8 temp path"), &options)
            .expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        // WAL mode improves concurrent writer behavior in tests.
        {
            let mut conn = pool.get().expect("get sqlite connection");
            diesel::sql_query("PRAGMA journal_mode=WAL")
                .execute(&mut conn)
                .expect("enable WAL mode");
        }

        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
