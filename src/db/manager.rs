//! Database manager implementation
//!
//! SQLite connection pool (r2d2) with an async wrapper that runs database
//! closures on the blocking thread pool, plus migration bootstrap and an
//! in-memory constructor for tests.

use crate::core::error::{KicksError, Result};
use crate::db::migrations;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task;

/// Database manager with connection pool
pub struct DatabaseManager {
    pool: Pool<SqliteConnectionManager>,
    db_path: PathBuf,
}

impl DatabaseManager {
    /// Create a new DatabaseManager with the specified database path and pool size
    pub fn new(db_path: &Path, pool_size: u32, busy_timeout: Duration) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|_e| {
                KicksError::DatabaseError(rusqlite::Error::InvalidPath(parent.to_path_buf()))
            })?;
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(move |conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            conn.busy_timeout(busy_timeout)?;
            // WAL mode for better concurrency between request handlers
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
            Ok(())
        });

        let pool = Pool::builder()
            .max_size(pool_size)
            .connection_timeout(Duration::from_secs(30))
            .build(manager)
            .map_err(|_e| KicksError::DatabaseError(rusqlite::Error::InvalidQuery))?;

        let manager = Self {
            pool,
            db_path: db_path.to_path_buf(),
        };

        manager.migrate()?;

        Ok(manager)
    }

    /// Create a new DatabaseManager with an in-memory database for testing
    pub fn new_in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory().with_init(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        });

        // In-memory databases must use a single connection
        let pool = Pool::builder()
            .max_size(1)
            .connection_timeout(Duration::from_secs(30))
            .build(manager)
            .map_err(|_e| KicksError::DatabaseError(rusqlite::Error::InvalidQuery))?;

        let manager = Self {
            pool,
            db_path: PathBuf::from(":memory:"),
        };

        manager.migrate()?;

        Ok(manager)
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|_e| KicksError::DatabaseError(rusqlite::Error::InvalidQuery))
    }

    /// Execute a database operation asynchronously
    ///
    /// Wraps synchronous database operations in `tokio::task::spawn_blocking`
    /// to avoid blocking the async runtime.
    pub async fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|_e| KicksError::DatabaseError(rusqlite::Error::InvalidQuery))?;
            f(&conn)
        })
        .await
        .map_err(|e| KicksError::TaskError(format!("Database task panicked: {}", e)))?
    }

    /// Run schema migrations
    pub fn migrate(&self) -> Result<()> {
        let conn = self.get_connection()?;
        migrations::run_migrations(&conn)
    }

    /// Path of the backing database file
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_db() -> (DatabaseManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let manager =
            DatabaseManager::new(&db_path, 5, Duration::from_millis(5000)).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_manager_creates_schema() {
        let (manager, _temp_dir) = create_test_db();

        let conn = manager.get_connection().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'admins'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let (manager, _temp_dir) = create_test_db();

        // Re-running migrations on an up-to-date database must not fail
        assert!(manager.migrate().is_ok());
        assert!(manager.migrate().is_ok());
    }

    #[tokio::test]
    async fn test_execute_runs_closure() {
        let manager = DatabaseManager::new_in_memory().unwrap();

        let count: i64 = manager
            .execute(|conn| {
                conn.query_row("SELECT COUNT(*) FROM admins", [], |row| row.get(0))
                    .map_err(KicksError::DatabaseError)
            })
            .await
            .unwrap();

        assert_eq!(count, 0);
    }
}
