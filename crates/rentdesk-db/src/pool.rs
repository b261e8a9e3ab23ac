//! # Opening the Store
//!
//! One `SqlitePool` per process. The console opens it at startup and every
//! repository borrows connections from it.
//!
//! ```text
//! DbConfig::new("…/rentdesk.db")          DbConfig::in_memory()
//!   WAL journal, NORMAL sync                one private connection,
//!   foreign keys on                          never recycled
//!   file created if missing                  foreign keys on
//!            │                                        │
//!            └──────────────► Database::new ◄─────────┘
//!                                  │
//!                                  ├── connect (ConnectionFailed on error)
//!                                  └── schema bootstrap (MigrationFailed)
//! ```
//!
//! A connection goes back to the pool when its guard drops, so a failed
//! statement never leaks one.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::admin::AdminRepository;
use crate::repository::customer::CustomerRepository;
use crate::repository::rental::RentalRepository;
use crate::repository::vehicle::VehicleRepository;

const MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Where the records live and how the pool behaves.
///
/// ## Example
/// ```rust
/// use rentdesk_db::DbConfig;
///
/// let config = DbConfig::new("/var/lib/rentdesk/rentdesk.db")
///     .max_connections(2)
///     .run_migrations(false);
/// assert_eq!(config.max_connections, 2);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_path: PathBuf,

    /// Pool ceiling. One operator rarely needs more than the default 4.
    pub max_connections: u32,

    /// Connections opened eagerly.
    pub min_connections: u32,

    /// Wait for a pooled connection before giving up with `PoolExhausted`.
    pub acquire_timeout: Duration,

    /// How long SQLite retries a locked file before reporting
    /// "database is locked".
    pub busy_timeout: Duration,

    /// Unused connections are closed after this long (file databases only).
    pub idle_timeout: Duration,

    /// Bootstrap the schema while connecting.
    pub run_migrations: bool,
}

impl DbConfig {
    /// File-backed store at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 4,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// A private, empty, throwaway store. Used by tests.
    pub fn in_memory() -> Self {
        DbConfig {
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            ..DbConfig::new(MEMORY_PATH)
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == MEMORY_PATH
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true)
        };

        Ok(options
            .foreign_keys(true)
            .busy_timeout(self.busy_timeout))
    }

    fn pool_options(&self) -> SqlitePoolOptions {
        let options = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections.min(self.max_connections))
            .acquire_timeout(self.acquire_timeout);

        if self.is_in_memory() {
            // The data lives only as long as the connection.
            options.idle_timeout(None).max_lifetime(None)
        } else {
            options.idle_timeout(Some(self.idle_timeout))
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the record store. Clones share the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects and, unless disabled, bootstraps the schema.
    ///
    /// ## Errors
    /// - `DbError::ConnectionFailed` when the file can't be opened or created
    /// - `DbError::MigrationFailed` when the schema can't be applied
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening record store");

        let pool = config
            .pool_options()
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
        debug!(max_connections = config.max_connections, "Pool ready");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }
        Ok(db)
    }

    /// Applies any schema files this database has not recorded yet.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::apply_pending(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn vehicles(&self) -> VehicleRepository {
        VehicleRepository::new(self.pool.clone())
    }

    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone())
    }

    pub fn rentals(&self) -> RentalRepository {
        RentalRepository::new(self.pool.clone())
    }

    pub fn admins(&self) -> AdminRepository {
        AdminRepository::new(self.pool.clone())
    }

    /// Closes the pool. Later calls fail with a connection error.
    pub async fn close(&self) {
        debug!("Closing record store");
        self.pool.close().await;
    }

    /// True when a trivial statement round-trips.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
    }

    #[tokio::test]
    async fn test_in_memory_databases_are_isolated() {
        let a = Database::new(DbConfig::in_memory()).await.unwrap();
        let b = Database::new(DbConfig::in_memory()).await.unwrap();

        sqlx::query("INSERT INTO customers (name, phone, email) VALUES ('A', '1', 'a@x')")
            .execute(a.pool())
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(b.pool())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_closed_pool_reports_connection_failure() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        let err = db.vehicles().list().await.unwrap_err();
        assert!(err.is_connection());
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/fleet.db")
            .max_connections(0)
            .run_migrations(false);

        assert_eq!(config.max_connections, 1);
        assert!(!config.run_migrations);
        assert_eq!(DbConfig::in_memory().max_connections, 1);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }
}
