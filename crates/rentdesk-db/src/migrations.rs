//! # Schema Bootstrap
//!
//! The schema ships inside the binary. Opening a database brings it up to
//! date before any repository runs a statement.
//!
//! ```text
//! Database::new ──► apply_pending(pool)
//!                        │
//!                        ├── _sqlx_migrations missing? create it
//!                        ├── skip every file already recorded there
//!                        └── run the rest in filename order
//!                              001_initial_schema.sql
//!                                admins, vehicles, customers, rentals
//! ```
//!
//! Files are append-only. A schema change is a new `NNN_*.sql` file.

use sqlx::migrate::Migrator;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

static SCHEMA: Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every schema file the database has not seen yet.
pub async fn apply_pending(pool: &SqlitePool) -> DbResult<()> {
    debug!(files = SCHEMA.migrations.len(), "Bootstrapping schema");
    SCHEMA.run(pool).await?;
    info!("Schema up to date");
    Ok(())
}

/// `(shipped, recorded)`: schema files in the binary and files the
/// database has recorded as applied.
pub async fn schema_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let recorded: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
        .fetch_one(pool)
        .await?;

    Ok((SCHEMA.migrations.len(), usize::try_from(recorded).unwrap_or(0)))
}
