//! # Database State
//!
//! Owns the `Database` for the lifetime of the console and hands commands a
//! `&dyn RecordStore`.

use rentdesk_db::{Database, RecordStore};
use tracing::info;

use super::ConfigState;
use crate::error::ApiError;

#[derive(Debug)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Opens (and if needed creates and migrates) the configured database.
    pub async fn open(config: &ConfigState) -> Result<Self, ApiError> {
        if let Some(parent) = config.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ApiError::new(
                        crate::error::ErrorCode::ConnectionError,
                        format!("Could not create {}: {}", parent.display(), e),
                    )
                })?;
            }
        }

        let db = Database::new(config.db_config()).await?;
        info!(path = %config.database_path.display(), "Database ready");
        Ok(DbState::new(db))
    }

    /// The store commands run against.
    pub fn store(&self) -> &dyn RecordStore {
        &self.db
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
