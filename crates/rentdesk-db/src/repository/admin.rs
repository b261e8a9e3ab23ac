//! # Admin Repository
//!
//! Login accounts. Only the salted hash is stored; hashing and verification
//! happen in the console's auth module.

use rentdesk_core::Admin;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for admin accounts.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: SqlitePool,
}

impl AdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        AdminRepository { pool }
    }

    /// Looks up an admin by username.
    pub async fn find_by_username(&self, username: &str) -> DbResult<Option<Admin>> {
        debug!(username, "Looking up admin");

        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, username, password_hash FROM admins WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    /// Stores a new admin and returns its id.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - username taken
    pub async fn insert(&self, username: &str, password_hash: &str) -> DbResult<i64> {
        debug!(username, "Inserting admin");

        let result = sqlx::query("INSERT INTO admins (username, password_hash) VALUES (?1, ?2)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::repository::fixtures;

    #[tokio::test]
    async fn test_insert_and_find() {
        let db = fixtures::database().await;
        let repo = db.admins();

        assert_eq!(repo.find_by_username("root").await.unwrap(), None);

        let id = repo.insert("root", "$argon2id$stub").await.unwrap();
        let admin = repo.find_by_username("root").await.unwrap().unwrap();
        assert_eq!(admin.id, id);
        assert_eq!(admin.password_hash, "$argon2id$stub");

        let err = repo.insert("root", "$argon2id$other").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
