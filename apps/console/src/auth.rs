//! # Login Gate
//!
//! Admin accounts store an argon2 PHC string (salt included). Login looks the
//! username up, then verifies the supplied password against that hash.
//!
//! ```text
//! username ──► find_admin ──► None ───────────────► AUTH_ERROR "User not found"
//!                  │
//!                  ▼
//!          argon2 verify(password, hash) ── fail ──► AUTH_ERROR "Incorrect password"
//!                  │
//!                  ▼
//!                Admin
//! ```

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rentdesk_core::Admin;
use rentdesk_db::RecordStore;
use tracing::{info, warn};

use crate::error::ApiError;

/// Hashes a password for storage.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Checks a password against a stored hash. A malformed hash never verifies.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

fn require_credentials(username: &str, password: &str) -> Result<(), ApiError> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(ApiError::validation("Enter username and password"));
    }
    Ok(())
}

/// Authenticates an admin.
pub async fn login<S>(store: &S, username: &str, password: &str) -> Result<Admin, ApiError>
where
    S: RecordStore + ?Sized,
{
    require_credentials(username, password)?;
    let username = username.trim();

    let admin = match store.find_admin(username).await? {
        Some(admin) => admin,
        None => {
            warn!(username, "Login failed: unknown user");
            return Err(ApiError::auth("User not found"));
        }
    };

    if !verify_password(password, &admin.password_hash) {
        warn!(username, "Login failed: wrong password");
        return Err(ApiError::auth("Incorrect password"));
    }

    info!(username, "Login successful");
    Ok(admin)
}

/// Creates an admin account with a freshly salted hash.
pub async fn create_admin<S>(store: &S, username: &str, password: &str) -> Result<i64, ApiError>
where
    S: RecordStore + ?Sized,
{
    require_credentials(username, password)?;
    let username = username.trim();

    let hash = hash_password(password)?;
    let id = store.insert_admin(username, &hash).await?;

    info!(id, username, "Admin created");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use rentdesk_db::{Database, DbConfig};

    #[test]
    fn test_hash_is_salted_and_verifies() {
        let a = hash_password("hunter2").unwrap();
        let b = hash_password("hunter2").unwrap();

        assert_ne!(a, b);
        assert!(a.starts_with("$argon2"));
        assert!(verify_password("hunter2", &a));
        assert!(!verify_password("hunter3", &a));
    }

    #[test]
    fn test_plaintext_stored_value_never_verifies() {
        assert!(!verify_password("hunter2", "hunter2"));
    }

    #[tokio::test]
    async fn test_login_flow() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        create_admin(&db, "root", "hunter2").await.unwrap();

        let admin = login(&db, "root", "hunter2").await.unwrap();
        assert_eq!(admin.username, "root");

        let err = login(&db, "ghost", "hunter2").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthError);
        assert_eq!(err.message, "User not found");

        let err = login(&db, "root", "nope").await.unwrap_err();
        assert_eq!(err.message, "Incorrect password");

        let err = login(&db, " ", "").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_duplicate_admin_is_constraint_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        create_admin(&db, "root", "a").await.unwrap();

        let err = create_admin(&db, "root", "b").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConstraintError);
    }
}
