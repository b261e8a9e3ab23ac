//! # Customer Repository

use rentdesk_core::validation::CustomerDraft;
use rentdesk_core::Customer;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists all customers, newest first.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        debug!("Listing customers");

        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, name, phone, email FROM customers ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn get(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, phone, email FROM customers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Inserts a customer and returns its new id.
    pub async fn insert(&self, draft: &CustomerDraft) -> DbResult<i64> {
        debug!(name = %draft.name, "Inserting customer");

        let result = sqlx::query("INSERT INTO customers (name, phone, email) VALUES (?1, ?2, ?3)")
            .bind(&draft.name)
            .bind(&draft.phone)
            .bind(&draft.email)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn update(&self, id: i64, draft: &CustomerDraft) -> DbResult<()> {
        debug!(id, "Updating customer");

        let result =
            sqlx::query("UPDATE customers SET name = ?2, phone = ?3, email = ?4 WHERE id = ?1")
                .bind(id)
                .bind(&draft.name)
                .bind(&draft.phone)
                .bind(&draft.email)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Deletes a customer. Rentals referencing it must be gone first.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;

    #[tokio::test]
    async fn test_crud() {
        let db = fixtures::database().await;
        let repo = db.customers();

        let id = repo.insert(&fixtures::customer("Asha")).await.unwrap();
        assert_eq!(repo.get(id).await.unwrap().unwrap().email, "asha@example.com");

        let mut draft = fixtures::customer("Asha");
        draft.phone = "555-0199".to_string();
        repo.update(id, &draft).await.unwrap();
        assert_eq!(repo.get(id).await.unwrap().unwrap().phone, "555-0199");

        assert_eq!(repo.list().await.unwrap().len(), 1);

        repo.delete(id).await.unwrap();
        assert_eq!(repo.get(id).await.unwrap(), None);
        assert!(matches!(repo.delete(id).await, Err(DbError::NotFound { .. })));
    }
}
