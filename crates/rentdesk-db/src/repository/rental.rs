//! # Rental Repository
//!
//! Database operations for rental transactions.
//!
//! ## Bulk Deletes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  delete_for_vehicle(7)   DELETE FROM rentals WHERE vehicle_id = 7      │
//! │  delete_for_customer(3)  DELETE FROM rentals WHERE customer_id = 3     │
//! │                                                                         │
//! │  Both return the number of rows removed and commit immediately.        │
//! │  The parent row is deleted by a separate statement afterwards.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rentdesk_core::validation::RentalDraft;
use rentdesk_core::{Money, Rental};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

const SELECT_RENTAL: &str = r#"
    SELECT id, vehicle_id, customer_id, start_date, expected_return_date,
           actual_return_date, status, amount_cents
    FROM rentals
"#;

/// Repository for rental database operations.
#[derive(Debug, Clone)]
pub struct RentalRepository {
    pool: SqlitePool,
}

impl RentalRepository {
    /// Creates a new RentalRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RentalRepository { pool }
    }

    /// Lists all rentals, newest first.
    pub async fn list(&self) -> DbResult<Vec<Rental>> {
        debug!("Listing rentals");

        let rentals = sqlx::query_as::<_, Rental>(&format!("{SELECT_RENTAL} ORDER BY id DESC"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rentals)
    }

    /// Gets a rental by its ID.
    pub async fn get(&self, id: i64) -> DbResult<Option<Rental>> {
        let rental = sqlx::query_as::<_, Rental>(&format!("{SELECT_RENTAL} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rental)
    }

    /// Inserts a rental and returns its new id.
    ///
    /// `amount` is `None` when no quote could be computed at save time.
    pub async fn insert(&self, draft: &RentalDraft, amount: Option<Money>) -> DbResult<i64> {
        debug!(
            vehicle_id = draft.vehicle_id,
            customer_id = draft.customer_id,
            status = %draft.status,
            "Inserting rental"
        );

        let result = sqlx::query(
            r#"
            INSERT INTO rentals (
                vehicle_id, customer_id, start_date, expected_return_date,
                actual_return_date, status, amount_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(draft.vehicle_id)
        .bind(draft.customer_id)
        .bind(draft.start_date)
        .bind(draft.expected_return_date)
        .bind(draft.actual_return_date)
        .bind(draft.status)
        .bind(amount.map(|m| m.cents()))
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrites every field of a rental, including the stored amount.
    pub async fn update(&self, id: i64, draft: &RentalDraft, amount: Option<Money>) -> DbResult<()> {
        debug!(id, status = %draft.status, "Updating rental");

        let result = sqlx::query(
            r#"
            UPDATE rentals SET
                vehicle_id = ?2,
                customer_id = ?3,
                start_date = ?4,
                expected_return_date = ?5,
                actual_return_date = ?6,
                status = ?7,
                amount_cents = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(draft.vehicle_id)
        .bind(draft.customer_id)
        .bind(draft.start_date)
        .bind(draft.expected_return_date)
        .bind(draft.actual_return_date)
        .bind(draft.status)
        .bind(amount.map(|m| m.cents()))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Rental", id));
        }

        Ok(())
    }

    /// Deletes one rental.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting rental");

        let result = sqlx::query("DELETE FROM rentals WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Rental", id));
        }

        Ok(())
    }

    /// Deletes every rental of a vehicle. Returns how many were removed.
    pub async fn delete_for_vehicle(&self, vehicle_id: i64) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM rentals WHERE vehicle_id = ?1")
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        debug!(vehicle_id, removed = result.rows_affected(), "Deleted rentals for vehicle");
        Ok(result.rows_affected())
    }

    /// Deletes every rental of a customer. Returns how many were removed.
    pub async fn delete_for_customer(&self, customer_id: i64) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM rentals WHERE customer_id = ?1")
            .bind(customer_id)
            .execute(&self.pool)
            .await?;

        debug!(customer_id, removed = result.rows_affected(), "Deleted rentals for customer");
        Ok(result.rows_affected())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;
    use rentdesk_core::RentalStatus;

    async fn seeded() -> (crate::Database, i64, i64) {
        let db = fixtures::database().await;
        let vid = db.vehicles().insert(&fixtures::vehicle("KA-01", 5000)).await.unwrap();
        let cid = db.customers().insert(&fixtures::customer("Asha")).await.unwrap();
        (db, vid, cid)
    }

    #[tokio::test]
    async fn test_insert_round_trips_dates_and_amount() {
        let (db, vid, cid) = seeded().await;
        let repo = db.rentals();

        let mut draft = fixtures::rental(vid, cid, RentalStatus::Returned);
        draft.actual_return_date = Some(fixtures::date(2024, 1, 4));
        let id = repo.insert(&draft, Some(Money::from_cents(15000))).await.unwrap();

        let rental = repo.get(id).await.unwrap().unwrap();
        assert_eq!(rental.start_date, fixtures::date(2024, 1, 1));
        assert_eq!(rental.expected_return_date, fixtures::date(2024, 1, 3));
        assert_eq!(rental.actual_return_date, Some(fixtures::date(2024, 1, 4)));
        assert_eq!(rental.status, RentalStatus::Returned);
        assert_eq!(rental.amount(), Some(Money::from_cents(15000)));
    }

    #[tokio::test]
    async fn test_dates_stored_as_iso_text() {
        let (db, vid, cid) = seeded().await;
        let id = db
            .rentals()
            .insert(&fixtures::rental(vid, cid, RentalStatus::Ongoing), None)
            .await
            .unwrap();

        let start: String = sqlx::query_scalar("SELECT start_date FROM rentals WHERE id = ?1")
            .bind(id)
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(start, "2024-01-01");
    }

    #[tokio::test]
    async fn test_unknown_parent_is_foreign_key_violation() {
        let (db, _vid, cid) = seeded().await;
        let err = db
            .rentals()
            .insert(&fixtures::rental(999, cid, RentalStatus::Ongoing), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (db, vid, cid) = seeded().await;
        let repo = db.rentals();
        let id = repo
            .insert(&fixtures::rental(vid, cid, RentalStatus::Ongoing), None)
            .await
            .unwrap();

        let draft = fixtures::rental(vid, cid, RentalStatus::Returned);
        repo.update(id, &draft, Some(Money::from_cents(100))).await.unwrap();
        let rental = repo.get(id).await.unwrap().unwrap();
        assert_eq!(rental.status, RentalStatus::Returned);
        assert_eq!(rental.amount_cents, Some(100));

        repo.delete(id).await.unwrap();
        assert_eq!(repo.get(id).await.unwrap(), None);
        assert!(matches!(
            repo.update(id, &draft, None).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_bulk_delete_by_parent_counts_rows() {
        let (db, vid, cid) = seeded().await;
        let other = db.vehicles().insert(&fixtures::vehicle("KA-02", 5000)).await.unwrap();
        let repo = db.rentals();

        for _ in 0..3 {
            repo.insert(&fixtures::rental(vid, cid, RentalStatus::Returned), None)
                .await
                .unwrap();
        }
        repo.insert(&fixtures::rental(other, cid, RentalStatus::Returned), None)
            .await
            .unwrap();

        assert_eq!(repo.delete_for_vehicle(vid).await.unwrap(), 3);
        assert_eq!(repo.delete_for_vehicle(vid).await.unwrap(), 0);
        assert_eq!(repo.delete_for_customer(cid).await.unwrap(), 1);
        assert!(repo.list().await.unwrap().is_empty());
    }
}
