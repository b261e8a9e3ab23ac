//! # Vehicle Repository
//!
//! Database operations for the fleet.
//!
//! The rental flows only ever need two columns of a vehicle, so
//! [`VehicleRepository::rate`] and [`VehicleRepository::status`] read just
//! those instead of the whole row.

use rentdesk_core::validation::VehicleDraft;
use rentdesk_core::{Money, Vehicle, VehicleStatus};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

const SELECT_VEHICLE: &str = r#"
    SELECT id, reg_no, make, model, year, rate_per_day_cents, status
    FROM vehicles
"#;

/// Repository for vehicle database operations.
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    pool: SqlitePool,
}

impl VehicleRepository {
    /// Creates a new VehicleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        VehicleRepository { pool }
    }

    /// Lists all vehicles, newest first.
    pub async fn list(&self) -> DbResult<Vec<Vehicle>> {
        debug!("Listing vehicles");

        let vehicles = sqlx::query_as::<_, Vehicle>(&format!("{SELECT_VEHICLE} ORDER BY id DESC"))
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    /// Gets a vehicle by its ID.
    pub async fn get(&self, id: i64) -> DbResult<Option<Vehicle>> {
        debug!(id, "Fetching vehicle");

        let vehicle = sqlx::query_as::<_, Vehicle>(&format!("{SELECT_VEHICLE} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Daily rate of a vehicle, `None` when it does not exist.
    pub async fn rate(&self, id: i64) -> DbResult<Option<Money>> {
        let cents: Option<i64> =
            sqlx::query_scalar("SELECT rate_per_day_cents FROM vehicles WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(cents.map(Money::from_cents))
    }

    /// Current status of a vehicle, `None` when it does not exist.
    pub async fn status(&self, id: i64) -> DbResult<Option<VehicleStatus>> {
        let status: Option<VehicleStatus> =
            sqlx::query_scalar("SELECT status FROM vehicles WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(status)
    }

    /// Inserts a vehicle and returns its new id.
    ///
    /// New vehicles start out `available` through the column default.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - `reg_no` already registered
    pub async fn insert(&self, draft: &VehicleDraft) -> DbResult<i64> {
        debug!(reg_no = %draft.reg_no, "Inserting vehicle");

        let result = sqlx::query(
            r#"
            INSERT INTO vehicles (reg_no, make, model, year, rate_per_day_cents)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&draft.reg_no)
        .bind(&draft.make)
        .bind(&draft.model)
        .bind(draft.year)
        .bind(draft.rate_per_day.cents())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrites every editable field of a vehicle. Status is left alone;
    /// it only moves through [`VehicleRepository::set_status`].
    pub async fn update(&self, id: i64, draft: &VehicleDraft) -> DbResult<()> {
        debug!(id, "Updating vehicle");

        let result = sqlx::query(
            r#"
            UPDATE vehicles SET
                reg_no = ?2,
                make = ?3,
                model = ?4,
                year = ?5,
                rate_per_day_cents = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&draft.reg_no)
        .bind(&draft.make)
        .bind(&draft.model)
        .bind(draft.year)
        .bind(draft.rate_per_day.cents())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Vehicle", id));
        }

        Ok(())
    }

    /// Sets a vehicle's availability.
    pub async fn set_status(&self, id: i64, status: VehicleStatus) -> DbResult<()> {
        debug!(id, %status, "Setting vehicle status");

        let result = sqlx::query("UPDATE vehicles SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Vehicle", id));
        }

        Ok(())
    }

    /// Deletes a vehicle. Rentals referencing it must be gone first.
    ///
    /// ## Errors
    /// * `DbError::ForeignKeyViolation` - rentals still reference it
    /// * `DbError::NotFound` - no such vehicle
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting vehicle");

        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Vehicle", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
