//! # Vehicle Commands
//!
//! ## Delete Cascade
//! ```text
//! delete(7)
//!   │
//!   ├── get_vehicle(7) ─────────── missing ──► NOT_FOUND, nothing written
//!   ├── delete_rentals_for_vehicle(7) ─ err ─► reported, vehicle untouched
//!   └── delete_vehicle(7)
//! ```
//! The two deletes are separate statements. If the second fails the rentals
//! are already gone.

use rentdesk_core::validation::{validate_vehicle, VehicleForm};
use rentdesk_core::Vehicle;
use rentdesk_db::RecordStore;
use tracing::{info, warn};

use super::CascadeReport;
use crate::error::ApiError;

/// Lists vehicles, newest first.
pub async fn list<S>(store: &S) -> Result<Vec<Vehicle>, ApiError>
where
    S: RecordStore + ?Sized,
{
    Ok(store.list_vehicles().await?)
}

pub async fn get<S>(store: &S, id: i64) -> Result<Vehicle, ApiError>
where
    S: RecordStore + ?Sized,
{
    store
        .get_vehicle(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Vehicle", id))
}

/// Inserts (`id = None`) or updates a vehicle. Returns its id.
///
/// Invalid forms never reach the store.
pub async fn save<S>(store: &S, id: Option<i64>, form: &VehicleForm) -> Result<i64, ApiError>
where
    S: RecordStore + ?Sized,
{
    let draft = validate_vehicle(form)?;

    match id {
        Some(id) => {
            store.update_vehicle(id, &draft).await?;
            info!(id, reg_no = %draft.reg_no, "Vehicle updated");
            Ok(id)
        }
        None => {
            let id = store.insert_vehicle(&draft).await?;
            info!(id, reg_no = %draft.reg_no, "Vehicle added");
            Ok(id)
        }
    }
}

/// Deletes a vehicle and every rental that references it.
pub async fn delete<S>(store: &S, id: i64) -> Result<CascadeReport, ApiError>
where
    S: RecordStore + ?Sized,
{
    get(store, id).await?;

    let rentals_deleted = store.delete_rentals_for_vehicle(id).await.map_err(|e| {
        warn!(id, error = %e, "Could not delete rentals; vehicle kept");
        e
    })?;
    store.delete_vehicle(id).await?;

    info!(id, rentals_deleted, "Vehicle deleted");
    Ok(CascadeReport {
        rentals_deleted,
        vehicles_released: 0,
    })
}
