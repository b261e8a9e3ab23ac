//! # Customer Commands
//!
//! Deleting a customer removes their rentals first. Vehicles that were out on
//! one of those rentals are set back to available once the customer is gone.

use rentdesk_core::validation::{validate_customer, CustomerForm};
use rentdesk_core::{Customer, VehicleStatus};
use rentdesk_db::RecordStore;
use std::collections::BTreeSet;
use tracing::{info, warn};

use super::CascadeReport;
use crate::error::ApiError;

pub async fn list<S>(store: &S) -> Result<Vec<Customer>, ApiError>
where
    S: RecordStore + ?Sized,
{
    Ok(store.list_customers().await?)
}

pub async fn get<S>(store: &S, id: i64) -> Result<Customer, ApiError>
where
    S: RecordStore + ?Sized,
{
    store
        .get_customer(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Customer", id))
}

/// Inserts (`id = None`) or updates a customer. Returns its id.
pub async fn save<S>(store: &S, id: Option<i64>, form: &CustomerForm) -> Result<i64, ApiError>
where
    S: RecordStore + ?Sized,
{
    let draft = validate_customer(form)?;

    match id {
        Some(id) => {
            store.update_customer(id, &draft).await?;
            info!(id, "Customer updated");
            Ok(id)
        }
        None => {
            let id = store.insert_customer(&draft).await?;
            info!(id, "Customer added");
            Ok(id)
        }
    }
}

/// Deletes a customer and their rentals, then releases the vehicles their
/// ongoing rentals held.
pub async fn delete<S>(store: &S, id: i64) -> Result<CascadeReport, ApiError>
where
    S: RecordStore + ?Sized,
{
    get(store, id).await?;

    let held: BTreeSet<i64> = store
        .list_rentals()
        .await?
        .iter()
        .filter(|r| r.customer_id == id && r.holds_vehicle())
        .map(|r| r.vehicle_id)
        .collect();

    let rentals_deleted = store.delete_rentals_for_customer(id).await.map_err(|e| {
        warn!(id, error = %e, "Could not delete rentals; customer kept");
        e
    })?;
    store.delete_customer(id).await?;

    let mut vehicles_released = 0;
    for vehicle_id in held {
        store
            .set_vehicle_status(vehicle_id, VehicleStatus::Available)
            .await?;
        vehicles_released += 1;
    }

    info!(id, rentals_deleted, vehicles_released, "Customer deleted");
    Ok(CascadeReport {
        rentals_deleted,
        vehicles_released,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{rental, RecordingStore};
    use crate::error::ErrorCode;
    use rentdesk_core::RentalStatus;

    #[tokio::test]
    async fn test_delete_cascades_and_releases_held_vehicles() {
        let store = RecordingStore::default()
            .with_customer(1)
            .with_vehicle(7, 5000, VehicleStatus::Rented)
            .with_vehicle(8, 5000, VehicleStatus::Available)
            .with_vehicle(9, 5000, VehicleStatus::Rented)
            .with_rental(rental(1, 7, 1, RentalStatus::Ongoing))
            .with_rental(rental(2, 8, 1, RentalStatus::Returned))
            .with_rental(rental(3, 9, 2, RentalStatus::Ongoing));

        let report = delete(&store, 1).await.unwrap();

        assert_eq!(report.rentals_deleted, 2);
        assert_eq!(report.vehicles_released, 1);
        assert_eq!(
            store.mutations(),
            vec![
                "delete_rentals_for_customer(1)",
                "delete_customer(1)",
                "set_vehicle_status(7, available)",
            ]
        );
        assert_eq!(store.vehicle_status_now(7), Some(VehicleStatus::Available));
        assert_eq!(store.vehicle_status_now(9), Some(VehicleStatus::Rented));
    }

    #[tokio::test]
    async fn test_rental_delete_failure_keeps_customer() {
        let store = RecordingStore::default()
            .with_customer(1)
            .failing("delete_rentals_for_customer");

        delete(&store, 1).await.unwrap_err();

        assert!(!store.calls().iter().any(|c| c == "delete_customer(1)"));
        assert_eq!(store.customers.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_blank_email_is_rejected() {
        let store = RecordingStore::default();
        let form = CustomerForm {
            name: "Asha".into(),
            phone: "98450".into(),
            email: "  ".into(),
        };

        let err = save(&store, None, &form).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "email is required");
        assert!(store.calls().is_empty());
    }
}
