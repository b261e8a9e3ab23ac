//! # Record Store
//!
//! The typed boundary between the console's command layer and persistence.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  commands::rental::save(&dyn RecordStore, ..)                          │
//! │       │                                                                 │
//! │       ├──► Database        (SQLite, production)                        │
//! │       └──► recording fake  (tests: asserts call order, zero writes)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each method is one parameterized statement committed on its own.

use async_trait::async_trait;
use rentdesk_core::validation::{CustomerDraft, RentalDraft, VehicleDraft};
use rentdesk_core::{Admin, Customer, Money, Rental, Vehicle, VehicleStatus};

use crate::error::DbResult;
use crate::pool::Database;

/// Everything the front-end needs from persistence.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // ---- vehicles ----------------------------------------------------------
    async fn list_vehicles(&self) -> DbResult<Vec<Vehicle>>;
    async fn get_vehicle(&self, id: i64) -> DbResult<Option<Vehicle>>;
    /// `None` when the vehicle does not exist.
    async fn vehicle_rate(&self, id: i64) -> DbResult<Option<Money>>;
    /// `None` when the vehicle does not exist.
    async fn vehicle_status(&self, id: i64) -> DbResult<Option<VehicleStatus>>;
    async fn insert_vehicle(&self, draft: &VehicleDraft) -> DbResult<i64>;
    async fn update_vehicle(&self, id: i64, draft: &VehicleDraft) -> DbResult<()>;
    async fn set_vehicle_status(&self, id: i64, status: VehicleStatus) -> DbResult<()>;
    async fn delete_vehicle(&self, id: i64) -> DbResult<()>;

    // ---- customers ---------------------------------------------------------
    async fn list_customers(&self) -> DbResult<Vec<Customer>>;
    async fn get_customer(&self, id: i64) -> DbResult<Option<Customer>>;
    async fn insert_customer(&self, draft: &CustomerDraft) -> DbResult<i64>;
    async fn update_customer(&self, id: i64, draft: &CustomerDraft) -> DbResult<()>;
    async fn delete_customer(&self, id: i64) -> DbResult<()>;

    // ---- rentals -----------------------------------------------------------
    async fn list_rentals(&self) -> DbResult<Vec<Rental>>;
    async fn get_rental(&self, id: i64) -> DbResult<Option<Rental>>;
    async fn insert_rental(&self, draft: &RentalDraft, amount: Option<Money>) -> DbResult<i64>;
    async fn update_rental(
        &self,
        id: i64,
        draft: &RentalDraft,
        amount: Option<Money>,
    ) -> DbResult<()>;
    async fn delete_rental(&self, id: i64) -> DbResult<()>;
    /// Returns the number of rentals removed.
    async fn delete_rentals_for_vehicle(&self, vehicle_id: i64) -> DbResult<u64>;
    /// Returns the number of rentals removed.
    async fn delete_rentals_for_customer(&self, customer_id: i64) -> DbResult<u64>;

    // ---- admins ------------------------------------------------------------
    async fn find_admin(&self, username: &str) -> DbResult<Option<Admin>>;
    async fn insert_admin(&self, username: &str, password_hash: &str) -> DbResult<i64>;
}

#[async_trait]
impl RecordStore for Database {
    async fn list_vehicles(&self) -> DbResult<Vec<Vehicle>> {
        self.vehicles().list().await
    }

    async fn get_vehicle(&self, id: i64) -> DbResult<Option<Vehicle>> {
        self.vehicles().get(id).await
    }

    async fn vehicle_rate(&self, id: i64) -> DbResult<Option<Money>> {
        self.vehicles().rate(id).await
    }

    async fn vehicle_status(&self, id: i64) -> DbResult<Option<VehicleStatus>> {
        self.vehicles().status(id).await
    }

    async fn insert_vehicle(&self, draft: &VehicleDraft) -> DbResult<i64> {
        self.vehicles().insert(draft).await
    }

    async fn update_vehicle(&self, id: i64, draft: &VehicleDraft) -> DbResult<()> {
        self.vehicles().update(id, draft).await
    }

    async fn set_vehicle_status(&self, id: i64, status: VehicleStatus) -> DbResult<()> {
        self.vehicles().set_status(id, status).await
    }

    async fn delete_vehicle(&self, id: i64) -> DbResult<()> {
        self.vehicles().delete(id).await
    }

    async fn list_customers(&self) -> DbResult<Vec<Customer>> {
        self.customers().list().await
    }

    async fn get_customer(&self, id: i64) -> DbResult<Option<Customer>> {
        self.customers().get(id).await
    }

    async fn insert_customer(&self, draft: &CustomerDraft) -> DbResult<i64> {
        self.customers().insert(draft).await
    }

    async fn update_customer(&self, id: i64, draft: &CustomerDraft) -> DbResult<()> {
        self.customers().update(id, draft).await
    }

    async fn delete_customer(&self, id: i64) -> DbResult<()> {
        self.customers().delete(id).await
    }

    async fn list_rentals(&self) -> DbResult<Vec<Rental>> {
        self.rentals().list().await
    }

    async fn get_rental(&self, id: i64) -> DbResult<Option<Rental>> {
        self.rentals().get(id).await
    }

    async fn insert_rental(&self, draft: &RentalDraft, amount: Option<Money>) -> DbResult<i64> {
        self.rentals().insert(draft, amount).await
    }

    async fn update_rental(
        &self,
        id: i64,
        draft: &RentalDraft,
        amount: Option<Money>,
    ) -> DbResult<()> {
        self.rentals().update(id, draft, amount).await
    }

    async fn delete_rental(&self, id: i64) -> DbResult<()> {
        self.rentals().delete(id).await
    }

    async fn delete_rentals_for_vehicle(&self, vehicle_id: i64) -> DbResult<u64> {
        self.rentals().delete_for_vehicle(vehicle_id).await
    }

    async fn delete_rentals_for_customer(&self, customer_id: i64) -> DbResult<u64> {
        self.rentals().delete_for_customer(customer_id).await
    }

    async fn find_admin(&self, username: &str) -> DbResult<Option<Admin>> {
        self.admins().find_by_username(username).await
    }

    async fn insert_admin(&self, username: &str, password_hash: &str) -> DbResult<i64> {
        self.admins().insert(username, password_hash).await
    }
}
