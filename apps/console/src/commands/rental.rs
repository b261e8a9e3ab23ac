//! # Rental Commands
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  save(store, editing, form)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_rental(form) ─────── error ──► VALIDATION_ERROR (no store)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  editing? get_rental(id) ───── missing ─► NOT_FOUND                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ongoing? vehicle_status(vehicle)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  plan_create / plan_update ─── rejected ► BUSINESS_RULE (no writes)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  vehicle_rate → amount (None when the rate can't be read)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  insert_rental / update_rental                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  set_vehicle_status: release, then claim                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use rentdesk_core::availability::{plan_create, plan_delete, plan_update, Holding};
use rentdesk_core::dates::parse_date;
use rentdesk_core::pricing::{price, Quote};
use rentdesk_core::validation::{validate_rental, RentalForm};
use rentdesk_core::{Money, Rental, RentalStatus};
use rentdesk_db::RecordStore;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::CascadeReport;
use crate::error::{ApiError, ErrorCode};

/// A rental as listed, with its amount resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalRow {
    pub id: i64,
    pub vehicle_id: i64,
    pub customer_id: i64,
    pub start_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub status: RentalStatus,
    /// Stored amount, or one computed from the vehicle's current rate.
    pub amount: Option<Money>,
    /// True when `amount` was computed rather than stored.
    pub estimated: bool,
}

impl RentalRow {
    fn new(rental: Rental, rates: &HashMap<i64, Money>) -> Self {
        let (amount, estimated) = match rental.amount() {
            Some(stored) => (Some(stored), false),
            None => {
                let computed = rates.get(&rental.vehicle_id).and_then(|rate| {
                    price(*rate, rental.start_date, Some(rental.expected_return_date))
                        .map(|q| q.amount)
                });
                (computed, computed.is_some())
            }
        };

        RentalRow {
            id: rental.id,
            vehicle_id: rental.vehicle_id,
            customer_id: rental.customer_id,
            start_date: rental.start_date,
            expected_return_date: rental.expected_return_date,
            actual_return_date: rental.actual_return_date,
            status: rental.status,
            amount,
            estimated,
        }
    }
}

/// Lists rentals, newest first.
pub async fn list<S>(store: &S) -> Result<Vec<RentalRow>, ApiError>
where
    S: RecordStore + ?Sized,
{
    let rentals = store.list_rentals().await?;

    let rates: HashMap<i64, Money> = if rentals.iter().any(|r| r.amount_cents.is_none()) {
        store
            .list_vehicles()
            .await?
            .iter()
            .map(|v| (v.id, v.rate()))
            .collect()
    } else {
        HashMap::new()
    };

    Ok(rentals
        .into_iter()
        .map(|r| RentalRow::new(r, &rates))
        .collect())
}

pub async fn get<S>(store: &S, id: i64) -> Result<Rental, ApiError>
where
    S: RecordStore + ?Sized,
{
    store
        .get_rental(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Rental", id))
}

/// Prices a rental period against a vehicle's current rate.
///
/// A blank `end` bills the start day only. A total too large to represent
/// is rejected as a business rule.
pub async fn quote<S>(store: &S, vehicle_id: i64, start: &str, end: &str) -> Result<Quote, ApiError>
where
    S: RecordStore + ?Sized,
{
    let start = parse_date(start)?.ok_or_else(|| ApiError::validation("start_date is required"))?;
    let end = parse_date(end)?;

    let rate = store
        .vehicle_rate(vehicle_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Vehicle", vehicle_id))?;

    price(rate, start, end).ok_or_else(|| {
        ApiError::new(
            ErrorCode::BusinessRule,
            format!("Amount for vehicle {} is too large to compute", vehicle_id),
        )
    })
}

async fn amount_for<S>(store: &S, vehicle_id: i64, start: NaiveDate, end: NaiveDate) -> Option<Money>
where
    S: RecordStore + ?Sized,
{
    match store.vehicle_rate(vehicle_id).await {
        Ok(rate) => {
            let amount = rate
                .and_then(|rate| price(rate, start, Some(end)))
                .map(|q| q.amount);
            if rate.is_some() && amount.is_none() {
                warn!(vehicle_id, "Amount overflows; saving without amount");
            }
            amount
        }
        Err(e) => {
            warn!(vehicle_id, error = %e, "Could not read rate; saving without amount");
            None
        }
    }
}

/// Creates (`editing = None`) or updates a rental and keeps vehicle
/// availability in step. Returns the rental id.
pub async fn save<S>(store: &S, editing: Option<i64>, form: &RentalForm) -> Result<i64, ApiError>
where
    S: RecordStore + ?Sized,
{
    let draft = validate_rental(form)?;

    let before = match editing {
        Some(id) => Some(get(store, id).await?),
        None => None,
    };

    let after = draft.holding();
    let vehicle_status = if draft.status == RentalStatus::Ongoing {
        store.vehicle_status(draft.vehicle_id).await?
    } else {
        None
    };

    let plan = match &before {
        Some(existing) => plan_update(Holding::from(existing), after, vehicle_status),
        None => plan_create(after, vehicle_status),
    }
    .map_err(|e| {
        warn!(vehicle_id = draft.vehicle_id, error = %e, "Rental rejected");
        ApiError::from(e)
    })?;
    debug!(?plan, "Availability plan");

    let amount = amount_for(
        store,
        draft.vehicle_id,
        draft.start_date,
        draft.expected_return_date,
    )
    .await;

    let id = match editing {
        Some(id) => {
            store.update_rental(id, &draft, amount).await?;
            id
        }
        None => store.insert_rental(&draft, amount).await?,
    };

    for (vehicle_id, status) in plan.writes() {
        store.set_vehicle_status(vehicle_id, status).await?;
    }

    info!(
        id,
        vehicle_id = draft.vehicle_id,
        status = %draft.status,
        amount = ?amount.map(|a| a.to_string()),
        edited = editing.is_some(),
        "Rental saved"
    );
    Ok(id)
}

/// Deletes a rental. An ongoing rental gives its vehicle back.
pub async fn delete<S>(store: &S, id: i64) -> Result<CascadeReport, ApiError>
where
    S: RecordStore + ?Sized,
{
    let rental = get(store, id).await?;
    let plan = plan_delete(&rental);

    store.delete_rental(id).await?;

    let mut vehicles_released = 0;
    for (vehicle_id, status) in plan.writes() {
        store.set_vehicle_status(vehicle_id, status).await?;
        vehicles_released += 1;
    }

    info!(id, vehicles_released, "Rental deleted");
    Ok(CascadeReport {
        rentals_deleted: 1,
        vehicles_released,
    })
}
