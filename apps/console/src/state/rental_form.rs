//! # Rental Form State
//!
//! The rental add/edit form with its live price estimate.
//!
//! ```text
//! set_field(VehicleId | StartDate | ExpectedReturnDate, value)
//!      │
//!      ▼
//! QuoteInputs::from_fields ── incomplete ──► quote = None
//!      │
//!      ▼
//! store.vehicle_rate(id) ── none / error ──► quote = None (logged)
//!      │
//!      ▼
//! quote = Some(rate × billed days)
//! ```
//!
//! The estimate is recomputed when a field changes, never on a timer. Dropping
//! the form writes nothing.

use rentdesk_core::pricing::{Quote, QuoteInputs};
use rentdesk_core::validation::RentalForm;
use rentdesk_core::{Rental, ISO_DATE_FORMAT};
use rentdesk_db::RecordStore;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::ApiError;

/// Editable fields of the rental form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalField {
    VehicleId,
    CustomerId,
    StartDate,
    ExpectedReturnDate,
    ActualReturnDate,
    Status,
}

impl RentalField {
    pub const ALL: [RentalField; 6] = [
        RentalField::VehicleId,
        RentalField::CustomerId,
        RentalField::StartDate,
        RentalField::ExpectedReturnDate,
        RentalField::ActualReturnDate,
        RentalField::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RentalField::VehicleId => "vehicle_id",
            RentalField::CustomerId => "customer_id",
            RentalField::StartDate => "start_date",
            RentalField::ExpectedReturnDate => "expected_return_date",
            RentalField::ActualReturnDate => "actual_return_date",
            RentalField::Status => "status",
        }
    }

    /// Whether a change to this field can move the estimate.
    fn affects_quote(&self) -> bool {
        matches!(
            self,
            RentalField::VehicleId | RentalField::StartDate | RentalField::ExpectedReturnDate
        )
    }
}

impl FromStr for RentalField {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        RentalField::ALL
            .into_iter()
            .find(|field| field.as_str() == key)
            .ok_or_else(|| {
                let names: Vec<&str> = RentalField::ALL.iter().map(|f| f.as_str()).collect();
                ApiError::validation(format!(
                    "Unknown rental field '{}' ({})",
                    s.trim(),
                    names.join(", ")
                ))
            })
    }
}

/// An open rental form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalFormState {
    pub form: RentalForm,
    /// Rental being edited; `None` for a new rental.
    pub editing: Option<i64>,
    /// Latest estimate, if the inputs were complete.
    pub quote: Option<Quote>,
}

impl RentalFormState {
    /// A blank form for a new rental.
    pub fn new() -> Self {
        RentalFormState::default()
    }

    /// A form prefilled from a stored rental. Call [`refresh_quote`](Self::refresh_quote)
    /// to show its estimate.
    pub fn from_rental(rental: &Rental) -> Self {
        RentalFormState {
            form: RentalForm {
                vehicle_id: rental.vehicle_id.to_string(),
                customer_id: rental.customer_id.to_string(),
                start_date: rental.start_date.format(ISO_DATE_FORMAT).to_string(),
                expected_return_date: rental
                    .expected_return_date
                    .format(ISO_DATE_FORMAT)
                    .to_string(),
                actual_return_date: rental
                    .actual_return_date
                    .map(|d| d.format(ISO_DATE_FORMAT).to_string())
                    .unwrap_or_default(),
                status: rental.status.to_string(),
            },
            editing: Some(rental.id),
            quote: None,
        }
    }

    pub fn value(&self, field: RentalField) -> &str {
        match field {
            RentalField::VehicleId => &self.form.vehicle_id,
            RentalField::CustomerId => &self.form.customer_id,
            RentalField::StartDate => &self.form.start_date,
            RentalField::ExpectedReturnDate => &self.form.expected_return_date,
            RentalField::ActualReturnDate => &self.form.actual_return_date,
            RentalField::Status => &self.form.status,
        }
    }

    fn slot(&mut self, field: RentalField) -> &mut String {
        match field {
            RentalField::VehicleId => &mut self.form.vehicle_id,
            RentalField::CustomerId => &mut self.form.customer_id,
            RentalField::StartDate => &mut self.form.start_date,
            RentalField::ExpectedReturnDate => &mut self.form.expected_return_date,
            RentalField::ActualReturnDate => &mut self.form.actual_return_date,
            RentalField::Status => &mut self.form.status,
        }
    }

    /// Changes one field and recomputes the estimate if it depends on it.
    pub async fn set_field<S>(&mut self, store: &S, field: RentalField, value: &str)
    where
        S: RecordStore + ?Sized,
    {
        *self.slot(field) = value.to_string();
        if field.affects_quote() {
            self.refresh_quote(store).await;
        }
    }

    /// Recomputes the estimate from the current fields.
    ///
    /// Incomplete inputs, an unknown vehicle, or a store error all leave
    /// the estimate empty.
    pub async fn refresh_quote<S>(&mut self, store: &S)
    where
        S: RecordStore + ?Sized,
    {
        self.quote = None;

        let Some(inputs) = QuoteInputs::from_fields(
            &self.form.vehicle_id,
            &self.form.start_date,
            &self.form.expected_return_date,
        ) else {
            return;
        };

        match store.vehicle_rate(inputs.vehicle_id).await {
            Ok(Some(rate)) => match inputs.price_with(rate) {
                Some(quote) => {
                    debug!(vehicle_id = inputs.vehicle_id, %quote, "Estimate updated");
                    self.quote = Some(quote);
                }
                None => {
                    debug!(vehicle_id = inputs.vehicle_id, "Estimate overflows");
                }
            },
            Ok(None) => {
                debug!(vehicle_id = inputs.vehicle_id, "No rate for estimate");
            }
            Err(e) => {
                warn!(vehicle_id = inputs.vehicle_id, error = %e, "Could not read rate for estimate");
            }
        }
    }

    /// The estimate as shown under the form.
    pub fn quote_text(&self) -> String {
        self.quote.map(|q| q.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentdesk_core::validation::VehicleDraft;
    use rentdesk_core::Money;
    use rentdesk_db::{Database, DbConfig};

    async fn store_with_vehicle(rate_cents: i64) -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let id = db
            .insert_vehicle(&VehicleDraft {
                reg_no: "KA-01".into(),
                make: "Toyota".into(),
                model: "Etios".into(),
                year: 2019,
                rate_per_day: Money::from_cents(rate_cents),
            })
            .await
            .unwrap();
        (db, id)
    }

    #[tokio::test]
    async fn test_quote_follows_field_changes() {
        let (db, id) = store_with_vehicle(5000).await;
        let mut state = RentalFormState::new();

        state.set_field(&db, RentalField::VehicleId, &id.to_string()).await;
        assert_eq!(state.quote, None);

        state.set_field(&db, RentalField::StartDate, "2024-01-01").await;
        let quote = state.quote.unwrap();
        assert_eq!(quote.days, 1);
        assert_eq!(quote.amount, Money::from_cents(5000));

        state.set_field(&db, RentalField::ExpectedReturnDate, "03/01/2024").await;
        assert_eq!(state.quote_text(), "150.00   ( 3 days @ 50.00 )");

        state.set_field(&db, RentalField::StartDate, "not a date").await;
        assert_eq!(state.quote, None);
        assert_eq!(state.quote_text(), "");
    }

    #[tokio::test]
    async fn test_unknown_vehicle_gives_no_quote() {
        let (db, _) = store_with_vehicle(5000).await;
        let mut state = RentalFormState::new();

        state.set_field(&db, RentalField::StartDate, "2024-01-01").await;
        state.set_field(&db, RentalField::VehicleId, "999").await;
        assert_eq!(state.quote, None);
    }

    #[tokio::test]
    async fn test_store_failure_gives_no_quote() {
        let (db, id) = store_with_vehicle(5000).await;
        let mut state = RentalFormState::new();
        state.set_field(&db, RentalField::StartDate, "2024-01-01").await;

        db.close().await;
        state.set_field(&db, RentalField::VehicleId, &id.to_string()).await;
        assert_eq!(state.quote, None);
    }

    #[test]
    fn test_from_rental_prefills_iso_dates() {
        let date = |s: &str| chrono::NaiveDate::parse_from_str(s, ISO_DATE_FORMAT).unwrap();
        let rental = Rental {
            id: 4,
            vehicle_id: 1,
            customer_id: 2,
            start_date: date("2024-01-01"),
            expected_return_date: date("2024-01-03"),
            actual_return_date: None,
            status: rentdesk_core::RentalStatus::Ongoing,
            amount_cents: Some(15000),
        };

        let state = RentalFormState::from_rental(&rental);
        assert_eq!(state.editing, Some(4));
        assert_eq!(state.value(RentalField::StartDate), "2024-01-01");
        assert_eq!(state.value(RentalField::ActualReturnDate), "");
        assert_eq!(state.value(RentalField::Status), "ongoing");
    }

    #[test]
    fn test_field_names() {
        assert_eq!(
            "expected_return_date".parse::<RentalField>().unwrap(),
            RentalField::ExpectedReturnDate
        );
        assert!("amount".parse::<RentalField>().is_err());
    }
}
