//! # Validation Module
//!
//! Turns raw form text into typed drafts ready for the store.
//!
//! ## Where Validation Sits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form (console / shell)                                       │
//! │  └── Raw strings exactly as typed                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, integer ids, dates normalized to ISO             │
//! │  └── First failing field wins, nothing reaches the store               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE reg_no, foreign keys                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rentdesk_core::validation::{validate_rental, RentalForm};
//!
//! let form = RentalForm {
//!     vehicle_id: "1".into(),
//!     customer_id: "2".into(),
//!     start_date: "01-01-2024".into(),
//!     ..RentalForm::default()
//! };
//! let draft = validate_rental(&form).unwrap();
//! assert_eq!(draft.expected_return_date, draft.start_date);
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::availability::Holding;
use crate::dates::parse_date;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Customer, RentalStatus, Vehicle};
use crate::{MAX_RATE_CENTS, MAX_VEHICLE_YEAR, MIN_VEHICLE_YEAR};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_TEXT_LEN: usize = 200;
const MAX_REG_NO_LEN: usize = 20;

// =============================================================================
// Field Helpers
// =============================================================================

fn required_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(value.to_string())
}

fn integer(field: &str, value: &str) -> ValidationResult<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| ValidationError::NotAnInteger {
            field: field.to_string(),
        })
}

fn date(field: &str, value: &str) -> ValidationResult<Option<NaiveDate>> {
    parse_date(value).map_err(|source| ValidationError::InvalidDate {
        field: field.to_string(),
        source,
    })
}

/// Blank picks the default, like an untouched drop-down.
fn status_or_default<T>(value: &str) -> ValidationResult<T>
where
    T: std::str::FromStr<Err = ValidationError> + Default,
{
    if value.trim().is_empty() {
        Ok(T::default())
    } else {
        value.parse()
    }
}

// =============================================================================
// Rental
// =============================================================================

/// Rental form as typed by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalForm {
    pub vehicle_id: String,
    pub customer_id: String,
    pub start_date: String,
    pub expected_return_date: String,
    pub actual_return_date: String,
    pub status: String,
}

/// A rental that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalDraft {
    pub vehicle_id: i64,
    pub customer_id: i64,
    pub start_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub status: RentalStatus,
}

impl RentalDraft {
    /// Vehicle this draft points at and whether it keeps it out.
    pub fn holding(&self) -> Holding {
        Holding::new(self.vehicle_id, self.status)
    }
}

/// Validates a rental form.
///
/// ## Check Order
/// 1. vehicle id and customer id present
/// 2. vehicle id is an integer
/// 3. customer id is an integer
/// 4. start date present and recognized
/// 5. expected return date recognized (blank means the start date)
/// 6. actual return date recognized (blank means none)
/// 7. expected return date not before start date
/// 8. status is `ongoing` or `returned` (blank means `ongoing`)
///
/// The first failure is returned and names its field.
pub fn validate_rental(form: &RentalForm) -> ValidationResult<RentalDraft> {
    if form.vehicle_id.trim().is_empty() {
        return Err(ValidationError::required("vehicle_id"));
    }
    if form.customer_id.trim().is_empty() {
        return Err(ValidationError::required("customer_id"));
    }
    let vehicle_id = integer("vehicle_id", &form.vehicle_id)?;
    let customer_id = integer("customer_id", &form.customer_id)?;

    let start_date =
        date("start_date", &form.start_date)?.ok_or_else(|| ValidationError::required("start_date"))?;
    let expected_return_date =
        date("expected_return_date", &form.expected_return_date)?.unwrap_or(start_date);
    let actual_return_date = date("actual_return_date", &form.actual_return_date)?;

    if expected_return_date < start_date {
        return Err(ValidationError::DateBeforeStart {
            field: "expected_return_date".to_string(),
            before: "start_date".to_string(),
        });
    }

    let status = status_or_default::<RentalStatus>(&form.status)?;

    Ok(RentalDraft {
        vehicle_id,
        customer_id,
        start_date,
        expected_return_date,
        actual_return_date,
        status,
    })
}

// =============================================================================
// Vehicle
// =============================================================================

/// Vehicle form as typed by the operator.
///
/// There is no status field: only rentals move a vehicle between
/// `available` and `rented`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleForm {
    pub reg_no: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub rate_per_day: String,
}

/// Prefills the form from a stored vehicle for editing.
impl From<&Vehicle> for VehicleForm {
    fn from(v: &Vehicle) -> Self {
        VehicleForm {
            reg_no: v.reg_no.clone(),
            make: v.make.clone(),
            model: v.model.clone(),
            year: v.year.to_string(),
            rate_per_day: v.rate().to_string(),
        }
    }
}

/// A vehicle that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDraft {
    pub reg_no: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub rate_per_day: Money,
}

/// Validates a vehicle form.
///
/// ## Rules
/// - `reg_no`, `make`, `model` required
/// - `year` an integer between [`MIN_VEHICLE_YEAR`] and [`MAX_VEHICLE_YEAR`]
/// - `rate_per_day` a positive decimal with at most two decimals, no more
///   than [`MAX_RATE_CENTS`]
///
/// ## Example
/// ```rust
/// use rentdesk_core::validation::{validate_vehicle, VehicleForm};
///
/// let form = VehicleForm {
///     reg_no: "KA-01-1234".into(),
///     make: "Toyota".into(),
///     model: "Corolla".into(),
///     year: "2020".into(),
///     rate_per_day: "50".into(),
/// };
/// assert_eq!(validate_vehicle(&form).unwrap().rate_per_day.cents(), 5000);
/// ```
pub fn validate_vehicle(form: &VehicleForm) -> ValidationResult<VehicleDraft> {
    let reg_no = required_text("reg_no", &form.reg_no, MAX_REG_NO_LEN)?;
    let make = required_text("make", &form.make, MAX_TEXT_LEN)?;
    let model = required_text("model", &form.model, MAX_TEXT_LEN)?;

    if form.year.trim().is_empty() {
        return Err(ValidationError::required("year"));
    }
    let year = integer("year", &form.year)?;
    if !(MIN_VEHICLE_YEAR..=MAX_VEHICLE_YEAR).contains(&year) {
        return Err(ValidationError::OutOfRange {
            field: "year".to_string(),
            min: MIN_VEHICLE_YEAR,
            max: MAX_VEHICLE_YEAR,
        });
    }

    let rate_per_day =
        Money::parse_decimal(&form.rate_per_day).map_err(|e| e.with_field("rate_per_day"))?;
    if !rate_per_day.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "rate_per_day".to_string(),
        });
    }
    if rate_per_day.cents() > MAX_RATE_CENTS {
        return Err(ValidationError::TooLarge {
            field: "rate_per_day".to_string(),
            max: Money::from_cents(MAX_RATE_CENTS),
        });
    }

    Ok(VehicleDraft {
        reg_no,
        make,
        model,
        // Range-checked above.
        year: year as i32,
        rate_per_day,
    })
}

// =============================================================================
// Customer
// =============================================================================

/// Customer form as typed by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerForm {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl From<&Customer> for CustomerForm {
    fn from(c: &Customer) -> Self {
        CustomerForm {
            name: c.name.clone(),
            phone: c.phone.clone(),
            email: c.email.clone(),
        }
    }
}

/// A customer that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Validates a customer form: name, phone and email are all required.
pub fn validate_customer(form: &CustomerForm) -> ValidationResult<CustomerDraft> {
    Ok(CustomerDraft {
        name: required_text("name", &form.name, MAX_TEXT_LEN)?,
        phone: required_text("phone", &form.phone, MAX_TEXT_LEN)?,
        email: required_text("email", &form.email, MAX_TEXT_LEN)?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rental_form() -> RentalForm {
        RentalForm {
            vehicle_id: "1".to_string(),
            customer_id: "2".to_string(),
            start_date: "2024-01-01".to_string(),
            expected_return_date: "03-01-2024".to_string(),
            actual_return_date: String::new(),
            status: "ongoing".to_string(),
        }
    }

    fn vehicle_form() -> VehicleForm {
        VehicleForm {
            reg_no: "KA-01-1234".to_string(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: "2020".to_string(),
            rate_per_day: "50.00".to_string(),
        }
    }

    #[test]
    fn test_valid_rental() {
        let draft = validate_rental(&rental_form()).unwrap();
        assert_eq!(draft.vehicle_id, 1);
        assert_eq!(draft.customer_id, 2);
        assert_eq!(draft.expected_return_date.to_string(), "2024-01-03");
        assert_eq!(draft.actual_return_date, None);
        assert_eq!(draft.holding(), Holding::new(1, RentalStatus::Ongoing));
    }

    #[test]
    fn test_rental_ids_required_before_anything_else() {
        let form = RentalForm {
            vehicle_id: " ".to_string(),
            start_date: "garbage".to_string(),
            ..rental_form()
        };
        assert_eq!(
            validate_rental(&form).unwrap_err(),
            ValidationError::required("vehicle_id")
        );

        let form = RentalForm {
            vehicle_id: "x".to_string(),
            customer_id: String::new(),
            ..rental_form()
        };
        assert_eq!(validate_rental(&form).unwrap_err().field(), "customer_id");
    }

    #[test]
    fn test_rental_ids_must_be_integers() {
        let form = RentalForm {
            vehicle_id: "one".to_string(),
            customer_id: "two".to_string(),
            ..rental_form()
        };
        assert!(matches!(
            validate_rental(&form).unwrap_err(),
            ValidationError::NotAnInteger { field } if field == "vehicle_id"
        ));

        let form = RentalForm {
            customer_id: "2.5".to_string(),
            ..rental_form()
        };
        assert_eq!(validate_rental(&form).unwrap_err().field(), "customer_id");
    }

    #[test]
    fn test_rental_start_required() {
        let form = RentalForm {
            start_date: "   ".to_string(),
            ..rental_form()
        };
        assert_eq!(
            validate_rental(&form).unwrap_err(),
            ValidationError::required("start_date")
        );
    }

    #[test]
    fn test_rental_bad_date_names_field() {
        let form = RentalForm {
            actual_return_date: "later".to_string(),
            ..rental_form()
        };
        let err = validate_rental(&form).unwrap_err();
        assert_eq!(err.field(), "actual_return_date");
        assert!(err.to_string().contains("Unrecognized date format: 'later'"));
    }

    #[test]
    fn test_rental_expected_defaults_to_start() {
        let form = RentalForm {
            expected_return_date: String::new(),
            ..rental_form()
        };
        let draft = validate_rental(&form).unwrap();
        assert_eq!(draft.expected_return_date, draft.start_date);
    }

    #[test]
    fn test_rental_expected_before_start_is_rejected() {
        let form = RentalForm {
            start_date: "2024-01-05".to_string(),
            expected_return_date: "2024-01-01".to_string(),
            ..rental_form()
        };
        assert_eq!(
            validate_rental(&form).unwrap_err(),
            ValidationError::DateBeforeStart {
                field: "expected_return_date".to_string(),
                before: "start_date".to_string(),
            }
        );
    }

    #[test]
    fn test_rental_status() {
        let form = RentalForm {
            status: "Returned".to_string(),
            ..rental_form()
        };
        assert_eq!(validate_rental(&form).unwrap().status, RentalStatus::Returned);

        let form = RentalForm {
            status: String::new(),
            ..rental_form()
        };
        assert_eq!(validate_rental(&form).unwrap().status, RentalStatus::Ongoing);

        let form = RentalForm {
            status: "lost".to_string(),
            ..rental_form()
        };
        assert_eq!(validate_rental(&form).unwrap_err().field(), "status");
    }

    #[test]
    fn test_valid_vehicle() {
        let draft = validate_vehicle(&vehicle_form()).unwrap();
        assert_eq!(draft.year, 2020);
        assert_eq!(draft.rate_per_day, Money::from_cents(5000));
    }

    #[test]
    fn test_vehicle_text_fields_required() {
        for field in ["reg_no", "make", "model"] {
            let mut form = vehicle_form();
            match field {
                "reg_no" => form.reg_no.clear(),
                "make" => form.make.clear(),
                _ => form.model.clear(),
            }
            assert_eq!(validate_vehicle(&form).unwrap_err().field(), field);
        }
    }

    #[test]
    fn test_vehicle_year() {
        let form = VehicleForm {
            year: "twenty".to_string(),
            ..vehicle_form()
        };
        assert!(matches!(
            validate_vehicle(&form).unwrap_err(),
            ValidationError::NotAnInteger { .. }
        ));

        let form = VehicleForm {
            year: "1200".to_string(),
            ..vehicle_form()
        };
        assert!(matches!(
            validate_vehicle(&form).unwrap_err(),
            ValidationError::OutOfRange { .. }
        ));
    }

    #[test]
    fn test_vehicle_rate() {
        let form = VehicleForm {
            rate_per_day: "0".to_string(),
            ..vehicle_form()
        };
        assert_eq!(
            validate_vehicle(&form).unwrap_err(),
            ValidationError::MustBePositive {
                field: "rate_per_day".to_string()
            }
        );

        let form = VehicleForm {
            rate_per_day: "12.345".to_string(),
            ..vehicle_form()
        };
        assert_eq!(validate_vehicle(&form).unwrap_err().field(), "rate_per_day");

        let form = VehicleForm {
            rate_per_day: String::new(),
            ..vehicle_form()
        };
        assert_eq!(
            validate_vehicle(&form).unwrap_err(),
            ValidationError::required("rate_per_day")
        );
    }

    #[test]
    fn test_forms_prefill_from_stored_records() {
        let vehicle = Vehicle {
            id: 3,
            reg_no: "KA-01-1234".to_string(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            rate_per_day_cents: 5050,
            status: crate::types::VehicleStatus::Rented,
        };
        let form = VehicleForm::from(&vehicle);
        assert_eq!(form.year, "2020");
        assert_eq!(form.rate_per_day, "50.50");
        assert_eq!(validate_vehicle(&form).unwrap().rate_per_day.cents(), 5050);

        let customer = Customer {
            id: 1,
            name: "Asha".to_string(),
            phone: "98450".to_string(),
            email: "asha@example.com".to_string(),
        };
        assert_eq!(CustomerForm::from(&customer).email, "asha@example.com");
    }

    #[test]
    fn test_vehicle_rate_upper_bound() {
        let form = VehicleForm {
            rate_per_day: "50000000000000000".to_string(),
            ..vehicle_form()
        };
        let err = validate_vehicle(&form).unwrap_err();
        assert_eq!(err.field(), "rate_per_day");
        assert_eq!(err.to_string(), "rate_per_day must be at most 100000000.00");

        let form = VehicleForm {
            rate_per_day: "100000000.00".to_string(),
            ..vehicle_form()
        };
        assert!(validate_vehicle(&form).is_ok());
    }

    #[test]
    fn test_customer_all_fields_required() {
        let form = CustomerForm {
            name: " Asha ".to_string(),
            phone: "555-0100".to_string(),
            email: "asha@example.com".to_string(),
        };
        let draft = validate_customer(&form).unwrap();
        assert_eq!(draft.name, "Asha");

        let form = CustomerForm {
            email: " ".to_string(),
            ..form
        };
        assert_eq!(
            validate_customer(&form).unwrap_err(),
            ValidationError::required("email")
        );
    }
}
