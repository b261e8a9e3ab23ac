//! # Domain Types
//!
//! Core records used throughout Rentdesk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Vehicle      │   │     Rental      │   │    Customer     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (store)     │◄──│  vehicle_id     │   │  id (store)     │       │
//! │  │  reg_no         │   │  customer_id  ──┼──►│  name           │       │
//! │  │  rate_per_day   │   │  start/expected │   │  phone          │       │
//! │  │  status         │   │  status, amount │   │  email          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  VehicleStatus: Available | Rented                                     │
//! │  RentalStatus:  Ongoing   | Returned                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are integers assigned by the store on insert.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Vehicle Status
// =============================================================================

/// Whether a vehicle can be handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    /// On the lot, can be booked.
    #[default]
    Available,
    /// Held by an ongoing rental.
    Rented,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Rented => "rented",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Rental Status
// =============================================================================

/// Lifecycle state of a rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    /// Vehicle is out with the customer.
    #[default]
    Ongoing,
    /// Vehicle came back.
    Returned,
}

impl RentalStatus {
    pub const ALL: [RentalStatus; 2] = [RentalStatus::Ongoing, RentalStatus::Returned];

    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Ongoing => "ongoing",
            RentalStatus::Returned => "returned",
        }
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RentalStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ongoing" => Ok(RentalStatus::Ongoing),
            "returned" => Ok(RentalStatus::Returned),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: RentalStatus::ALL.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Vehicle
// =============================================================================

/// A vehicle in the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Vehicle {
    /// Store-assigned identifier.
    pub id: i64,

    /// Registration (licence plate) number.
    pub reg_no: String,

    pub make: String,

    pub model: String,

    /// Model year.
    pub year: i32,

    /// Daily rate in cents (always > 0).
    pub rate_per_day_cents: i64,

    /// Available or rented.
    pub status: VehicleStatus,
}

impl Vehicle {
    /// Returns the daily rate as Money.
    #[inline]
    pub fn rate(&self) -> Money {
        Money::from_cents(self.rate_per_day_cents)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer who rents vehicles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub email: String,
}

// =============================================================================
// Rental
// =============================================================================

/// A rental transaction.
///
/// `amount_cents` is persisted once computed; it stays `None` when the
/// vehicle's rate could not be resolved at save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Rental {
    pub id: i64,
    pub vehicle_id: i64,
    pub customer_id: i64,
    #[ts(as = "String")]
    pub start_date: NaiveDate,
    /// Never before `start_date`.
    #[ts(as = "String")]
    pub expected_return_date: NaiveDate,
    #[ts(as = "Option<String>")]
    pub actual_return_date: Option<NaiveDate>,
    pub status: RentalStatus,
    pub amount_cents: Option<i64>,
}

impl Rental {
    /// Returns the billed amount, if one was computed.
    #[inline]
    pub fn amount(&self) -> Option<Money> {
        self.amount_cents.map(Money::from_cents)
    }

    /// True while the rental keeps its vehicle unavailable.
    #[inline]
    pub fn holds_vehicle(&self) -> bool {
        self.status == RentalStatus::Ongoing
    }
}

// =============================================================================
// Admin
// =============================================================================

/// An administrator allowed past the login gate.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Admin {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string (salted). Never a plaintext password.
    pub password_hash: String,
}

impl fmt::Debug for Admin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Admin")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_through_text() {
        assert_eq!(" Returned ".parse::<RentalStatus>(), Ok(RentalStatus::Returned));
        assert_eq!(RentalStatus::Ongoing.to_string(), "ongoing");
        assert_eq!(VehicleStatus::Rented.to_string(), "rented");
    }

    #[test]
    fn test_unknown_status_names_allowed_values() {
        let err = "lost".parse::<RentalStatus>().unwrap_err();
        assert_eq!(err.field(), "status");
        assert_eq!(
            err.to_string(),
            r#"status must be one of: ["ongoing", "returned"]"#
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(VehicleStatus::default(), VehicleStatus::Available);
        assert_eq!(RentalStatus::default(), RentalStatus::Ongoing);
    }

    #[test]
    fn test_rental_helpers() {
        let rental = Rental {
            id: 1,
            vehicle_id: 2,
            customer_id: 3,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            expected_return_date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            actual_return_date: None,
            status: RentalStatus::Ongoing,
            amount_cents: Some(15000),
        };
        assert!(rental.holds_vehicle());
        assert_eq!(rental.amount(), Some(Money::from_cents(15000)));
    }

    #[test]
    fn test_admin_debug_hides_hash() {
        let admin = Admin {
            id: 1,
            username: "root".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
        };
        let printed = format!("{:?}", admin);
        assert!(printed.contains("root"));
        assert!(!printed.contains("secret"));
    }
}
