//! # Repository Module
//!
//! Database repository implementations for Rentdesk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Console command                                                       │
//! │       │                                                                 │
//! │       │  db.vehicles().status(7)                                       │
//! │       ▼                                                                 │
//! │  VehicleRepository                                                     │
//! │  ├── list / get / rate / status                                        │
//! │  ├── insert / update / set_status                                      │
//! │  └── delete                                                            │
//! │       │                                                                 │
//! │       │  Parameterized SQL, typed rows (FromRow)                       │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every statement is autocommitted on its own. Multi-step operations
//! (cascade deletes, rental save plus status change) are sequenced by the
//! caller.
//!
//! ## Available Repositories
//!
//! - [`vehicle::VehicleRepository`] - Fleet records and status
//! - [`customer::CustomerRepository`] - Customer records
//! - [`rental::RentalRepository`] - Rentals, including bulk delete by parent
//! - [`admin::AdminRepository`] - Login accounts

pub mod admin;
pub mod customer;
pub mod rental;
pub mod vehicle;

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;
    use rentdesk_core::validation::{CustomerDraft, RentalDraft, VehicleDraft};
    use rentdesk_core::{Money, RentalStatus};

    use crate::{Database, DbConfig};

    pub async fn database() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn vehicle(reg_no: &str, rate_cents: i64) -> VehicleDraft {
        VehicleDraft {
            reg_no: reg_no.to_string(),
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            rate_per_day: Money::from_cents(rate_cents),
        }
    }

    pub fn customer(name: &str) -> CustomerDraft {
        CustomerDraft {
            name: name.to_string(),
            phone: "555-0100".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    pub fn rental(vehicle_id: i64, customer_id: i64, status: RentalStatus) -> RentalDraft {
        RentalDraft {
            vehicle_id,
            customer_id,
            start_date: date(2024, 1, 1),
            expected_return_date: date(2024, 1, 3),
            actual_return_date: None,
            status,
        }
    }
}
