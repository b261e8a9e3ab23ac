//! # Commands Module
//!
//! Operations the CLI and the shell invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports, shared DTOs)
//! ├── vehicle.rs   ◄─── Vehicle list, get, save, cascade delete
//! ├── customer.rs  ◄─── Customer list, get, save, cascade delete
//! └── rental.rs    ◄─── Rental list, quote, save with availability, delete
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI subcommand / shell line                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::rental::save(store: &S, editing, &RentalForm)                │
//! │         │       S: RecordStore + ?Sized  (Database or a test fake)      │
//! │         ├── rentdesk-core: validate, plan availability, price          │
//! │         └── rentdesk-db:   one statement per store call                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Result<T, ApiError>  → table or JSON                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule check runs before the first write. Writes are sequential
//! autocommitted statements; a failure part-way leaves the earlier ones in
//! place and is reported as-is.

use serde::Serialize;

pub mod customer;
pub mod rental;
pub mod vehicle;

/// What a cascade delete removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
    /// Rentals deleted ahead of the parent record.
    pub rentals_deleted: u64,
    /// Vehicles set back to available afterwards.
    pub vehicles_released: u64,
}
