//! # rentdesk-core: Pure Business Rules for Rentdesk
//!
//! This crate holds every rule that decides what a rental costs and when a
//! vehicle may be handed out. It has zero I/O dependencies: the store and the
//! front-end are collaborators that call in with plain values.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rentdesk Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Operator front-end (console)                    │   │
//! │  │    Vehicles ──► Customers ──► Rentals ──► Rental form          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ rentdesk-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────────┐ ┌────────────┐     │   │
//! │  │   │  dates  │ │ pricing │ │ availability │ │ validation │     │   │
//! │  │   └─────────┘ └─────────┘ └──────────────┘ └────────────┘     │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                rentdesk-db (Database Layer)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Vehicle, Customer, Rental, Admin)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`dates`] - Free-form date normalization
//! - [`pricing`] - Inclusive day-count rental pricing
//! - [`availability`] - Vehicle available/rented state machine
//! - [`validation`] - Form validation for saves
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rentdesk_core::money::Money;
//! use rentdesk_core::pricing::price;
//!
//! let rate = Money::parse_decimal("50.00").unwrap();
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
//!
//! let quote = price(rate, start, Some(end)).unwrap();
//! assert_eq!(quote.days, 3);
//! assert_eq!(quote.amount.cents(), 15000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod dates;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, FormatError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Canonical storage and display format for every date in the system.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Upper bound for a vehicle model year accepted by the vehicle form.
pub const MAX_VEHICLE_YEAR: i64 = 2100;

/// Lower bound for a vehicle model year accepted by the vehicle form.
pub const MIN_VEHICLE_YEAR: i64 = 1886;

/// Highest daily rate the vehicle form accepts, in cents (100,000,000.00).
pub const MAX_RATE_CENTS: i64 = 10_000_000_000;
