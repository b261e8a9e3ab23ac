//! # rentdesk-db: Database Layer for Rentdesk
//!
//! Database access for Rentdesk: SQLite through sqlx, one repository per
//! table, and the [`RecordStore`] trait the console programs against.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rentdesk Data Flow                               │
//! │                                                                         │
//! │  Console command (rental save)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   rentdesk-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ VehicleRepo   │    │  (embedded)  │  │   │
//! │  │   │               │    │ CustomerRepo  │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ RentalRepo    │    │ 001_initial  │  │   │
//! │  │   │               │    │ AdminRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           ▲                                                     │   │
//! │  │           └── impl RecordStore (store.rs)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (platform data dir)/rentdesk.db                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Per-table repositories
//! - [`store`] - The `RecordStore` trait
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rentdesk_db::{Database, DbConfig, RecordStore};
//!
//! let db = Database::new(DbConfig::new("rentdesk.db")).await?;
//! let rate = db.vehicle_rate(7).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::RecordStore;

pub use repository::admin::AdminRepository;
pub use repository::customer::CustomerRepository;
pub use repository::rental::RentalRepository;
pub use repository::vehicle::VehicleRepository;
