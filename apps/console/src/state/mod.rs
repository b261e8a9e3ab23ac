//! # State Module
//!
//! Console state, kept as separate types so each command takes only what it
//! needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │   DbState    │  │ ConfigState  │  │  AppState    │  │ RentalForm │  │
//! │  │              │  │              │  │              │  │   State    │  │
//! │  │  Database    │  │  db path     │  │  page        │  │  fields    │  │
//! │  │  (SQLite     │  │  currency    │  │  selection   │  │  editing   │  │
//! │  │   pool)      │  │  pool size   │  │              │  │  quote     │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └────────────┘  │
//! │                                                                         │
//! │  Single operator, single task: plain ownership, no locks.              │
//! │  ConfigState is read-only after startup.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod rental_form;
mod view;

pub use config::{default_database_path, ConfigState, DATABASE_FILE};
pub use db::DbState;
pub use rental_form::{RentalField, RentalFormState};
pub use view::{AppState, Page};
