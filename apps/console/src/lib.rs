//! # Rentdesk Console
//!
//! The operator front-end: a `rentdesk` binary with one-shot subcommands and
//! an interactive shell.
//!
//! ## Startup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Console Startup Sequence                             │
//! │                                                                         │
//! │  1. main()                                                              │
//! │     └── init_tracing() (stderr, RUST_LOG or default filter)            │
//! │     └── Cli::parse()                                                    │
//! │                                                                         │
//! │  2. run(cli)                                                            │
//! │     ├── `date normalize` ──► answered without a database               │
//! │     ├── ConfigState::from_env() + --db                                 │
//! │     ├── DbState::open() (create dir, connect, migrate)                 │
//! │     ├── `init-admin` ──► create_admin, no login                        │
//! │     └── everything else ──► auth::login, then the command              │
//! │                                                                         │
//! │  3. Output                                                              │
//! │     └── table text, or JSON with --json                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod commands;
pub mod error;
pub mod render;
pub mod shell;
pub mod state;

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rentdesk_core::dates;
use rentdesk_core::validation::{CustomerForm, RentalForm, VehicleForm};
use rentdesk_db::RecordStore;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::commands::{customer, rental, vehicle};
use crate::error::ApiError;
use crate::shell::Shell;
use crate::state::{ConfigState, DbState, RentalFormState};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,rentdesk=debug,sqlx=warn";

// =============================================================================
// Command Line
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "rentdesk", about = "Vehicle rental records console", version)]
pub struct Cli {
    /// SQLite database file (defaults to the platform data directory).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Admin username.
    #[arg(long, global = true, env = "RENTDESK_USERNAME")]
    pub username: Option<String>,

    /// Admin password.
    #[arg(long, global = true, env = "RENTDESK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Print JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an admin account from --username and --password.
    InitAdmin,
    /// Manage vehicles.
    Vehicle {
        #[command(subcommand)]
        action: VehicleAction,
    },
    /// Manage customers.
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Manage rentals.
    Rental {
        #[command(subcommand)]
        action: RentalAction,
    },
    /// Date helpers.
    Date {
        #[command(subcommand)]
        action: DateAction,
    },
    /// Interactive session.
    Shell,
}

#[derive(Debug, Subcommand)]
pub enum VehicleAction {
    List,
    Add(VehicleArgs),
    /// Fields left out keep their stored value.
    Edit {
        id: i64,
        #[command(flatten)]
        fields: VehicleArgs,
    },
    /// Also deletes the vehicle's rentals.
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum CustomerAction {
    List,
    Add(CustomerArgs),
    /// Fields left out keep their stored value.
    Edit {
        id: i64,
        #[command(flatten)]
        fields: CustomerArgs,
    },
    /// Also deletes the customer's rentals.
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum RentalAction {
    List,
    Add(RentalArgs),
    /// Fields left out keep their stored value.
    Edit {
        id: i64,
        #[command(flatten)]
        fields: RentalArgs,
    },
    Delete { id: i64 },
    /// Price a period without saving anything.
    Quote {
        vehicle: i64,
        start: String,
        /// Defaults to the start date.
        #[arg(default_value = "")]
        end: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum DateAction {
    /// Print a date as YYYY-MM-DD.
    Normalize { input: String },
}

#[derive(Debug, Clone, Default, Args)]
pub struct VehicleArgs {
    #[arg(long)]
    pub reg_no: Option<String>,
    #[arg(long)]
    pub make: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub year: Option<String>,
    /// Daily rate, e.g. 49.99
    #[arg(long)]
    pub rate: Option<String>,
}

impl VehicleArgs {
    /// Fills the given fields over `base`.
    pub fn apply(self, base: VehicleForm) -> VehicleForm {
        VehicleForm {
            reg_no: self.reg_no.unwrap_or(base.reg_no),
            make: self.make.unwrap_or(base.make),
            model: self.model.unwrap_or(base.model),
            year: self.year.unwrap_or(base.year),
            rate_per_day: self.rate.unwrap_or(base.rate_per_day),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct CustomerArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
}

impl CustomerArgs {
    pub fn apply(self, base: CustomerForm) -> CustomerForm {
        CustomerForm {
            name: self.name.unwrap_or(base.name),
            phone: self.phone.unwrap_or(base.phone),
            email: self.email.unwrap_or(base.email),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct RentalArgs {
    #[arg(long)]
    pub vehicle: Option<String>,
    #[arg(long)]
    pub customer: Option<String>,
    #[arg(long)]
    pub start: Option<String>,
    /// Defaults to the start date.
    #[arg(long)]
    pub expected: Option<String>,
    #[arg(long)]
    pub actual: Option<String>,
    /// ongoing | returned
    #[arg(long)]
    pub status: Option<String>,
}

impl RentalArgs {
    pub fn apply(self, base: RentalForm) -> RentalForm {
        RentalForm {
            vehicle_id: self.vehicle.unwrap_or(base.vehicle_id),
            customer_id: self.customer.unwrap_or(base.customer_id),
            start_date: self.start.unwrap_or(base.start_date),
            expected_return_date: self.expected.unwrap_or(base.expected_return_date),
            actual_return_date: self.actual.unwrap_or(base.actual_return_date),
            status: self.status.unwrap_or(base.status),
        }
    }
}

// =============================================================================
// Tracing
// =============================================================================

/// Initializes logging to stderr so stdout stays clean for tables and JSON.
///
/// ## Log Levels
/// - ERROR: store unreachable
/// - WARN: rejected saves, store refusals
/// - INFO: committed operations
/// - DEBUG: statements, plans, estimates
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Execution
// =============================================================================

#[derive(Serialize)]
struct Saved {
    id: i64,
}

fn output<T: Serialize + ?Sized>(json: bool, value: &T, text: impl FnOnce(&T) -> String) -> Result<String, ApiError> {
    if json {
        render::json(value)
    } else {
        Ok(text(value))
    }
}

fn normalize(input: &str) -> Result<String, ApiError> {
    Ok(dates::normalize_date(input)?.unwrap_or_default())
}

impl Cli {
    fn credentials(&self) -> (&str, &str) {
        (
            self.username.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default(),
        )
    }

    fn config(&self) -> ConfigState {
        let config = ConfigState::from_env();
        match &self.db {
            Some(path) => config.with_database_path(path.clone()),
            None => config,
        }
    }
}

/// Runs one non-interactive command and returns what to print.
pub async fn execute(
    store: &dyn RecordStore,
    config: &ConfigState,
    cli: &Cli,
) -> Result<String, ApiError> {
    let json = cli.json;
    let (username, password) = cli.credentials();

    match &cli.command {
        Command::InitAdmin => {
            let id = auth::create_admin(store, username, password).await?;
            return output(json, &Saved { id }, |s| format!("admin {} created (id {})", username.trim(), s.id));
        }
        Command::Date {
            action: DateAction::Normalize { input },
        } => {
            let iso = normalize(input)?;
            return output(json, &iso, |s| s.clone());
        }
        Command::Shell => {
            return Err(ApiError::internal("The shell needs a terminal"));
        }
        _ => {}
    }

    let admin = auth::login(store, username, password).await?;
    info!(admin = %admin.username, "Session started");

    let saved = |id: i64| output(json, &Saved { id }, |s| format!("saved id {}", s.id));

    match &cli.command {
        Command::Vehicle { action } => match action {
            VehicleAction::List => {
                let list = vehicle::list(store).await?;
                output(json, &list, |l| render::vehicles(l, config))
            }
            VehicleAction::Add(fields) => {
                let form = fields.clone().apply(VehicleForm::default());
                saved(vehicle::save(store, None, &form).await?)
            }
            VehicleAction::Edit { id, fields } => {
                let existing = vehicle::get(store, *id).await?;
                let form = fields.clone().apply(VehicleForm::from(&existing));
                saved(vehicle::save(store, Some(*id), &form).await?)
            }
            VehicleAction::Delete { id } => {
                let report = vehicle::delete(store, *id).await?;
                output(json, &report, |r| {
                    format!("deleted vehicle {} and {} rentals", id, r.rentals_deleted)
                })
            }
        },
        Command::Customer { action } => match action {
            CustomerAction::List => {
                let list = customer::list(store).await?;
                output(json, &list, |l| render::customers(l))
            }
            CustomerAction::Add(fields) => {
                let form = fields.clone().apply(CustomerForm::default());
                saved(customer::save(store, None, &form).await?)
            }
            CustomerAction::Edit { id, fields } => {
                let existing = customer::get(store, *id).await?;
                let form = fields.clone().apply(CustomerForm::from(&existing));
                saved(customer::save(store, Some(*id), &form).await?)
            }
            CustomerAction::Delete { id } => {
                let report = customer::delete(store, *id).await?;
                output(json, &report, |r| {
                    format!(
                        "deleted customer {} and {} rentals ({} vehicles released)",
                        id, r.rentals_deleted, r.vehicles_released
                    )
                })
            }
        },
        Command::Rental { action } => match action {
            RentalAction::List => {
                let list = rental::list(store).await?;
                output(json, &list, |l| render::rentals(l, config))
            }
            RentalAction::Add(fields) => {
                let form = fields.clone().apply(RentalForm::default());
                saved(rental::save(store, None, &form).await?)
            }
            RentalAction::Edit { id, fields } => {
                let existing = rental::get(store, *id).await?;
                let form = fields.clone().apply(RentalFormState::from_rental(&existing).form);
                saved(rental::save(store, Some(*id), &form).await?)
            }
            RentalAction::Delete { id } => {
                let report = rental::delete(store, *id).await?;
                output(json, &report, |r| {
                    format!(
                        "deleted rental {} ({} vehicles released)",
                        id, r.vehicles_released
                    )
                })
            }
            RentalAction::Quote {
                vehicle: vehicle_id,
                start,
                end,
            } => {
                let quote = rental::quote(store, *vehicle_id, start, end).await?;
                output(json, &quote, |q| q.to_string())
            }
        },
        Command::InitAdmin | Command::Date { .. } | Command::Shell => Ok(String::new()),
    }
}

/// Entry point behind `main`.
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    let mut stdout = std::io::stdout();

    if let Command::Date {
        action: DateAction::Normalize { input },
    } = &cli.command
    {
        let iso = normalize(input)?;
        let text = output(cli.json, &iso, |s| s.clone())?;
        return print(&mut stdout, &text);
    }

    let config = cli.config();
    let db = DbState::open(&config).await?;

    if let Command::Shell = cli.command {
        let (username, password) = cli.credentials();
        let admin = auth::login(db.store(), username, password).await?;
        info!(admin = %admin.username, "Shell session started");

        let stdin = std::io::stdin();
        let result = Shell::new(db.store(), &config)
            .run(stdin.lock(), &mut stdout)
            .await;
        db.inner().close().await;
        return result;
    }

    let result = execute(db.store(), &config, &cli).await;
    db.inner().close().await;
    print(&mut stdout, &result?)
}

fn print<W: Write>(out: &mut W, text: &str) -> Result<(), ApiError> {
    if text.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", text).map_err(|e| ApiError::internal(format!("Failed to write output: {}", e)))
}
