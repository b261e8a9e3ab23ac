//! # View State
//!
//! Which table the operator is looking at and which row is selected.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// The three record tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Vehicles,
    Customers,
    Rentals,
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Vehicles => "vehicles",
            Page::Customers => "customers",
            Page::Rentals => "rentals",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vehicles" | "vehicle" | "v" => Ok(Page::Vehicles),
            "customers" | "customer" | "c" => Ok(Page::Customers),
            "rentals" | "rental" | "r" => Ok(Page::Rentals),
            other => Err(ApiError::validation(format!(
                "Unknown page '{}' (vehicles, customers, rentals)",
                other
            ))),
        }
    }
}

/// Current page plus the selected record id on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppState {
    page: Page,
    selection: Option<i64>,
}

impl AppState {
    pub fn new() -> Self {
        AppState::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn selection(&self) -> Option<i64> {
        self.selection
    }

    /// Switches page. A selection never carries over to another table.
    pub fn show(&mut self, page: Page) {
        if self.page != page {
            self.selection = None;
        }
        self.page = page;
    }

    pub fn select(&mut self, id: i64) {
        self.selection = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// The selected id, or a validation error telling the operator to pick one.
    pub fn require_selection(&self) -> Result<i64, ApiError> {
        self.selection
            .ok_or_else(|| ApiError::validation(format!("Select a row on {} first", self.page)))
    }
}
