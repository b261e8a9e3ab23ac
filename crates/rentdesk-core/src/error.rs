//! # Error Types
//!
//! Domain-specific error types for rentdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rentdesk-core errors (this file)                                      │
//! │  ├── FormatError      - A date string matched no accepted pattern      │
//! │  ├── ValidationError  - A form field failed a rule (names the field)   │
//! │  └── CoreError        - A business rule rejected the operation         │
//! │                                                                         │
//! │  rentdesk-db errors (separate crate)                                   │
//! │  └── DbError          - Connection failures and constraint rejections  │
//! │                                                                         │
//! │  Console errors (in app)                                               │
//! │  └── ApiError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: FormatError → ValidationError ─┐                                │
//! │        CoreError ─────────────────────┴──► ApiError                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `FormatError` and `ValidationError` are recoverable: the form stays open
//! and populated. `CoreError` blocks the save with a rule message.

use thiserror::Error;

use crate::money::Money;
use crate::types::VehicleStatus;

// =============================================================================
// Format Error
// =============================================================================

/// A date string that none of the accepted patterns could parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized date format: '{input}'. Use YYYY-MM-DD or DD-MM-YYYY.")]
pub struct FormatError {
    /// The offending input, trimmed.
    pub input: String,
}

impl FormatError {
    pub fn new(input: impl Into<String>) -> Self {
        FormatError {
            input: input.into(),
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
///
/// These are raised after the form itself is valid, when the state of the
/// store forbids the operation.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Vehicle id does not exist.
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(i64),

    /// An ongoing rental was requested for a vehicle that is already out.
    ///
    /// ## User Workflow
    /// ```text
    /// Save rental (status: ongoing, vehicle: 7)
    ///      │
    ///      ▼
    /// Read vehicle 7 status: rented
    ///      │
    ///      ▼
    /// VehicleUnavailable { vehicle_id: 7, status: Rented }
    ///      │
    ///      ▼
    /// Nothing persisted, form stays open
    /// ```
    #[error("Vehicle {vehicle_id} is not available (currently {status})")]
    VehicleUnavailable {
        vehicle_id: i64,
        status: VehicleStatus,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Every variant carries the name of the offending field so the front-end can
/// point at it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field must parse as a whole number.
    #[error("{field} must be an integer")]
    NotAnInteger { field: String },

    /// Field holds a date none of the accepted patterns understand.
    #[error("{field}: {source}")]
    InvalidDate {
        field: String,
        #[source]
        source: FormatError,
    },

    /// A closing date falls before the opening date.
    #[error("{field} cannot be before {before}")]
    DateBeforeStart { field: String, before: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is above the accepted maximum.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: Money },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a money amount with three decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotAnInteger { field }
            | ValidationError::InvalidDate { field, .. }
            | ValidationError::DateBeforeStart { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::TooLarge { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. } => field,
        }
    }

    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    /// Same error, reported against another field name.
    pub(crate) fn with_field(mut self, name: &str) -> Self {
        match &mut self {
            ValidationError::Required { field }
            | ValidationError::NotAnInteger { field }
            | ValidationError::InvalidDate { field, .. }
            | ValidationError::DateBeforeStart { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::TooLarge { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. } => *field = name.to_string(),
        }
        self
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
