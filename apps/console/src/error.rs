//! # API Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Rentdesk                               │
//! │                                                                         │
//! │  Command Function  → Result<T, ApiError>                               │
//! │         │                                                               │
//! │         ├── FormatError      → FORMAT_ERROR      (form stays open)     │
//! │         ├── ValidationError  → VALIDATION_ERROR  (form stays open)     │
//! │         ├── CoreError        → BUSINESS_RULE / NOT_FOUND               │
//! │         ├── DbError (conn)   → CONNECTION_ERROR                        │
//! │         ├── DbError (constr) → CONSTRAINT_ERROR  (raw store message)   │
//! │         └── login failure    → AUTH_ERROR                              │
//! │                                                                         │
//! │  Shell / CLI prints:  [BUSINESS_RULE] Vehicle 7 is not available ...   │
//! │  With --json:         {"code":"BUSINESS_RULE","message":"..."}         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here retries. The operator decides what to do next.

use rentdesk_core::{CoreError, FormatError, ValidationError};
use rentdesk_db::DbError;
use serde::Serialize;

/// Hint shown when an older database lacks the rental amount column.
pub const MISSING_AMOUNT_COLUMN_HINT: &str =
    "Missing 'amount_cents' column. Run:\nALTER TABLE rentals ADD COLUMN amount_cents INTEGER NULL;";

/// API error returned from console commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "expected_return_date cannot be before start_date"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A form field failed a rule
    ValidationError,

    /// A date matched none of the accepted patterns
    FormatError,

    /// Record does not exist
    NotFound,

    /// Availability rule rejected the save
    BusinessRule,

    /// Store unreachable
    ConnectionError,

    /// Store refused the statement
    ConstraintError,

    /// Login failed
    AuthError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::FormatError => "FORMAT_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::BusinessRule => "BUSINESS_RULE",
            ErrorCode::ConnectionError => "CONNECTION_ERROR",
            ErrorCode::ConstraintError => "CONSTRAINT_ERROR",
            ErrorCode::AuthError => "AUTH_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::AuthError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// True when the operator can fix the input and retry the same form.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::ValidationError | ErrorCode::FormatError
        )
    }
}

fn mentions_missing_amount_column(message: &str) -> bool {
    let lower = message.to_lowercase();
    (lower.contains("no such column") || lower.contains("unknown column") || lower.contains("has no column"))
        && lower.contains("amount")
}

/// Converts database errors to API errors.
///
/// Constraint and query failures keep the store's own wording.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::ConnectionFailed(_) | DbError::PoolExhausted | DbError::MigrationFailed(_) => {
                tracing::error!(error = %err, "Store unavailable");
                ApiError::new(ErrorCode::ConnectionError, err.to_string())
            }
            DbError::UniqueViolation { message, .. }
            | DbError::ForeignKeyViolation { message }
            | DbError::CheckViolation { message } => {
                tracing::warn!(%message, "Store rejected statement");
                ApiError::new(ErrorCode::ConstraintError, message)
            }
            DbError::QueryFailed(message) => {
                tracing::warn!(%message, "Store rejected statement");
                if mentions_missing_amount_column(&message) {
                    ApiError::new(ErrorCode::ConstraintError, MISSING_AMOUNT_COLUMN_HINT)
                } else {
                    ApiError::new(ErrorCode::ConstraintError, message)
                }
            }
            DbError::Internal(message) => {
                tracing::error!(%message, "Internal database error");
                ApiError::internal(message)
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::VehicleNotFound(id) => ApiError::not_found("Vehicle", id),
            CoreError::VehicleUnavailable { .. } => {
                ApiError::new(ErrorCode::BusinessRule, err.to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<FormatError> for ApiError {
    fn from(err: FormatError) -> Self {
        ApiError::new(ErrorCode::FormatError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rentdesk_core::VehicleStatus;

    #[test]
    fn test_codes_serialize_screaming_snake() {
        let err = ApiError::new(ErrorCode::BusinessRule, "no");
        assert_eq!(
            serde_json::to_string(&err).unwrap(),
            r#"{"code":"BUSINESS_RULE","message":"no"}"#
        );
    }

    #[test]
    fn test_unavailable_is_business_rule() {
        let err: ApiError = CoreError::VehicleUnavailable {
            vehicle_id: 7,
            status: VehicleStatus::Rented,
        }
        .into();
        assert_eq!(err.code, ErrorCode::BusinessRule);
        assert_eq!(err.to_string(), "[BUSINESS_RULE] Vehicle 7 is not available (currently rented)");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_format_and_validation_are_recoverable() {
        let err: ApiError = FormatError::new("soon").into();
        assert_eq!(err.code, ErrorCode::FormatError);
        assert!(err.is_recoverable());

        let err: ApiError = ValidationError::Required {
            field: "start_date".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "start_date is required");
    }

    #[test]
    fn test_store_messages_pass_through() {
        let err: ApiError = DbError::UniqueViolation {
            field: "vehicles.reg_no".into(),
            message: "UNIQUE constraint failed: vehicles.reg_no".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ConstraintError);
        assert_eq!(err.message, "UNIQUE constraint failed: vehicles.reg_no");

        let err: ApiError = DbError::PoolExhausted.into();
        assert_eq!(err.code, ErrorCode::ConnectionError);
    }

    #[test]
    fn test_missing_amount_column_gets_hint() {
        let err: ApiError = DbError::QueryFailed("table rentals has no column named amount_cents".into()).into();
        assert_eq!(err.message, MISSING_AMOUNT_COLUMN_HINT);

        let err: ApiError = DbError::QueryFailed("database is locked".into()).into();
        assert_eq!(err.message, "database is locked");
    }
}
