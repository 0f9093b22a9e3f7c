//! Error types for the staffing match engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure a matching run, dashboard build or import can hit.

use thiserror::Error;

/// Coarse error taxonomy exposed to callers.
///
/// Every [`EngineError`] maps onto exactly one kind, which the API layer
/// uses to pick a status code and a stable error code string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced record does not exist.
    NotFound,
    /// Input or stored data is malformed.
    Validation,
    /// The record store could not be reached.
    StoreUnavailable,
    /// The operation exceeded its deadline.
    Timeout,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// Stable code string used in API error bodies.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Validation => "VALIDATION",
            ErrorKind::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// The main error type for the staffing match engine.
///
/// # Example
///
/// ```
/// use staffing_match::error::{EngineError, ErrorKind};
///
/// let error = EngineError::RequirementNotFound {
///     id: "REQ-0042".to_string(),
/// };
/// assert_eq!(error.to_string(), "Requirement not found: REQ-0042");
/// assert_eq!(error.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A data snapshot file could not be read or parsed.
    #[error("Failed to load data file '{path}': {message}")]
    DataFileError {
        /// The path to the data file.
        path: String,
        /// What went wrong.
        message: String,
    },

    /// The requirement id does not resolve to an active requirement.
    #[error("Requirement not found: {id}")]
    RequirementNotFound {
        /// The requested requirement id.
        id: String,
    },

    /// The employee id does not resolve to any employee.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The requested employee id.
        id: String,
    },

    /// A stored record carried malformed or inconsistent data.
    #[error("Invalid {entity} '{id}' field '{field}': {message}")]
    InvalidRecord {
        /// The kind of record ("employee", "requirement", ...).
        entity: String,
        /// The record id.
        id: String,
        /// The offending field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// A request parameter was invalid.
    #[error("Invalid request parameter '{field}': {message}")]
    InvalidRequest {
        /// The offending parameter.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// The external record store failed.
    #[error("Record store unavailable: {message}")]
    StoreUnavailable {
        /// The underlying failure.
        message: String,
    },

    /// A matching run ran past its deadline.
    #[error("Matching run exceeded its deadline of {limit_ms}ms")]
    Timeout {
        /// The configured deadline in milliseconds.
        limit_ms: u64,
    },

    /// A bulk import file could not be processed.
    #[error("Import failed: {message}")]
    ImportError {
        /// A description of the failure.
        message: String,
    },

    /// An unexpected fault.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the fault.
        message: String,
    },
}

impl EngineError {
    /// Returns the taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::RequirementNotFound { .. } | EngineError::EmployeeNotFound { .. } => {
                ErrorKind::NotFound
            }
            EngineError::InvalidRecord { .. }
            | EngineError::InvalidRequest { .. }
            | EngineError::ImportError { .. } => ErrorKind::Validation,
            EngineError::StoreUnavailable { .. } => ErrorKind::StoreUnavailable,
            EngineError::Timeout { .. } => ErrorKind::Timeout,
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::DataFileError { .. }
            | EngineError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Shorthand for an [`EngineError::InvalidRecord`] on an employee.
    pub fn invalid_employee(
        id: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        EngineError::InvalidRecord {
            entity: "employee".to_string(),
            id: id.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/matching.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/matching.yaml"
        );
        assert_eq!(error.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_requirement_not_found_is_not_found_kind() {
        let error = EngineError::RequirementNotFound {
            id: "REQ-0001".to_string(),
        };
        assert_eq!(error.to_string(), "Requirement not found: REQ-0001");
        assert_eq!(error.kind().code(), "NOT_FOUND");
    }

    #[test]
    fn test_employee_not_found_is_not_found_kind() {
        let error = EngineError::EmployeeNotFound {
            id: "EMP-9999".to_string(),
        };
        assert_eq!(error.to_string(), "Employee not found: EMP-9999");
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_invalid_employee_displays_entity_field_and_message() {
        let error = EngineError::invalid_employee("EMP-007", "skills.Rust.level", "must be 1-3");
        assert_eq!(
            error.to_string(),
            "Invalid employee 'EMP-007' field 'skills.Rust.level': must be 1-3"
        );
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_store_unavailable_and_timeout_kinds() {
        let store = EngineError::StoreUnavailable {
            message: "connection refused".to_string(),
        };
        assert_eq!(store.kind().code(), "STORE_UNAVAILABLE");

        let timeout = EngineError::Timeout { limit_ms: 250 };
        assert_eq!(
            timeout.to_string(),
            "Matching run exceeded its deadline of 250ms"
        );
        assert_eq!(timeout.kind().code(), "TIMEOUT");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::RequirementNotFound {
                id: "missing".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
