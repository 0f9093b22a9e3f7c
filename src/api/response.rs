//! Response types for the staffing match API.
//!
//! Every body carries a `success` flag. Successful bodies either wrap a
//! payload under `data` or flatten a report into the top level; failures
//! carry a stable code, a message and optional details.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ErrorKind};

/// Successful response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSuccess<T> {
    /// Always true.
    pub success: bool,
    /// The payload, merged into the top level.
    #[serde(flatten)]
    pub body: T,
}

/// A payload nested under `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataBody<T> {
    /// The payload.
    pub data: T,
}

impl<T> ApiSuccess<T> {
    /// Wraps a body whose fields go to the top level.
    pub fn flat(body: T) -> Self {
        Self {
            success: true,
            body,
        }
    }
}

impl<T> ApiSuccess<DataBody<T>> {
    /// Wraps a payload under `data`.
    pub fn data(data: T) -> Self {
        Self::flat(DataBody { data })
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Always false.
    pub success: bool,
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation.code(), message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 VALIDATION response.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error(message),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

/// HTTP status for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let kind = error.kind();
        let status = status_for(kind);

        let body = match &error {
            EngineError::InvalidRecord { field, .. } | EngineError::InvalidRequest { field, .. } => {
                ApiError::with_details(kind.code(), error.to_string(), format!("field: {}", field))
            }
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::DataFileError { .. } => {
                ApiError::with_details(kind.code(), "Configuration error", error.to_string())
            }
            EngineError::Internal { .. } => {
                ApiError::with_details(kind.code(), "Internal error", error.to_string())
            }
            _ => ApiError::new(kind.code(), error.to_string()),
        };

        ApiErrorResponse {
            status,
            error: body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_data_envelope_nests_payload() {
        let json = serde_json::to_value(ApiSuccess::data(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": [1, 2]}));
    }

    #[test]
    fn test_flat_envelope_merges_fields() {
        #[derive(Serialize)]
        struct Body {
            requirement: &'static str,
        }
        let json = serde_json::to_value(ApiSuccess::flat(Body { requirement: "REQ-1" })).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "requirement": "REQ-1"}));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                EngineError::RequirementNotFound { id: "R".to_string() },
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                EngineError::EmployeeNotFound { id: "E".to_string() },
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                EngineError::InvalidRequest {
                    field: "month".to_string(),
                    message: "bad".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "VALIDATION",
            ),
            (
                EngineError::StoreUnavailable { message: "down".to_string() },
                StatusCode::SERVICE_UNAVAILABLE,
                "STORE_UNAVAILABLE",
            ),
            (
                EngineError::Timeout { limit_ms: 10 },
                StatusCode::GATEWAY_TIMEOUT,
                "TIMEOUT",
            ),
            (
                EngineError::Internal { message: "boom".to_string() },
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL",
            ),
        ];

        for (error, status, code) in cases {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, status);
            assert_eq!(response.error.code, code);
            assert!(!response.error.success);
        }
    }

    #[test]
    fn test_invalid_record_names_field_in_details() {
        let response: ApiErrorResponse =
            EngineError::invalid_employee("EMP-1", "skills.Rust.level", "level 9 is outside 1-3").into();
        assert_eq!(response.error.details.as_deref(), Some("field: skills.Rust.level"));
    }

    #[test]
    fn test_config_errors_hide_behind_generic_message() {
        let response: ApiErrorResponse = EngineError::ConfigNotFound {
            path: "/etc/matching.yaml".to_string(),
        }
        .into();
        assert_eq!(response.error.message, "Configuration error");
        assert!(response.error.details.unwrap().contains("/etc/matching.yaml"));
    }
}
