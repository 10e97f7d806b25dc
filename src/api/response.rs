//! Response types for the rate card preview service.
//!
//! This module defines the success bodies and the error structure returned
//! by the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{AppliedRate, AuditTrace, BillingItem, ServiceType};

/// Response body for `POST /rate-card/instantiate`.
///
/// An empty `applied_rates` list means no rate-card charge applies to the
/// booking; it is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstantiationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The contract that priced the booking.
    pub contract_id: String,
    /// The contract's human-facing number.
    pub contract_number: String,
    /// The service that was rated.
    pub service_type: ServiceType,
    /// The mode the booking was rated in.
    pub mode: String,
    /// The currency of the rate matrix.
    pub currency: String,
    /// The billable lines.
    pub applied_rates: Vec<AppliedRate>,
    /// Sum of all subtotals.
    pub total: Decimal,
    /// Record of every row decision.
    pub audit_trace: AuditTrace,
}

/// Response body for `POST /rate-card/billing`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingResponse {
    /// True when rate-card items already existed and nothing new was generated.
    pub already_applied: bool,
    /// The newly generated items.
    pub billing_items: Vec<BillingItem>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
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
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::ContractNotFound { contract_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "CONTRACT_NOT_FOUND",
                    message,
                    format!(
                        "No rate card is available for contract '{}'; bill manually",
                        contract_id
                    ),
                ),
            },
            EngineError::RateMatrixNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "RATE_MATRIX_NOT_FOUND",
                    message,
                    "The contract does not price this service; bill manually",
                ),
            },
            EngineError::InvalidBooking { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::validation_error(message),
            },
            EngineError::InvalidStatusTransition { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("INVALID_STATUS_TRANSITION", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BillingStatus;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_contract_not_found_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::ContractNotFound {
            contract_id: "ctr_404".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "CONTRACT_NOT_FOUND");
        assert!(api_error.error.message.contains("ctr_404"));
    }

    #[test]
    fn test_invalid_booking_maps_to_validation_error() {
        let api_error: ApiErrorResponse = EngineError::InvalidBooking {
            message: "no mode".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_invalid_status_transition_maps_to_409() {
        let api_error: ApiErrorResponse = EngineError::InvalidStatusTransition {
            item_id: "item_001".to_string(),
            from: BillingStatus::Paid,
            to: BillingStatus::Billed,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
        assert_eq!(api_error.error.code, "INVALID_STATUS_TRANSITION");
        assert!(api_error.error.message.contains("paid -> billed"));
    }

    #[tokio::test]
    async fn test_error_response_renders_status_and_json_body() {
        let api_error: ApiErrorResponse = EngineError::RateMatrixNotFound {
            contract_id: "ctr_001".to_string(),
            service_type: "Trucking".to_string(),
        }
        .into();

        let response = api_error.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "RATE_MATRIX_NOT_FOUND");
        assert!(error.details.is_some());
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let api_error: ApiErrorResponse = EngineError::ConfigParseError {
            path: "contracts/bad.yaml".to_string(),
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
