//! HTTP request handlers for the rate card preview service.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    BillingContext, calculate_multi_line_trucking_billing_with_audit,
    derive_quantities_from_booking, extract_trucking_selections,
    generate_rate_card_billing_items, has_existing_rate_card_billing,
    instantiate_rates_with_audit, is_multi_line, normalize_trucking_line_items, rate_card_total,
};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditTrace, ServiceType};

use super::request::{BillingRequest, InstantiationRequest};
use super::response::{ApiError, ApiErrorResponse, BillingResponse, InstantiationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/rate-card/instantiate", post(instantiate_handler))
        .route("/rate-card/billing", post(billing_handler))
        .with_state(state)
}

/// Handler for POST /rate-card/instantiate.
///
/// Previews the charges a contract's rate card produces for a booking.
async fn instantiate_handler(
    State(state): State<AppState>,
    payload: Result<Json<InstantiationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing rate instantiation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match perform_instantiation(&request, state.catalogue()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                contract_id = %result.contract_id,
                service_type = %result.service_type,
                mode = %result.mode,
                lines = result.applied_rates.len(),
                total = %result.total,
                duration_us = start_time.elapsed().as_micros(),
                "Rate instantiation completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                contract_id = %request.contract_id,
                error = %err,
                "Rate instantiation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /rate-card/billing.
///
/// Converts applied rates into unbilled ledger items, once per booking.
async fn billing_handler(
    State(state): State<AppState>,
    payload: Result<Json<BillingRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing rate card billing request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match perform_billing(&request, state.catalogue()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                booking_id = %request.booking_id,
                already_applied = result.already_applied,
                items = result.billing_items.len(),
                "Rate card billing completed"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                booking_id = %request.booking_id,
                error = %err,
                "Rate card billing failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // Missing fields and unknown enum values are validation failures
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Rates a booking against its contract's matrix for the requested service.
///
/// Multi-line trucking bookings are rated per leg. Every other booking is
/// rated once, with trucking selections inferred from the booking when the
/// request supplies none.
fn perform_instantiation(
    request: &InstantiationRequest,
    catalogue: &ConfigLoader,
) -> EngineResult<InstantiationResponse> {
    let start_time = Instant::now();

    let contract = catalogue.get_contract(&request.contract_id)?;
    let matrix = catalogue.require_rate_matrix(&request.contract_id, request.service_type)?;

    let mode = request
        .mode
        .as_deref()
        .filter(|mode| !mode.trim().is_empty())
        .or_else(|| request.booking.mode())
        .ok_or_else(|| EngineError::InvalidBooking {
            message: "no mode given on the request or the booking".to_string(),
        })?
        .to_string();

    let result = if request.service_type == ServiceType::Trucking
        && is_multi_line(&request.booking)
    {
        let lines = normalize_trucking_line_items(&request.booking);
        calculate_multi_line_trucking_billing_with_audit(
            &lines,
            matrix,
            &mode,
            request.selections.as_ref(),
            1,
        )
    } else {
        let quantities = derive_quantities_from_booking(&request.booking, request.service_type);
        let selections = match (&request.selections, request.service_type) {
            (Some(selections), _) => Some(selections.clone()),
            (None, ServiceType::Trucking) => normalize_trucking_line_items(&request.booking)
                .first()
                .and_then(|line| extract_trucking_selections(line, &contract.matrices)),
            (None, _) => None,
        };
        instantiate_rates_with_audit(matrix, &quantities, &mode, selections.as_ref(), 1)
    };

    let total = rate_card_total(&result.applied_rates);

    Ok(InstantiationResponse {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        contract_id: contract.id.clone(),
        contract_number: contract.contract_number.clone(),
        service_type: request.service_type,
        mode,
        currency: matrix.currency.clone(),
        applied_rates: result.applied_rates,
        total,
        audit_trace: AuditTrace {
            steps: result.audit_steps,
            warnings: result.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

/// Generates ledger items for applied rates unless the booking already has
/// rate-card items.
fn perform_billing(
    request: &BillingRequest,
    catalogue: &ConfigLoader,
) -> EngineResult<BillingResponse> {
    let contract = catalogue.get_contract(&request.contract_id)?;

    if has_existing_rate_card_billing(&request.existing_items, &request.booking_id) {
        info!(
            booking_id = %request.booking_id,
            "Rate card already applied to booking; no items generated"
        );
        return Ok(BillingResponse {
            already_applied: true,
            billing_items: Vec::new(),
        });
    }

    let context = BillingContext {
        booking_id: request.booking_id.clone(),
        contract_id: contract.id.clone(),
        contract_number: contract.contract_number.clone(),
    };

    Ok(BillingResponse {
        already_applied: false,
        billing_items: generate_rate_card_billing_items(&request.applied_rates, &context),
    })
}
