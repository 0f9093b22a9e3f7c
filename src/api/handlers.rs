//! HTTP request handlers for the staffing match API.
//!
//! This module contains the handler functions for all API endpoints.
//! Store reads and scoring are synchronous, so every handler moves its work
//! onto the blocking pool.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::dashboard::{build_dashboard, employee_details};
use crate::error::{EngineError, EngineResult, ErrorKind};
use crate::matching::RequirementMatcher;
use crate::store::import_nationalities;

use super::request::DashboardQuery;
use super::response::{ApiErrorResponse, ApiSuccess};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/requirements", get(list_requirements_handler))
        .route("/requirements/:id/matches", get(matched_candidates_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/employees/nationalities", post(import_nationalities_handler))
        .route("/employees/:id", get(employee_details_handler))
        .with_state(state)
}

/// Runs synchronous work on the blocking pool.
async fn run_blocking<T, F>(work: F) -> EngineResult<T>
where
    F: FnOnce() -> EngineResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| EngineError::Internal {
            message: format!("worker task failed: {}", e),
        })?
}

/// Logs a failed request and renders the error envelope.
fn failure(correlation_id: Uuid, err: EngineError, started: Instant) -> Response {
    if err.kind() == ErrorKind::Internal {
        error!(
            correlation_id = %correlation_id,
            error = %err,
            duration_us = started.elapsed().as_micros(),
            "Request failed"
        );
    } else {
        warn!(
            correlation_id = %correlation_id,
            code = err.kind().code(),
            error = %err,
            duration_us = started.elapsed().as_micros(),
            "Request rejected"
        );
    }
    ApiErrorResponse::from(err).into_response()
}

/// Handler for GET /requirements.
///
/// Returns every open requirement with its required and preferred skills.
async fn list_requirements_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(correlation_id = %correlation_id, "Listing requirements");

    let worker = state.clone();
    let result = run_blocking(move || {
        RequirementMatcher::new(worker.store(), worker.config().rules()).list_requirements()
    })
    .await;

    match result {
        Ok(requirements) => {
            info!(
                correlation_id = %correlation_id,
                requirements = requirements.len(),
                duration_us = started.elapsed().as_micros(),
                "Requirements listed"
            );
            ApiSuccess::data(requirements).into_response()
        }
        Err(err) => failure(correlation_id, err, started),
    }
}

/// Handler for GET /requirements/:id/matches.
///
/// Scores every active employee against the requirement and returns the
/// shown candidates grouped by tier.
async fn matched_candidates_handler(
    State(state): State<AppState>,
    Path(requirement_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(
        correlation_id = %correlation_id,
        requirement_id = %requirement_id,
        "Processing matching request"
    );

    let worker = state.clone();
    let today = state.today();
    let id = requirement_id.clone();
    let result = run_blocking(move || {
        RequirementMatcher::new(worker.store(), worker.config().rules()).match_requirement(&id, today)
    })
    .await;

    match result {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                requirement_id = %requirement_id,
                shown = report.matches.len(),
                duration_us = started.elapsed().as_micros(),
                "Matching completed successfully"
            );
            ApiSuccess::flat(report).into_response()
        }
        Err(err) => failure(correlation_id, err, started),
    }
}

/// Handler for GET /dashboard.
async fn dashboard_handler(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid dashboard query"
            );
            return ApiErrorResponse::bad_request(rejection.body_text()).into_response();
        }
    };

    let today = state.today();
    let month = match query.resolve(today) {
        Ok(month) => month,
        Err(err) => return failure(correlation_id, err, started),
    };
    info!(
        correlation_id = %correlation_id,
        year = month.year(),
        month = month.month(),
        "Building dashboard"
    );

    let worker = state.clone();
    let result = run_blocking(move || build_dashboard(worker.store(), month, today)).await;

    match result {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                duration_us = started.elapsed().as_micros(),
                "Dashboard served"
            );
            ApiSuccess::data(report).into_response()
        }
        Err(err) => failure(correlation_id, err, started),
    }
}

/// Handler for GET /employees/:id.
///
/// Returns the employee with skills and full contract history.
async fn employee_details_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Loading employee details"
    );

    let worker = state.clone();
    let id = employee_id.clone();
    let result = run_blocking(move || employee_details(worker.store(), &id)).await;

    match result {
        Ok(details) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                contracts = details.contracts.len(),
                duration_us = started.elapsed().as_micros(),
                "Employee details served"
            );
            ApiSuccess::data(details).into_response()
        }
        Err(err) => failure(correlation_id, err, started),
    }
}

/// Handler for POST /employees/nationalities.
///
/// Accepts a CSV body with an `employee_id,nationality` header.
async fn import_nationalities_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let correlation_id = Uuid::new_v4();
    let started = Instant::now();
    info!(
        correlation_id = %correlation_id,
        bytes = body.len(),
        "Processing nationality import"
    );

    if body.is_empty() {
        let err = EngineError::InvalidRequest {
            field: "body".to_string(),
            message: "CSV body is empty".to_string(),
        };
        return failure(correlation_id, err, started);
    }

    let worker = state.clone();
    let result = run_blocking(move || import_nationalities(worker.store(), body.as_ref())).await;

    match result {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                updated = report.updated,
                skipped = report.skipped.len(),
                errors = report.errors.len(),
                duration_us = started.elapsed().as_micros(),
                "Nationality import completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(ApiSuccess::data(report)),
            )
                .into_response()
        }
        Err(err) => failure(correlation_id, err, started),
    }
}
