//! HTTP request handlers for the compensation rollup API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compute_report_with_rates, resolve_increase};
use crate::error::EngineError;
use crate::export::{csv_file_name, to_csv_string};
use crate::models::{BudgetSettings, Roster};
use crate::storage::ProjectKey;

use super::request::{
    ExportCsvRequest, ProjectKeyRequest, ReportRequest, ResolveRequest, SaveProjectRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, DeleteProjectResponse, HealthResponse, ListProjectsResponse,
    LoadProjectResponse, ReportResponse, SaveProjectResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
///
/// Any origin may call the API; requests are traced with `tower-http`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/resolve", post(resolve_handler))
        .route("/api/report", post(report_handler))
        .route("/api/export/csv", post(export_csv_handler))
        .route("/api/projects/save", post(save_project_handler))
        .route("/api/projects/load", post(load_project_handler))
        .route("/api/projects/delete", post(delete_project_handler))
        .route("/api/projects/list", get(list_projects_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handler for GET /api/health.
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for POST /api/resolve.
///
/// Resolves one employee's increase from the edited field and returns the
/// updated record.
async fn resolve_handler(
    State(state): State<AppState>,
    payload: Result<Json<ResolveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing resolve request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let settings = settings_or_default(&state, request.budget_settings);
    let resolved = resolve_increase(&request.employee, request.edited_field, &settings);

    info!(
        correlation_id = %correlation_id,
        employee_id = %resolved.id,
        edited_field = ?request.edited_field,
        increase_amount = %resolved.increase_amount,
        flagged = resolved.flagged,
        "Increase resolved"
    );
    json_response(StatusCode::OK, &resolved)
}

/// Handler for POST /api/report.
///
/// Rejects duplicate ids, then reconciles and aggregates the roster against
/// the budget using the configured exchange rates.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let settings = settings_or_default(&state, request.budget_settings);

    let roster = match Roster::from_employees(request.employees) {
        Ok(roster) => roster,
        Err(err) => return engine_error_response(err, correlation_id),
    };

    let report = compute_report_with_rates(
        roster.employees(),
        &settings,
        state.config().exchange_rates(),
    );
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        employees_count = roster.len(),
        base_used = %report.budget.base.used,
        stock_used = %report.budget.stock.used,
        over_budget = report.budget.is_over_budget,
        flagged_count = report.totals.flagged_count,
        duration_us = duration.as_micros(),
        "Report computed"
    );
    if report.budget.is_over_budget {
        warn!(correlation_id = %correlation_id, "Roster is over budget");
    }

    json_response(
        StatusCode::OK,
        &ReportResponse {
            report_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            duration_us: duration.as_micros() as u64,
            report,
        },
    )
}

/// Handler for POST /api/export/csv.
async fn export_csv_handler(payload: Result<Json<ExportCsvRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing CSV export request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match to_csv_string(&request.employees) {
        Ok(csv) => {
            let file_name =
                csv_file_name(request.project_name.as_deref().unwrap_or("compensation"));
            info!(
                correlation_id = %correlation_id,
                employees_count = request.employees.len(),
                file_name = %file_name,
                "CSV exported"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", file_name.replace('"', "")),
                    ),
                ],
                csv,
            )
                .into_response()
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /api/projects/save.
async fn save_project_handler(
    State(state): State<AppState>,
    payload: Result<Json<SaveProjectRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing project save request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let settings = settings_or_default(&state, request.budget_settings);
    let result = ProjectKey::new(request.project_name, request.access_key)
        .and_then(|key| state.store().save(&key, request.employees, settings));

    match result {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                project_name = %record.project_name,
                employees_count = record.employees.len(),
                "Project saved"
            );
            json_response(
                StatusCode::OK,
                &SaveProjectResponse {
                    success: true,
                    message: "Project saved successfully".to_string(),
                    employee_count: record.employees.len(),
                    project_name: record.project_name,
                    last_modified: record.last_modified,
                },
            )
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /api/projects/load.
async fn load_project_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProjectKeyRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing project load request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = ProjectKey::new(request.project_name, request.access_key)
        .and_then(|key| state.store().load(&key));

    match result {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                project_name = %record.project_name,
                employees_count = record.employees.len(),
                "Project loaded"
            );
            json_response(
                StatusCode::OK,
                &LoadProjectResponse {
                    success: true,
                    data: record,
                },
            )
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /api/projects/delete.
async fn delete_project_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProjectKeyRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing project delete request");

    let request = match parse_payload(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let result = ProjectKey::new(request.project_name, request.access_key).and_then(|key| {
        state.store().delete(&key)?;
        Ok(key)
    });

    match result {
        Ok(key) => {
            info!(
                correlation_id = %correlation_id,
                project_name = %key.project_name(),
                "Project deleted"
            );
            json_response(
                StatusCode::OK,
                &DeleteProjectResponse {
                    success: true,
                    message: "Project deleted successfully".to_string(),
                },
            )
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for GET /api/projects/list.
async fn list_projects_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.store().list() {
        Ok(projects) => {
            info!(
                correlation_id = %correlation_id,
                projects_count = projects.len(),
                "Projects listed"
            );
            json_response(
                StatusCode::OK,
                &ListProjectsResponse {
                    success: true,
                    projects,
                },
            )
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

fn settings_or_default(state: &AppState, settings: Option<BudgetSettings>) -> BudgetSettings {
    settings.unwrap_or_else(|| state.config().budget_settings().clone())
}

/// Unwraps a JSON body or builds the 400 response for it.
fn parse_payload<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
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

    Err(error_response(ApiErrorResponse::bad_request(error)))
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    error_response(err.into())
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
