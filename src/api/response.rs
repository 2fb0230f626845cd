//! Response types for the compensation rollup API.
//!
//! This module defines the success bodies and the error response structures
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::Report;
use crate::storage::{ProjectRecord, ProjectSummary};

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok` while the server is answering.
    pub status: String,
    /// Server time.
    pub timestamp: DateTime<Utc>,
    /// Engine version.
    pub version: String,
}

/// Body of `POST /api/report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    /// Unique identifier for this report run.
    pub report_id: Uuid,
    /// When the report was computed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that computed it.
    pub engine_version: String,
    /// Time spent computing the report, in microseconds.
    pub duration_us: u64,
    /// The report itself.
    pub report: Report,
}

/// Body of a successful `POST /api/projects/save`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveProjectResponse {
    /// Always true.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// The saved project's name.
    pub project_name: String,
    /// The stamp recorded for this save.
    pub last_modified: DateTime<Utc>,
    /// Number of employees saved.
    pub employee_count: usize,
}

/// Body of a successful `POST /api/projects/load`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadProjectResponse {
    /// Always true.
    pub success: bool,
    /// The project.
    pub data: ProjectRecord,
}

/// Body of a successful `POST /api/projects/delete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProjectResponse {
    /// Always true.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
}

/// Body of `GET /api/projects/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProjectsResponse {
    /// Always true.
    pub success: bool,
    /// Saved projects, without access keys.
    pub projects: Vec<ProjectSummary>,
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

    /// Creates a project not found error response.
    pub fn project_not_found(project_name: &str) -> Self {
        Self::with_details(
            "PROJECT_NOT_FOUND",
            format!("Project not found: {}", project_name),
            "No project matches this name and access key",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidProject { field, message } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_PROJECT",
                    format!("Invalid project field '{}': {}", field, message),
                    "Project names and access keys must be non-empty and free of path separators",
                ),
            ),
            EngineError::ProjectNotFound { project_name } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::project_not_found(&project_name),
            },
            EngineError::ProjectConflict { project_name } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new(
                    "PROJECT_CONFLICT",
                    format!(
                        "Project '{}' cannot be saved with this access key; choose another name or key",
                        project_name
                    ),
                ),
            },
            EngineError::DuplicateEmployee { id } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Duplicate employee id: {}", id),
                    "Employee ids must be unique within a roster",
                ),
            ),
            EngineError::EmployeeNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("EMPLOYEE_NOT_FOUND", format!("Employee not found: {}", id)),
            },
            EngineError::StorageError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORAGE_ERROR", "Project storage failed", message),
            },
            EngineError::ExportError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("EXPORT_ERROR", "Export failed", message),
            },
        }
    }
}
