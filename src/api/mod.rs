//! HTTP API module for the compensation rollup engine.
//!
//! This module provides the REST endpoints for resolving increases,
//! computing reports, exporting CSV and managing saved projects.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ExportCsvRequest, ProjectKeyRequest, ReportRequest, ResolveRequest, SaveProjectRequest,
};
pub use response::{
    ApiError, DeleteProjectResponse, HealthResponse, ListProjectsResponse, LoadProjectResponse,
    ReportResponse, SaveProjectResponse,
};
pub use state::AppState;
