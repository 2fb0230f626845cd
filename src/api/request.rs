//! Request types for the compensation rollup API.
//!
//! Budget settings are optional on every request; the server's configured
//! defaults apply when they are absent.

use serde::{Deserialize, Serialize};

use crate::models::{BudgetSettings, EditedField, Employee};

/// Request body for `POST /api/resolve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
    /// The employee record as edited.
    pub employee: Employee,
    /// Which field the reviewer edited last.
    #[serde(default)]
    pub edited_field: EditedField,
    /// Settings supplying the standard merit rate.
    #[serde(default)]
    pub budget_settings: Option<BudgetSettings>,
}

/// Request body for `POST /api/report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// The roster, in display order.
    pub employees: Vec<Employee>,
    /// Allowances and tolerance to report against.
    #[serde(default)]
    pub budget_settings: Option<BudgetSettings>,
}

/// Request body for `POST /api/export/csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportCsvRequest {
    /// The roster to export.
    pub employees: Vec<Employee>,
    /// Used to name the download.
    #[serde(default, alias = "projectName")]
    pub project_name: Option<String>,
}

/// Request body for `POST /api/projects/save`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveProjectRequest {
    /// The project name.
    #[serde(alias = "projectName")]
    pub project_name: String,
    /// The shared access key.
    #[serde(alias = "accessKey")]
    pub access_key: String,
    /// The roster to save.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// The settings to save with the roster.
    #[serde(default, alias = "budgetSettings")]
    pub budget_settings: Option<BudgetSettings>,
}

/// Request body for `POST /api/projects/load` and `POST /api/projects/delete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectKeyRequest {
    /// The project name.
    #[serde(alias = "projectName")]
    pub project_name: String,
    /// The shared access key.
    #[serde(alias = "accessKey")]
    pub access_key: String,
}
