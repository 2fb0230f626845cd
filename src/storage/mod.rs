//! Project persistence.
//!
//! A project is a named roster plus its budget settings, addressed by a
//! project name and a shared access key. Anyone holding both can read,
//! overwrite or delete the project; listing never reveals access keys.
//!
//! Two backends implement [`ProjectStore`]: [`MemoryProjectStore`] for tests
//! and short-lived servers, and [`FileProjectStore`] which keeps one JSON
//! document per project in a directory.

mod file;
mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{BudgetSettings, Employee, Roster};

pub use file::FileProjectStore;
pub use memory::MemoryProjectStore;

/// A validated project name and access key pair.
///
/// # Example
///
/// ```
/// use comp_rollup::storage::ProjectKey;
///
/// let key = ProjectKey::new("q3-review", "s3cret").unwrap();
/// assert_eq!(key.storage_key(), "q3-review-s3cret");
/// assert!(ProjectKey::new("q3/review", "s3cret").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectKey {
    project_name: String,
    access_key: String,
}

impl ProjectKey {
    /// Validates and builds a key.
    ///
    /// Both parts must be non-empty after trimming and may not contain path
    /// separators or control characters.
    pub fn new(project_name: impl Into<String>, access_key: impl Into<String>) -> EngineResult<Self> {
        let project_name = project_name.into();
        let access_key = access_key.into();
        validate_part("project_name", &project_name)?;
        validate_part("access_key", &access_key)?;
        Ok(Self {
            project_name,
            access_key,
        })
    }

    /// The project name.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// The access key.
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// The key under which the project is stored: `{project_name}-{access_key}`.
    pub fn storage_key(&self) -> String {
        format!("{}-{}", self.project_name, self.access_key)
    }

    fn not_found(&self) -> EngineError {
        EngineError::ProjectNotFound {
            project_name: self.project_name.clone(),
        }
    }

    fn conflict(&self) -> EngineError {
        EngineError::ProjectConflict {
            project_name: self.project_name.clone(),
        }
    }
}

fn validate_part(field: &str, value: &str) -> EngineResult<()> {
    let invalid = |message: &str| EngineError::InvalidProject {
        field: field.to_string(),
        message: message.to_string(),
    };

    if value.trim().is_empty() {
        return Err(invalid("must not be empty"));
    }
    if value.contains(['/', '\\']) {
        return Err(invalid("must not contain path separators"));
    }
    if value.chars().any(char::is_control) {
        return Err(invalid("must not contain control characters"));
    }
    Ok(())
}

/// A saved project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// The project name.
    pub project_name: String,
    /// The roster, in display order.
    pub employees: Vec<Employee>,
    /// The budget settings saved with the roster.
    pub budget_settings: BudgetSettings,
    /// When the project was last saved.
    pub last_modified: DateTime<Utc>,
}

/// What `list` reports about a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// The project name.
    pub project_name: String,
    /// When the project was last saved.
    pub last_modified: DateTime<Utc>,
    /// Number of employees on the saved roster.
    pub employee_count: usize,
}

impl From<&ProjectRecord> for ProjectSummary {
    fn from(record: &ProjectRecord) -> Self {
        Self {
            project_name: record.project_name.clone(),
            last_modified: record.last_modified,
            employee_count: record.employees.len(),
        }
    }
}

/// The on-disk and in-memory form of a project.
///
/// Holding the access key alongside the record lets `save`, `load` and
/// `delete` tell apart name and key pairs whose concatenation collides.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredProject {
    access_key: String,
    #[serde(flatten)]
    record: ProjectRecord,
}

impl StoredProject {
    fn new(key: &ProjectKey, employees: Vec<Employee>, budget_settings: BudgetSettings) -> EngineResult<Self> {
        // Rejects duplicate ids before anything is written.
        let roster = Roster::from_employees(employees)?;
        Ok(Self {
            access_key: key.access_key.clone(),
            record: ProjectRecord {
                project_name: key.project_name.clone(),
                employees: roster.into_employees(),
                budget_settings,
                last_modified: Utc::now(),
            },
        })
    }

    fn matches(&self, key: &ProjectKey) -> bool {
        self.record.project_name == key.project_name && self.access_key == key.access_key
    }
}

/// Storage for projects.
///
/// Implementations are shared across request handlers, so every method takes
/// `&self` and must be safe to call concurrently.
pub trait ProjectStore: Send + Sync {
    /// Saves a project, overwriting any existing one under the same name and
    /// access key.
    ///
    /// Stamps `last_modified` with the current UTC time and returns the
    /// stored record. Fails with `DuplicateEmployee` if two employees share
    /// an id, and with `ProjectConflict` if another name and key pair is
    /// stored under the same storage key.
    fn save(
        &self,
        key: &ProjectKey,
        employees: Vec<Employee>,
        budget_settings: BudgetSettings,
    ) -> EngineResult<ProjectRecord>;

    /// Loads a project. Fails with `ProjectNotFound` unless the name and
    /// access key both match a saved project.
    fn load(&self, key: &ProjectKey) -> EngineResult<ProjectRecord>;

    /// Deletes a project. Deleting a missing project succeeds.
    fn delete(&self, key: &ProjectKey) -> EngineResult<()>;

    /// Lists every saved project, ordered by name.
    fn list(&self) -> EngineResult<Vec<ProjectSummary>>;
}

fn storage_error(context: &str, error: impl std::fmt::Display) -> EngineError {
    EngineError::StorageError {
        message: format!("{}: {}", context, error),
    }
}

fn sort_summaries(summaries: &mut [ProjectSummary]) {
    summaries.sort_by(|a, b| {
        a.project_name
            .cmp(&b.project_name)
            .then(b.last_modified.cmp(&a.last_modified))
    });
}
