//! Error types for the compensation rollup engine.
//!
//! The calculation core never fails: every ambiguous numeric input resolves
//! to a defined default. The errors here belong to the collaborators around
//! it (configuration, project storage, export).

use thiserror::Error;

/// The main error type for the compensation rollup engine.
///
/// # Example
///
/// ```
/// use comp_rollup::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/budget.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/budget.yaml");
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

    /// A project name or access key was unusable as a storage key.
    #[error("Invalid project field '{field}': {message}")]
    InvalidProject {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No project exists for the given name and access key.
    #[error("Project not found: {project_name}")]
    ProjectNotFound {
        /// The project name that was looked up.
        project_name: String,
    },

    /// A different name and access key pair already occupies the storage
    /// key this project would be saved under.
    #[error("Project conflicts with an existing project: {project_name}")]
    ProjectConflict {
        /// The project name being saved.
        project_name: String,
    },

    /// An employee id was already present in the roster.
    #[error("Duplicate employee id: {id}")]
    DuplicateEmployee {
        /// The duplicated id.
        id: String,
    },

    /// No employee with the given id exists in the roster.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The project store failed to read or write a record.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the storage failure.
        message: String,
    },

    /// Rendering an export format failed.
    #[error("Export error: {message}")]
    ExportError {
        /// A description of the export failure.
        message: String,
    },
}

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        EngineError::ExportError {
            message: err.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
