//! Directory-backed project store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::EngineResult;
use crate::models::{BudgetSettings, Employee};

use super::{
    ProjectKey, ProjectRecord, ProjectStore, ProjectSummary, StoredProject, sort_summaries,
    storage_error,
};

const EXTENSION: &str = "json";

/// Stores each project as `{project_name}-{access_key}.json` in a directory.
///
/// Writes go to a temporary file that is renamed over the target, so a
/// reader never sees a half-written project.
#[derive(Debug, Clone)]
pub struct FileProjectStore {
    dir: PathBuf,
}

impl FileProjectStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> EngineResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| storage_error(&format!("cannot create {}", dir.display()), e))?;
        Ok(Self { dir })
    }

    /// The directory projects are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &ProjectKey) -> PathBuf {
        self.dir.join(format!("{}.{}", key.storage_key(), EXTENSION))
    }

    fn read(&self, path: &Path) -> EngineResult<Option<StoredProject>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error(&format!("cannot read {}", path.display()), e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| storage_error(&format!("cannot parse {}", path.display()), e))
    }
}

impl ProjectStore for FileProjectStore {
    fn save(
        &self,
        key: &ProjectKey,
        employees: Vec<Employee>,
        budget_settings: BudgetSettings,
    ) -> EngineResult<ProjectRecord> {
        let stored = StoredProject::new(key, employees, budget_settings)?;
        let json = serde_json::to_string_pretty(&stored)
            .map_err(|e| storage_error("cannot serialize project", e))?;

        let path = self.path_for(key);
        // An unreadable file has no owner to protect and is overwritten.
        if let Ok(Some(existing)) = self.read(&path) {
            if !existing.matches(key) {
                return Err(key.conflict());
            }
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| storage_error(&format!("cannot write {}", tmp.display()), e))?;
        fs::rename(&tmp, &path)
            .map_err(|e| storage_error(&format!("cannot replace {}", path.display()), e))?;

        Ok(stored.record)
    }

    fn load(&self, key: &ProjectKey) -> EngineResult<ProjectRecord> {
        self.read(&self.path_for(key))?
            .filter(|stored| stored.matches(key))
            .map(|stored| stored.record)
            .ok_or_else(|| key.not_found())
    }

    fn delete(&self, key: &ProjectKey) -> EngineResult<()> {
        let path = self.path_for(key);
        match self.read(&path)? {
            Some(stored) if stored.matches(key) => fs::remove_file(&path)
                .or_else(|e| if e.kind() == ErrorKind::NotFound { Ok(()) } else { Err(e) })
                .map_err(|e| storage_error(&format!("cannot delete {}", path.display()), e)),
            _ => Ok(()),
        }
    }

    fn list(&self) -> EngineResult<Vec<ProjectSummary>> {
        let entries = fs::read_dir(&self.dir)
            .map_err(|e| storage_error(&format!("cannot list {}", self.dir.display()), e))?;

        let mut summaries = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| storage_error(&format!("cannot list {}", self.dir.display()), e))?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            match self.read(&path) {
                Ok(Some(stored)) => summaries.push(ProjectSummary::from(&stored.record)),
                Ok(None) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable project file"),
            }
        }

        sort_summaries(&mut summaries);
        Ok(summaries)
    }
}
