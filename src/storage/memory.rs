//! In-process project store.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::EngineResult;
use crate::models::{BudgetSettings, Employee};

use super::{
    ProjectKey, ProjectRecord, ProjectStore, ProjectSummary, StoredProject, sort_summaries,
    storage_error,
};

/// Keeps projects in a map for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    projects: RwLock<BTreeMap<String, StoredProject>>,
}

impl MemoryProjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStore for MemoryProjectStore {
    fn save(
        &self,
        key: &ProjectKey,
        employees: Vec<Employee>,
        budget_settings: BudgetSettings,
    ) -> EngineResult<ProjectRecord> {
        let stored = StoredProject::new(key, employees, budget_settings)?;
        let record = stored.record.clone();
        let mut projects = self
            .projects
            .write()
            .map_err(|e| storage_error("project map lock poisoned", e))?;
        let storage_key = key.storage_key();
        if projects.get(&storage_key).is_some_and(|existing| !existing.matches(key)) {
            return Err(key.conflict());
        }
        projects.insert(storage_key, stored);
        Ok(record)
    }

    fn load(&self, key: &ProjectKey) -> EngineResult<ProjectRecord> {
        let projects = self
            .projects
            .read()
            .map_err(|e| storage_error("project map lock poisoned", e))?;
        projects
            .get(&key.storage_key())
            .filter(|stored| stored.matches(key))
            .map(|stored| stored.record.clone())
            .ok_or_else(|| key.not_found())
    }

    fn delete(&self, key: &ProjectKey) -> EngineResult<()> {
        let mut projects = self
            .projects
            .write()
            .map_err(|e| storage_error("project map lock poisoned", e))?;
        let storage_key = key.storage_key();
        if projects.get(&storage_key).is_some_and(|stored| stored.matches(key)) {
            projects.remove(&storage_key);
        }
        Ok(())
    }

    fn list(&self) -> EngineResult<Vec<ProjectSummary>> {
        let projects = self
            .projects
            .read()
            .map_err(|e| storage_error("project map lock poisoned", e))?;
        let mut summaries: Vec<ProjectSummary> = projects
            .values()
            .map(|stored| ProjectSummary::from(&stored.record))
            .collect();
        sort_summaries(&mut summaries);
        Ok(summaries)
    }
}
