//! Application state for the compensation rollup API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::storage::{MemoryProjectStore, ProjectStore};

/// Shared application state.
///
/// Holds the loaded configuration and the project store used by every
/// request handler.
#[derive(Clone)]
pub struct AppState {
    /// The loaded rollup configuration.
    config: Arc<ConfigLoader>,
    /// Where projects are saved.
    store: Arc<dyn ProjectStore>,
}

impl AppState {
    /// Creates application state over the given configuration and store.
    pub fn new(config: ConfigLoader, store: Arc<dyn ProjectStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Creates application state with an empty in-memory project store.
    pub fn with_memory_store(config: ConfigLoader) -> Self {
        Self::new(config, Arc::new(MemoryProjectStore::new()))
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the project store.
    pub fn store(&self) -> &dyn ProjectStore {
        self.store.as_ref()
    }
}
