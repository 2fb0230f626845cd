//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rollup
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::calculation::ExchangeRates;
use crate::error::{EngineError, EngineResult};
use crate::models::BudgetSettings;

use super::types::{BudgetConfig, RollupConfig};

/// Loads and provides access to rollup configuration.
///
/// # Directory Structure
///
/// ```text
/// config/comp_rollup/
/// ├── budget.yaml          # Default budget settings
/// └── exchange_rates.yaml  # Conversion table into the common unit
/// ```
///
/// # Example
///
/// ```no_run
/// use comp_rollup::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/comp_rollup").unwrap();
/// println!("Base allowance: {}", loader.budget_settings().base_salary_increase_allowance);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: RollupConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns `ConfigNotFound` if either file is missing and
    /// `ConfigParseError` if either file is not valid YAML for its type.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use comp_rollup::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/comp_rollup")?;
    /// # Ok::<(), comp_rollup::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let budget = Self::load_yaml::<BudgetConfig>(&path.join("budget.yaml"))?;
        let exchange_rates = Self::load_yaml::<ExchangeRates>(&path.join("exchange_rates.yaml"))?;

        Ok(Self {
            config: RollupConfig::new(budget, exchange_rates),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying rollup configuration.
    pub fn config(&self) -> &RollupConfig {
        &self.config
    }

    /// Returns the default budget settings.
    pub fn budget_settings(&self) -> &BudgetSettings {
        self.config.budget_settings()
    }

    /// Returns the exchange-rate table.
    pub fn exchange_rates(&self) -> &ExchangeRates {
        self.config.exchange_rates()
    }
}
