//! Configuration types for the rollup engine.
//!
//! These structures are deserialized from the YAML files in a
//! configuration directory.

use serde::Deserialize;

use crate::calculation::ExchangeRates;
use crate::models::BudgetSettings;

/// Contents of `budget.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetConfig {
    /// A label for the review cycle these defaults belong to.
    #[serde(default)]
    pub review_cycle: Option<String>,
    /// Budget settings new projects start from.
    #[serde(default)]
    pub budget_settings: BudgetSettings,
}

/// The complete rollup configuration.
#[derive(Debug, Clone)]
pub struct RollupConfig {
    budget: BudgetConfig,
    exchange_rates: ExchangeRates,
}

impl RollupConfig {
    /// Creates a configuration from its parts.
    pub fn new(budget: BudgetConfig, exchange_rates: ExchangeRates) -> Self {
        Self {
            budget,
            exchange_rates,
        }
    }

    /// Returns the review cycle label, if configured.
    pub fn review_cycle(&self) -> Option<&str> {
        self.budget.review_cycle.as_deref()
    }

    /// Returns the default budget settings.
    pub fn budget_settings(&self) -> &BudgetSettings {
        &self.budget.budget_settings
    }

    /// Returns the exchange-rate table used for aggregation.
    pub fn exchange_rates(&self) -> &ExchangeRates {
        &self.exchange_rates
    }
}

impl Default for RollupConfig {
    /// Built-in budget defaults and the fixed USD/GBP/EUR rate table.
    fn default() -> Self {
        Self::new(
            BudgetConfig {
                review_cycle: None,
                budget_settings: BudgetSettings::default(),
            },
            ExchangeRates::default(),
        )
    }
}
