//! Configuration loading for the compensation rollup engine.
//!
//! This module loads the default budget settings and the exchange-rate table
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use comp_rollup::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/comp_rollup").unwrap();
//! println!("Standard merit: {}%", config.budget_settings().standard_merit_percent);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BudgetConfig, RollupConfig};
