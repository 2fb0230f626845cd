//! Budget settings for one review cycle.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Allowances and policy knobs for a review cycle.
///
/// Settings are threaded explicitly into every aggregation call. Changing
/// them only affects budget output; values stored on employees are untouched.
///
/// # Example
///
/// ```
/// use comp_rollup::models::BudgetSettings;
/// use rust_decimal::Decimal;
///
/// let settings = BudgetSettings::default();
/// assert_eq!(settings.base_salary_increase_allowance, Decimal::from(50_000));
/// assert_eq!(settings.max_over_budget_percent, Decimal::from(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSettings {
    /// Allowance for the sum of base-salary increases.
    #[serde(default = "default_base_allowance")]
    pub base_salary_increase_allowance: Decimal,
    /// Allowance for the net stock increase.
    #[serde(default = "default_stock_allowance")]
    pub stock_increase_allowance: Decimal,
    /// Merit percentage given to new employees.
    #[serde(default = "default_standard_merit")]
    pub standard_merit_percent: Decimal,
    /// How far (in percent of the allowance) usage may exceed an allowance
    /// before the category counts as over budget.
    #[serde(default = "default_tolerance")]
    pub max_over_budget_percent: Decimal,
}

fn default_base_allowance() -> Decimal {
    Decimal::from(50_000)
}

fn default_stock_allowance() -> Decimal {
    Decimal::from(25_000)
}

fn default_standard_merit() -> Decimal {
    Decimal::new(40, 1)
}

fn default_tolerance() -> Decimal {
    Decimal::from(5)
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            base_salary_increase_allowance: default_base_allowance(),
            stock_increase_allowance: default_stock_allowance(),
            standard_merit_percent: default_standard_merit(),
            max_over_budget_percent: default_tolerance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: BudgetSettings =
            serde_json::from_str(r#"{ "base_salary_increase_allowance": "80000" }"#).unwrap();

        assert_eq!(settings.base_salary_increase_allowance, dec("80000"));
        assert_eq!(settings.stock_increase_allowance, dec("25000"));
        assert_eq!(settings.standard_merit_percent, dec("4.0"));
        assert_eq!(settings.max_over_budget_percent, dec("5"));
    }

    #[test]
    fn test_empty_object_equals_default() {
        let settings: BudgetSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, BudgetSettings::default());
    }

    #[test]
    fn test_accepts_numeric_json() {
        let settings: BudgetSettings = serde_json::from_str(
            r#"{
                "base_salary_increase_allowance": 60000,
                "stock_increase_allowance": 0,
                "standard_merit_percent": 3.5,
                "max_over_budget_percent": 10
            }"#,
        )
        .unwrap();

        assert_eq!(settings.stock_increase_allowance, Decimal::ZERO);
        assert_eq!(settings.standard_merit_percent, dec("3.5"));
    }
}
