//! Employee model and related types.
//!
//! This module defines the [`Employee`] roster row, the [`Currency`] set an
//! employee is paid in, and the [`EditedField`] tag that tells the increase
//! resolver which representation of the increase was just changed.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BudgetSettings;
use super::lenient::{decimal_or_zero, optional_decimal};

/// The currency an employee's figures are expressed in.
///
/// The enumerated set is USD, GBP and EUR. Any other code is preserved as
/// [`Currency::Other`] so it survives a storage round trip; such codes
/// normalize at rate 1.0. A missing or blank code is USD.
///
/// # Example
///
/// ```
/// use comp_rollup::models::Currency;
///
/// assert_eq!(Currency::from("GBP"), Currency::Gbp);
/// assert_eq!(Currency::from(""), Currency::Usd);
/// assert_eq!(Currency::from("JPY").code(), "JPY");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    /// United States dollar, the common unit.
    #[default]
    Usd,
    /// Pound sterling.
    Gbp,
    /// Euro.
    Eur,
    /// A code outside the enumerated set.
    Other(String),
}

impl Currency {
    /// Returns the ISO-style currency code.
    pub fn code(&self) -> &str {
        match self {
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Eur => "EUR",
            Currency::Other(code) => code,
        }
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        let code = code.trim();
        match code.to_ascii_uppercase().as_str() {
            "" | "USD" => Currency::Usd,
            "GBP" => Currency::Gbp,
            "EUR" => Currency::Eur,
            _ => Currency::Other(code.to_string()),
        }
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        Currency::from(code.as_str())
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which representation of an employee's increase was edited last.
///
/// The increase resolver derives the other representations from this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditedField {
    /// Initial load; nothing has been edited yet.
    #[default]
    #[serde(rename = "none", alias = "initial")]
    Initial,
    /// The merit percentage was edited.
    MeritPercent,
    /// The promotion percentage was edited.
    PromotionPercent,
    /// The absolute increase amount was edited.
    IncreaseAmount,
    /// The proposed base salary was edited.
    ProposedBaseSalary,
}

/// One row of the review roster.
///
/// The record is flat: every field is a scalar or an optional scalar so that
/// it crosses a storage or network boundary as a plain key-value map.
/// Numeric inputs that are missing, blank or non-numeric read as zero, or
/// as absent for the optional figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier, stable for the record's lifetime.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// The currency all of this employee's figures are expressed in.
    #[serde(default)]
    pub currency: Currency,
    /// Current level code (e.g. "P3"). `None` falls into the unspecified bucket.
    #[serde(default)]
    pub current_level: Option<String>,
    /// Level code after promotion; only meaningful when `has_promotion` is set.
    #[serde(default)]
    pub next_level: Option<String>,
    /// Salary representing 100% market position at the current level.
    #[serde(default, deserialize_with = "optional_decimal")]
    pub current_level_midpoint: Option<Decimal>,
    /// Salary representing 100% market position at the next level.
    #[serde(default, deserialize_with = "optional_decimal")]
    pub next_level_midpoint: Option<Decimal>,
    /// User-supplied market position before any increase, in percent.
    #[serde(default, deserialize_with = "optional_decimal")]
    pub current_market_position: Option<Decimal>,
    /// Current base salary.
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub current_base_salary: Decimal,
    /// Current stock value.
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub current_stock: Decimal,
    /// Merit increase percentage. `None` falls back to the standard merit rate.
    #[serde(default, deserialize_with = "optional_decimal")]
    pub merit_percent: Option<Decimal>,
    /// Promotion increase percentage; excluded from the total unless promoted.
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub promotion_percent: Decimal,
    /// Whether the employee is being promoted this cycle.
    #[serde(default)]
    pub has_promotion: bool,
    /// The resolved (rounded) base-salary increase.
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub increase_amount: Decimal,
    /// Base salary after the increase.
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub proposed_base_salary: Decimal,
    /// Stock value after the review.
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub proposed_stock: Decimal,
    /// Derived: base increase as a percentage of current base salary.
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub total_increase_percent: Decimal,
    /// Derived: marked for manual review.
    #[serde(default)]
    pub flagged: bool,
    /// Derived: proposed salary as a percentage of the current-level midpoint.
    #[serde(default, deserialize_with = "optional_decimal")]
    pub after_increase_market_position: Option<Decimal>,
    /// Derived: proposed salary as a percentage of the next-level midpoint.
    #[serde(default, deserialize_with = "optional_decimal")]
    pub next_level_market_position: Option<Decimal>,
}

impl Employee {
    /// Creates an employee with a generated id and the standard merit rate.
    ///
    /// Increase fields are left empty; run the record through
    /// [`resolve_increase`](crate::calculation::resolve_increase) to populate them.
    ///
    /// # Examples
    ///
    /// ```
    /// use comp_rollup::models::{BudgetSettings, Employee};
    /// use rust_decimal::Decimal;
    ///
    /// let settings = BudgetSettings::default();
    /// let employee = Employee::new("Ada", Decimal::from(100_000), &settings);
    /// assert_eq!(employee.merit_percent, Some(settings.standard_merit_percent));
    /// assert!(!employee.id.is_empty());
    /// ```
    pub fn new(name: impl Into<String>, current_base_salary: Decimal, settings: &BudgetSettings) -> Self {
        Employee {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            currency: Currency::default(),
            current_level: None,
            next_level: None,
            current_level_midpoint: None,
            next_level_midpoint: None,
            current_market_position: None,
            current_base_salary,
            current_stock: Decimal::ZERO,
            merit_percent: Some(settings.standard_merit_percent),
            promotion_percent: Decimal::ZERO,
            has_promotion: false,
            increase_amount: Decimal::ZERO,
            proposed_base_salary: current_base_salary,
            proposed_stock: Decimal::ZERO,
            total_increase_percent: Decimal::ZERO,
            flagged: false,
            after_increase_market_position: None,
            next_level_market_position: None,
        }
    }

    /// Returns a copy of this record under a freshly generated id.
    pub fn duplicate(&self) -> Self {
        Employee {
            id: Uuid::new_v4().to_string(),
            ..self.clone()
        }
    }

    /// The promotion percentage that counts toward the increase total.
    ///
    /// Zero unless the employee is promoted; the stored value is kept either way.
    pub fn effective_promotion_percent(&self) -> Decimal {
        if self.has_promotion {
            self.promotion_percent
        } else {
            Decimal::ZERO
        }
    }

    /// The level bucket this employee is summarized under.
    pub fn level_key(&self) -> Option<&str> {
        self.current_level
            .as_deref()
            .map(str::trim)
            .filter(|level| !level.is_empty())
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
    fn test_deserialize_minimal_employee_defaults_to_zero() {
        let json = r#"{ "id": "emp_001" }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.currency, Currency::Usd);
        assert_eq!(employee.current_base_salary, Decimal::ZERO);
        assert_eq!(employee.merit_percent, None);
        assert!(!employee.has_promotion);
        assert_eq!(employee.after_increase_market_position, None);
    }

    #[test]
    fn test_deserialize_full_employee() {
        let json = r#"{
            "id": "emp_002",
            "name": "Grace",
            "currency": "GBP",
            "current_level": "P3",
            "next_level": "P4",
            "current_level_midpoint": "120000",
            "current_base_salary": 110000,
            "current_stock": "20000",
            "merit_percent": "4.5",
            "promotion_percent": 6,
            "has_promotion": true
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.currency, Currency::Gbp);
        assert_eq!(employee.current_level.as_deref(), Some("P3"));
        assert_eq!(employee.current_level_midpoint, Some(dec("120000")));
        assert_eq!(employee.current_base_salary, dec("110000"));
        assert_eq!(employee.merit_percent, Some(dec("4.5")));
        assert_eq!(employee.promotion_percent, dec("6"));
    }

    #[test]
    fn test_blank_form_fields_read_as_defaults() {
        let json = r#"{
            "id": "emp_003",
            "current_level_midpoint": "",
            "next_level_midpoint": null,
            "current_market_position": "n/a",
            "current_base_salary": null,
            "current_stock": "",
            "merit_percent": "",
            "promotion_percent": "abc",
            "increase_amount": "",
            "proposed_stock": "twelve"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.current_level_midpoint, None);
        assert_eq!(employee.next_level_midpoint, None);
        assert_eq!(employee.current_market_position, None);
        assert_eq!(employee.current_base_salary, Decimal::ZERO);
        assert_eq!(employee.current_stock, Decimal::ZERO);
        assert_eq!(employee.merit_percent, None);
        assert_eq!(employee.promotion_percent, Decimal::ZERO);
        assert_eq!(employee.increase_amount, Decimal::ZERO);
        assert_eq!(employee.proposed_stock, Decimal::ZERO);
    }

    #[test]
    fn test_serialize_is_flat_key_value_record() {
        let employee = Employee::new("Ada", dec("100000"), &BudgetSettings::default());
        let value = serde_json::to_value(&employee).unwrap();

        let map = value.as_object().unwrap();
        assert!(map.values().all(|v| !v.is_object() && !v.is_array()));
        assert_eq!(map["currency"], "USD");
    }

    #[test]
    fn test_unknown_currency_round_trips() {
        let json = r#"{ "id": "emp_003", "currency": "JPY" }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.currency, Currency::Other("JPY".to_string()));

        let out = serde_json::to_value(&employee).unwrap();
        assert_eq!(out["currency"], "JPY");
    }

    #[test]
    fn test_currency_parsing_is_case_insensitive() {
        assert_eq!(Currency::from("eur"), Currency::Eur);
        assert_eq!(Currency::from(" gbp "), Currency::Gbp);
        assert_eq!(Currency::from("   "), Currency::Usd);
    }

    #[test]
    fn test_edited_field_serialization() {
        assert_eq!(
            serde_json::to_string(&EditedField::Initial).unwrap(),
            "\"none\""
        );
        assert_eq!(
            serde_json::to_string(&EditedField::IncreaseAmount).unwrap(),
            "\"increase_amount\""
        );
        let field: EditedField = serde_json::from_str("\"proposed_base_salary\"").unwrap();
        assert_eq!(field, EditedField::ProposedBaseSalary);
        let field: EditedField = serde_json::from_str("\"initial\"").unwrap();
        assert_eq!(field, EditedField::Initial);
    }

    #[test]
    fn test_new_employee_uses_standard_merit_and_unique_id() {
        let settings = BudgetSettings::default();
        let a = Employee::new("A", dec("50000"), &settings);
        let b = Employee::new("B", dec("50000"), &settings);

        assert_ne!(a.id, b.id);
        assert_eq!(a.merit_percent, Some(dec("4.0")));
        assert_eq!(a.proposed_base_salary, dec("50000"));
    }

    #[test]
    fn test_duplicate_copies_fields_under_new_id() {
        let mut original = Employee::new("A", dec("50000"), &BudgetSettings::default());
        original.increase_amount = dec("2000");
        let copy = original.duplicate();

        assert_ne!(copy.id, original.id);
        assert_eq!(copy.increase_amount, dec("2000"));
        assert_eq!(copy.name, "A");
    }

    #[test]
    fn test_effective_promotion_percent_requires_promotion() {
        let mut employee = Employee::new("A", dec("50000"), &BudgetSettings::default());
        employee.promotion_percent = dec("8");
        assert_eq!(employee.effective_promotion_percent(), Decimal::ZERO);

        employee.has_promotion = true;
        assert_eq!(employee.effective_promotion_percent(), dec("8"));
    }

    #[test]
    fn test_level_key_treats_blank_as_unspecified() {
        let mut employee = Employee::new("A", dec("50000"), &BudgetSettings::default());
        assert_eq!(employee.level_key(), None);

        employee.current_level = Some("  ".to_string());
        assert_eq!(employee.level_key(), None);

        employee.current_level = Some("M3".to_string());
        assert_eq!(employee.level_key(), Some("M3"));
    }
}
