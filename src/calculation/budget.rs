//! Budget aggregation.
//!
//! Sums the roster's base-salary and stock increases in the common unit and
//! compares them against the allowances in [`BudgetSettings`].

use rust_decimal::Decimal;

use crate::models::{
    AuditStep, AuditWarning, BudgetCategory, BudgetSettings, BudgetStatus, CategoryBudget,
    Employee,
};

use super::currency::{ExchangeRates, sum_common_units};

/// The result of aggregating a roster against the budget.
#[derive(Debug, Clone)]
pub struct BudgetStatusResult {
    /// Status for both categories.
    pub status: BudgetStatus,
    /// One audit step per category, base first.
    pub audit_steps: Vec<AuditStep>,
    /// Zero-allowance and over-budget warnings.
    pub warnings: Vec<AuditWarning>,
}

/// Computes the usage of a single category against its allowance.
///
/// `max_allowed = allowance * (1 + tolerance / 100)`. Usage strictly above
/// the maximum is over budget. Utilization is `None` for a zero allowance or
/// when the ratio is out of range. Sums and differences saturate.
///
/// # Examples
///
/// ```
/// use comp_rollup::calculation::category_budget;
/// use rust_decimal::Decimal;
///
/// let status = category_budget(Decimal::from(50_000), Decimal::from(5), Decimal::from(52_000));
/// assert_eq!(status.max_allowed, Decimal::from(52_500));
/// assert!(!status.over_budget);
/// assert_eq!(status.remaining, Decimal::from(-2_000));
/// assert_eq!(status.utilization_percent, Some(Decimal::from(104)));
/// ```
pub fn category_budget(allowance: Decimal, tolerance_percent: Decimal, used: Decimal) -> CategoryBudget {
    let factor = Decimal::ONE.saturating_add(tolerance_percent / Decimal::ONE_HUNDRED);
    let max_allowed = allowance.saturating_mul(factor).normalize();
    let utilization_percent = used
        .checked_div(allowance)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|p| p.normalize());

    CategoryBudget {
        allowance,
        max_allowed,
        used,
        remaining: allowance.saturating_sub(used),
        over_budget: used > max_allowed,
        utilization_percent,
    }
}

/// Sum of base-salary increase amounts in the common unit.
pub fn base_increase_used(employees: &[Employee], rates: &ExchangeRates) -> Decimal {
    sum_common_units(employees.iter().map(|e| (e.increase_amount, &e.currency)), rates)
}

/// Proposed stock minus current stock, each summed in the common unit.
pub fn stock_increase_used(employees: &[Employee], rates: &ExchangeRates) -> Decimal {
    let proposed = sum_common_units(employees.iter().map(|e| (e.proposed_stock, &e.currency)), rates);
    let current = sum_common_units(employees.iter().map(|e| (e.current_stock, &e.currency)), rates);
    proposed.saturating_sub(current)
}

/// Aggregates a roster into a [`BudgetStatus`].
///
/// Employees are expected to have been through the increase resolver; their
/// stored `increase_amount` is what counts against the base budget.
///
/// # Arguments
///
/// * `employees` - The resolved roster
/// * `settings` - Allowances and tolerance for this review cycle
/// * `rates` - The conversion table into the common unit
/// * `step_number` - The step number of the first audit step
pub fn calculate_budget_status(
    employees: &[Employee],
    settings: &BudgetSettings,
    rates: &ExchangeRates,
    step_number: u32,
) -> BudgetStatusResult {
    let tolerance = settings.max_over_budget_percent;
    let base = category_budget(
        settings.base_salary_increase_allowance,
        tolerance,
        base_increase_used(employees, rates),
    );
    let stock = category_budget(
        settings.stock_increase_allowance,
        tolerance,
        stock_increase_used(employees, rates),
    );

    let mut warnings = Vec::new();
    let mut audit_steps = Vec::with_capacity(2);
    for (offset, (category, budget)) in [(BudgetCategory::Base, &base), (BudgetCategory::Stock, &stock)]
        .into_iter()
        .enumerate()
    {
        audit_steps.push(audit_step(category, budget, tolerance, step_number + offset as u32));
        warnings.extend(category_warnings(category, budget));
    }

    let is_over_budget = base.over_budget || stock.over_budget;
    BudgetStatusResult {
        status: BudgetStatus {
            base,
            stock,
            is_over_budget,
        },
        audit_steps,
        warnings,
    }
}

fn audit_step(
    category: BudgetCategory,
    budget: &CategoryBudget,
    tolerance: Decimal,
    step_number: u32,
) -> AuditStep {
    let utilization = budget
        .utilization_percent
        .map(|u| u.normalize().to_string());

    let reasoning = match &utilization {
        Some(u) => format!(
            "{} budget: {} used of {} ({}%), max allowed {} at {}% tolerance{}",
            category.as_str(),
            budget.used.normalize(),
            budget.allowance.normalize(),
            u,
            budget.max_allowed.normalize(),
            tolerance.normalize(),
            if budget.over_budget { ", over budget" } else { "" }
        ),
        None => format!(
            "{} budget: {} used against a zero allowance, utilization undefined",
            category.as_str(),
            budget.used.normalize()
        ),
    };

    AuditStep {
        step_number,
        rule_id: format!("budget_{}", category.as_str()),
        rule_name: match category {
            BudgetCategory::Base => "Base Salary Budget".to_string(),
            BudgetCategory::Stock => "Stock Budget".to_string(),
        },
        input: serde_json::json!({
            "allowance": budget.allowance.normalize().to_string(),
            "tolerance_percent": tolerance.normalize().to_string(),
            "used": budget.used.normalize().to_string(),
        }),
        output: serde_json::json!({
            "max_allowed": budget.max_allowed.normalize().to_string(),
            "remaining": budget.remaining.normalize().to_string(),
            "over_budget": budget.over_budget,
            "utilization_percent": utilization,
        }),
        reasoning,
    }
}

fn category_warnings(category: BudgetCategory, budget: &CategoryBudget) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();
    if budget.allowance.is_zero() {
        warnings.push(AuditWarning {
            code: format!("ZERO_{}_ALLOWANCE", category.as_str().to_uppercase()),
            message: format!(
                "The {} allowance is zero; utilization cannot be computed",
                category.as_str()
            ),
            severity: "medium".to_string(),
        });
    }
    if budget.over_budget {
        warnings.push(AuditWarning {
            code: format!("{}_OVER_BUDGET", category.as_str().to_uppercase()),
            message: format!(
                "{} increases of {} exceed the maximum allowed {}",
                category.as_str(),
                budget.used.normalize(),
                budget.max_allowed.normalize()
            ),
            severity: "high".to_string(),
        });
    }
    warnings
}
