//! Report assembly.
//!
//! Reconciles each employee's increase fields, runs the budget and level
//! aggregators over the result and gathers their output, the roster totals,
//! the flagged list and the promotion list into a [`Report`].

use std::cmp::Reverse;

use rust_decimal::Decimal;

use crate::models::{
    AuditTrace, AuditWarning, BudgetSettings, Employee, FlaggedEmployee, PromotedEmployee, Report,
    RosterTotals,
};

use super::budget::{base_increase_used, calculate_budget_status, stock_increase_used};
use super::currency::{ExchangeRates, sum_common_units};
use super::increase::reconcile_increase;
use super::level_breakdown::calculate_level_breakdown;

/// Builds the report for a roster using the default exchange-rate table.
///
/// Each employee is passed through
/// [`reconcile_increase`](super::reconcile_increase) first, so records that
/// were never resolved still aggregate with
/// `proposed == current + increase`.
///
/// # Examples
///
/// ```
/// use comp_rollup::calculation::{compute_report, resolve_increase};
/// use comp_rollup::models::{BudgetSettings, EditedField, Employee};
/// use rust_decimal::Decimal;
///
/// let settings = BudgetSettings::default();
/// let employee = Employee::new("Ada", Decimal::from(100_000), &settings);
/// let employee = resolve_increase(&employee, EditedField::Initial, &settings);
///
/// let report = compute_report(&[employee], &settings);
/// assert_eq!(report.budget.base.used, Decimal::from(4_000));
/// assert!(!report.budget.is_over_budget);
/// ```
pub fn compute_report(employees: &[Employee], settings: &BudgetSettings) -> Report {
    compute_report_with_rates(employees, settings, &ExchangeRates::default())
}

/// Builds the report for a roster against an injected exchange-rate table.
pub fn compute_report_with_rates(
    employees: &[Employee],
    settings: &BudgetSettings,
    rates: &ExchangeRates,
) -> Report {
    let employees: Vec<Employee> = employees
        .iter()
        .map(|e| reconcile_increase(e, settings))
        .collect();

    let mut audit_trace = AuditTrace::default();
    audit_trace.warnings.extend(zero_salary_warnings(&employees));

    let budget = calculate_budget_status(&employees, settings, rates, 1);
    let next_step = budget.audit_steps.len() as u32 + 1;
    audit_trace.steps.extend(budget.audit_steps);
    audit_trace.warnings.extend(budget.warnings);

    let breakdown = calculate_level_breakdown(&employees, rates, next_step);
    audit_trace.steps.push(breakdown.audit_step);

    let flagged: Vec<FlaggedEmployee> = employees
        .iter()
        .filter(|e| e.flagged)
        .map(|e| FlaggedEmployee {
            id: e.id.clone(),
            name: e.name.clone(),
            current_level: e.current_level.clone(),
            total_increase_percent: e.total_increase_percent,
        })
        .collect();

    Report {
        budget: budget.status,
        levels: breakdown.levels,
        totals: calculate_totals(&employees, rates, flagged.len() as u32),
        flagged,
        promotions: promotions(&employees),
        audit_trace,
    }
}

/// Sums the roster in the common unit.
pub fn calculate_totals(employees: &[Employee], rates: &ExchangeRates, flagged_count: u32) -> RosterTotals {
    let sum = |field: fn(&Employee) -> Decimal| -> Decimal {
        sum_common_units(employees.iter().map(|e| (field(e), &e.currency)), rates)
    };

    let base_increase = base_increase_used(employees, rates);
    let stock_increase = stock_increase_used(employees, rates);

    RosterTotals {
        employee_count: employees.len() as u32,
        flagged_count,
        current_base: sum(|e| e.current_base_salary),
        proposed_base: sum(|e| e.proposed_base_salary),
        current_stock: sum(|e| e.current_stock),
        proposed_stock: sum(|e| e.proposed_stock),
        base_increase,
        stock_increase,
        total_increase: base_increase.saturating_add(stock_increase),
    }
}

/// Employees with a promotion, highest current level number first. Ties
/// keep roster order.
fn promotions(employees: &[Employee]) -> Vec<PromotedEmployee> {
    let mut promoted: Vec<&Employee> = employees.iter().filter(|e| e.has_promotion).collect();
    promoted.sort_by_key(|e| Reverse(level_number(e.current_level.as_deref())));

    promoted
        .into_iter()
        .map(|e| PromotedEmployee {
            id: e.id.clone(),
            name: e.name.clone(),
            current_level: e.current_level.clone(),
            next_level: e.next_level.clone(),
            merit_percent: e.merit_percent.unwrap_or(Decimal::ZERO),
            promotion_percent: e.promotion_percent,
        })
        .collect()
}

/// The number in a level code once its track letter is dropped: `P3` is 3,
/// `M4` is 4. A code without a leading number counts as 0.
fn level_number(level: Option<&str>) -> i64 {
    let Some(level) = level else {
        return 0;
    };
    let stripped = level.replacen(['P', 'M'], "", 1);
    let text = stripped.trim_start();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}

fn zero_salary_warnings(employees: &[Employee]) -> Vec<AuditWarning> {
    employees
        .iter()
        .filter(|e| e.current_base_salary.is_zero())
        .map(|e| AuditWarning {
            code: "ZERO_BASE_SALARY".to_string(),
            message: format!(
                "Employee {} ({}) has no current base salary; increase percentages are reported as 0",
                e.name, e.id
            ),
            severity: "low".to_string(),
        })
        .collect()
}
