//! Level breakdown aggregation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{AuditStep, Employee, LevelBreakdown};

use super::currency::{ExchangeRates, to_common_unit};

/// Bucket name for employees without a current level.
pub const UNSPECIFIED_LEVEL: &str = "unspecified";

/// The result of grouping a roster by level.
#[derive(Debug, Clone)]
pub struct LevelBreakdownResult {
    /// One entry per distinct level, ordered by level code.
    pub levels: Vec<LevelBreakdown>,
    /// The audit step recording this aggregation.
    pub audit_step: AuditStep,
}

#[derive(Default)]
struct LevelAccumulator {
    count: u32,
    current_total: Decimal,
    proposed_total: Decimal,
    percent_sum: Decimal,
}

/// Groups employees by current level and aggregates each group.
///
/// Salaries are summed in the common unit. Each group reports the aggregate
/// increase over its totals alongside the mean of the members' own
/// percentages; the two differ whenever salaries within a level differ.
/// Totals saturate, and an aggregate percentage that is undefined or out of
/// range is zero.
///
/// # Examples
///
/// ```
/// use comp_rollup::calculation::{ExchangeRates, calculate_level_breakdown};
/// use comp_rollup::models::{BudgetSettings, Employee};
/// use rust_decimal::Decimal;
///
/// let settings = BudgetSettings::default();
/// let mut employee = Employee::new("Ada", Decimal::from(100_000), &settings);
/// employee.current_level = Some("L4".to_string());
///
/// let result = calculate_level_breakdown(&[employee], &ExchangeRates::default(), 1);
/// assert_eq!(result.levels.len(), 1);
/// assert_eq!(result.levels[0].level, "L4");
/// ```
pub fn calculate_level_breakdown(
    employees: &[Employee],
    rates: &ExchangeRates,
    step_number: u32,
) -> LevelBreakdownResult {
    let mut groups: BTreeMap<String, LevelAccumulator> = BTreeMap::new();

    for employee in employees {
        let level = employee.level_key().unwrap_or(UNSPECIFIED_LEVEL);
        let group = groups.entry(level.to_string()).or_default();
        group.count += 1;
        group.current_total = group.current_total.saturating_add(to_common_unit(
            employee.current_base_salary,
            &employee.currency,
            rates,
        ));
        group.proposed_total = group.proposed_total.saturating_add(to_common_unit(
            employee.proposed_base_salary,
            &employee.currency,
            rates,
        ));
        group.percent_sum = group.percent_sum.saturating_add(employee.total_increase_percent);
    }

    let levels: Vec<LevelBreakdown> = groups
        .into_iter()
        .map(|(level, acc)| {
            let aggregate_increase_percent = acc
                .proposed_total
                .checked_sub(acc.current_total)
                .and_then(|increase| increase.checked_div(acc.current_total))
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .map(|p| p.normalize())
                .unwrap_or(Decimal::ZERO);
            LevelBreakdown {
                level,
                employee_count: acc.count,
                current_total: acc.current_total,
                proposed_total: acc.proposed_total,
                aggregate_increase_percent,
                mean_individual_increase_percent: (acc.percent_sum / Decimal::from(acc.count))
                    .normalize(),
            }
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "level_breakdown".to_string(),
        rule_name: "Level Breakdown".to_string(),
        input: serde_json::json!({
            "employee_count": employees.len(),
        }),
        output: serde_json::json!({
            "levels": levels
                .iter()
                .map(|l| serde_json::json!({
                    "level": l.level,
                    "employee_count": l.employee_count,
                    "aggregate_increase_percent": l.aggregate_increase_percent.to_string(),
                    "mean_individual_increase_percent": l.mean_individual_increase_percent.to_string(),
                }))
                .collect::<Vec<_>>(),
        }),
        reasoning: format!(
            "Grouped {} employees into {} levels",
            employees.len(),
            levels.len()
        ),
    };

    LevelBreakdownResult { levels, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::total_increase_percent;
    use crate::models::{BudgetSettings, Currency};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee(level: Option<&str>, base: &str, proposed: &str) -> Employee {
        let mut employee = Employee::new("Test", dec(base), &BudgetSettings::default());
        employee.current_level = level.map(str::to_string);
        employee.proposed_base_salary = dec(proposed);
        employee.increase_amount = employee.proposed_base_salary - employee.current_base_salary;
        employee.total_increase_percent =
            total_increase_percent(employee.current_base_salary, employee.proposed_base_salary);
        employee
    }

    #[test]
    fn test_aggregate_and_mean_diverge_on_unequal_salaries() {
        let employees = vec![
            create_test_employee(Some("L3"), "50000", "55000"),
            create_test_employee(Some("L3"), "150000", "153000"),
        ];

        let result = calculate_level_breakdown(&employees, &ExchangeRates::default(), 1);
        let level = &result.levels[0];

        assert_eq!(level.employee_count, 2);
        assert_eq!(level.current_total, dec("200000"));
        assert_eq!(level.proposed_total, dec("208000"));
        // 8000 / 200000
        assert_eq!(level.aggregate_increase_percent, dec("4"));
        // (10 + 2) / 2
        assert_eq!(level.mean_individual_increase_percent, dec("6"));
    }

    #[test]
    fn test_levels_are_ordered_by_code() {
        let employees = vec![
            create_test_employee(Some("L5"), "100000", "104000"),
            create_test_employee(Some("L2"), "60000", "62000"),
            create_test_employee(Some("L4"), "90000", "93000"),
        ];

        let result = calculate_level_breakdown(&employees, &ExchangeRates::default(), 1);
        let codes: Vec<&str> = result.levels.iter().map(|l| l.level.as_str()).collect();

        assert_eq!(codes, vec!["L2", "L4", "L5"]);
    }

    #[test]
    fn test_missing_level_goes_to_unspecified_bucket() {
        let employees = vec![
            create_test_employee(None, "100000", "104000"),
            create_test_employee(Some("  "), "80000", "84000"),
        ];

        let result = calculate_level_breakdown(&employees, &ExchangeRates::default(), 1);

        assert_eq!(result.levels.len(), 1);
        assert_eq!(result.levels[0].level, UNSPECIFIED_LEVEL);
        assert_eq!(result.levels[0].employee_count, 2);
    }

    #[test]
    fn test_totals_are_normalized() {
        let mut employee = create_test_employee(Some("L3"), "80000", "84000");
        employee.currency = Currency::Gbp;

        let result = calculate_level_breakdown(&[employee], &ExchangeRates::default(), 1);

        assert_eq!(result.levels[0].current_total, dec("100000"));
        assert_eq!(result.levels[0].proposed_total, dec("105000"));
        assert_eq!(result.levels[0].aggregate_increase_percent, dec("5"));
    }

    #[test]
    fn test_zero_current_total_yields_zero_aggregate() {
        let employees = vec![create_test_employee(Some("intern"), "0", "1000")];

        let result = calculate_level_breakdown(&employees, &ExchangeRates::default(), 1);

        assert_eq!(result.levels[0].aggregate_increase_percent, Decimal::ZERO);
        assert_eq!(result.levels[0].mean_individual_increase_percent, Decimal::ZERO);
    }

    #[test]
    fn test_empty_roster_has_no_levels() {
        let result = calculate_level_breakdown(&[], &ExchangeRates::default(), 7);

        assert!(result.levels.is_empty());
        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(result.audit_step.rule_id, "level_breakdown");
    }

    #[test]
    fn test_extreme_totals_saturate() {
        let mut employee = create_test_employee(Some("L9"), "0", "0");
        employee.current_base_salary = dec("0.0000000000000000000000001");
        employee.proposed_base_salary = Decimal::MAX;
        employee.total_increase_percent = Decimal::MAX;
        let employees = vec![employee.clone(), employee];

        let result = calculate_level_breakdown(&employees, &ExchangeRates::default(), 1);
        let level = &result.levels[0];

        assert_eq!(level.proposed_total, Decimal::MAX);
        assert_eq!(level.aggregate_increase_percent, Decimal::ZERO);
        assert_eq!(level.mean_individual_increase_percent, (Decimal::MAX / dec("2")).normalize());
    }
}
