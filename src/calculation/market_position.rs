//! Market position calculation.
//!
//! A market position is a salary expressed as a percentage of a level's
//! midpoint, where the midpoint represents 100% of market.

use rust_decimal::Decimal;

use crate::models::Employee;

/// Market positions derived from an employee's proposed salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarketPositions {
    /// Proposed salary against the current-level midpoint.
    pub after_increase: Option<Decimal>,
    /// Proposed salary against the next-level midpoint; promotions only.
    pub next_level: Option<Decimal>,
}

/// Returns `salary / midpoint * 100`, or `None` without a positive midpoint
/// or when the ratio is out of range.
///
/// # Examples
///
/// ```
/// use comp_rollup::calculation::position_percent;
/// use rust_decimal::Decimal;
///
/// let position = position_percent(Decimal::from(90_000), Some(Decimal::from(100_000)));
/// assert_eq!(position, Some(Decimal::from(90)));
/// assert_eq!(position_percent(Decimal::from(90_000), None), None);
/// ```
pub fn position_percent(salary: Decimal, midpoint: Option<Decimal>) -> Option<Decimal> {
    midpoint
        .filter(|m| *m > Decimal::ZERO)
        .and_then(|m| salary.checked_div(m)?.checked_mul(Decimal::ONE_HUNDRED))
        .map(|position| position.normalize())
}

/// Computes the after-increase and next-level positions for an employee.
///
/// The next-level position is only reported for promotions.
pub fn calculate_market_positions(employee: &Employee) -> MarketPositions {
    let after_increase = position_percent(
        employee.proposed_base_salary,
        employee.current_level_midpoint,
    );
    let next_level = if employee.has_promotion {
        position_percent(employee.proposed_base_salary, employee.next_level_midpoint)
    } else {
        None
    };

    MarketPositions {
        after_increase,
        next_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetSettings;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee() -> Employee {
        let mut employee = Employee::new("Ada", dec("100000"), &BudgetSettings::default());
        employee.proposed_base_salary = dec("104000");
        employee.current_level_midpoint = Some(dec("130000"));
        employee.next_level_midpoint = Some(dec("160000"));
        employee
    }

    #[test]
    fn test_position_against_midpoint() {
        assert_eq!(
            position_percent(dec("104000"), Some(dec("130000"))),
            Some(dec("80"))
        );
    }

    #[test]
    fn test_zero_midpoint_yields_none() {
        assert_eq!(position_percent(dec("104000"), Some(Decimal::ZERO)), None);
    }

    #[test]
    fn test_negative_midpoint_yields_none() {
        assert_eq!(position_percent(dec("104000"), Some(dec("-1"))), None);
    }

    #[test]
    fn test_zero_salary_with_midpoint_is_zero_percent() {
        assert_eq!(
            position_percent(Decimal::ZERO, Some(dec("100000"))),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn test_next_level_requires_promotion() {
        let employee = create_test_employee();
        let positions = calculate_market_positions(&employee);

        assert_eq!(positions.after_increase, Some(dec("80")));
        assert_eq!(positions.next_level, None);
    }

    #[test]
    fn test_next_level_for_promotion() {
        let mut employee = create_test_employee();
        employee.has_promotion = true;
        let positions = calculate_market_positions(&employee);

        assert_eq!(positions.next_level, Some(dec("65")));
    }

    #[test]
    fn test_missing_midpoints_report_nothing() {
        let mut employee = create_test_employee();
        employee.has_promotion = true;
        employee.current_level_midpoint = None;
        employee.next_level_midpoint = None;

        assert_eq!(calculate_market_positions(&employee), MarketPositions::default());
    }

    #[test]
    fn test_out_of_range_position_reports_nothing() {
        assert_eq!(
            position_percent(dec("1000000"), Some(dec("0.0000000000000000000000001"))),
            None
        );
        assert_eq!(position_percent(Decimal::MAX, Some(dec("0.5"))), None);
    }
}
