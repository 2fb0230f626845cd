//! Increase resolution.
//!
//! An employee's increase is held in four coupled representations: merit
//! percentage, promotion percentage, absolute increase amount and proposed
//! base salary. [`resolve_increase`] takes the representation that was
//! edited last and derives the others from it, then refreshes the derived
//! fields (total percentage, flag, market positions).
//!
//! Resolution is a single pure function of its inputs, so repeated edits
//! can never feed back into one another.

use rust_decimal::Decimal;

use crate::models::{BudgetSettings, EditedField, Employee};

use super::flagging::is_flagged;
use super::market_position::calculate_market_positions;
use super::rounding::round_increase;

/// The four mutually consistent increase fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedIncrease {
    /// Merit percentage.
    pub merit_percent: Decimal,
    /// Promotion percentage as stored on the employee.
    pub promotion_percent: Decimal,
    /// Base-salary increase amount.
    pub increase_amount: Decimal,
    /// `current_base_salary + increase_amount`.
    pub proposed_base_salary: Decimal,
}

/// Resolves the increase fields of an employee given the last edited field.
///
/// Rules by edited field:
/// - percentages: the raw increase `base * (merit + promotion) / 100` is
///   rounded with [`round_increase`] and added to the base;
/// - increase amount: taken literally, the proposed salary follows and the
///   implied percentage is split evenly between merit and promotion for
///   promotions, or assigned wholly to merit otherwise;
/// - proposed salary: the increase is the difference from the base, then the
///   same split applies.
///
/// On initial load the percentage rule applies when percentages are present
/// (or the record has no increase yet, in which case a missing merit
/// percentage falls back to the standard merit rate). A record carrying only
/// an amount keeps that amount as entered.
///
/// Promotion percentages only count while `has_promotion` is set.
pub fn resolve_amounts(
    employee: &Employee,
    edited: EditedField,
    settings: &BudgetSettings,
) -> ResolvedIncrease {
    let base = employee.current_base_salary;

    match edited {
        EditedField::MeritPercent | EditedField::PromotionPercent => {
            from_percentages(employee, settings)
        }
        EditedField::IncreaseAmount => from_amount(employee, employee.increase_amount),
        EditedField::ProposedBaseSalary => {
            let increase_amount = employee
                .proposed_base_salary
                .checked_sub(base)
                .unwrap_or(Decimal::ZERO);
            from_amount(employee, increase_amount)
        }
        EditedField::Initial => {
            let stated_percent = employee
                .merit_percent
                .unwrap_or(Decimal::ZERO)
                .saturating_add(employee.effective_promotion_percent());
            if !stated_percent.is_zero() || employee.increase_amount.is_zero() {
                from_percentages(employee, settings)
            } else {
                ResolvedIncrease {
                    merit_percent: employee.merit_percent.unwrap_or(Decimal::ZERO),
                    promotion_percent: employee.promotion_percent,
                    ..with_increase(base, employee.increase_amount)
                }
            }
        }
    }
}

/// Resolves an employee's increase and refreshes every derived field.
///
/// Never fails: missing inputs are zero and every division is guarded.
/// Running it again on its own output with the same `edited` tag returns
/// the same record.
///
/// # Examples
///
/// ```
/// use comp_rollup::calculation::resolve_increase;
/// use comp_rollup::models::{BudgetSettings, EditedField, Employee};
/// use rust_decimal::Decimal;
///
/// let settings = BudgetSettings::default();
/// let mut employee = Employee::new("Ada", Decimal::from(150_000), &settings);
/// employee.merit_percent = Some(Decimal::from(6));
/// employee.promotion_percent = Decimal::from(8);
/// employee.has_promotion = true;
///
/// let resolved = resolve_increase(&employee, EditedField::MeritPercent, &settings);
/// assert_eq!(resolved.increase_amount, Decimal::from(21_000));
/// assert_eq!(resolved.proposed_base_salary, Decimal::from(171_000));
/// assert!(resolved.flagged);
/// ```
pub fn resolve_increase(
    employee: &Employee,
    edited: EditedField,
    settings: &BudgetSettings,
) -> Employee {
    let resolved = resolve_amounts(employee, edited, settings);

    let mut out = employee.clone();
    out.merit_percent = Some(resolved.merit_percent);
    out.promotion_percent = resolved.promotion_percent;
    out.increase_amount = resolved.increase_amount;
    out.proposed_base_salary = resolved.proposed_base_salary;
    apply_derived_fields(&mut out);
    out
}

/// Brings a record from outside the engine back to
/// `proposed == current + increase`.
///
/// A stored increase amount wins and is kept as entered. Without one, a
/// proposed salary that differs from the base is resolved as an edited
/// proposed salary. A record with neither goes through initial resolution.
/// Derived fields are always refreshed. A resolved record comes back with
/// its amounts unchanged.
///
/// # Examples
///
/// ```
/// use comp_rollup::calculation::reconcile_increase;
/// use comp_rollup::models::{BudgetSettings, Employee};
/// use rust_decimal::Decimal;
///
/// let settings = BudgetSettings::default();
/// let mut employee = Employee::new("Ada", Decimal::from(100_000), &settings);
/// employee.merit_percent = Some(Decimal::from(4));
/// employee.proposed_base_salary = Decimal::ZERO;
///
/// let reconciled = reconcile_increase(&employee, &settings);
/// assert_eq!(reconciled.increase_amount, Decimal::from(4_000));
/// assert_eq!(reconciled.proposed_base_salary, Decimal::from(104_000));
/// ```
pub fn reconcile_increase(employee: &Employee, settings: &BudgetSettings) -> Employee {
    let base = employee.current_base_salary;

    if !employee.increase_amount.is_zero() {
        let resolved = with_increase(base, employee.increase_amount);
        let mut out = employee.clone();
        out.increase_amount = resolved.increase_amount;
        out.proposed_base_salary = resolved.proposed_base_salary;
        apply_derived_fields(&mut out);
        return out;
    }

    let proposed = employee.proposed_base_salary;
    let edited = if !proposed.is_zero() && proposed != base {
        EditedField::ProposedBaseSalary
    } else {
        EditedField::Initial
    };
    resolve_increase(employee, edited, settings)
}

/// Recomputes total percentage, flag and market positions in place.
pub fn apply_derived_fields(employee: &mut Employee) {
    employee.total_increase_percent = total_increase_percent(
        employee.current_base_salary,
        employee.proposed_base_salary,
    );
    employee.flagged = is_flagged(employee.total_increase_percent);

    let positions = calculate_market_positions(employee);
    employee.after_increase_market_position = positions.after_increase;
    employee.next_level_market_position = positions.next_level;
}

/// `(proposed - current) / current * 100`, or zero when current is not positive.
pub fn total_increase_percent(current_base_salary: Decimal, proposed_base_salary: Decimal) -> Decimal {
    proposed_base_salary
        .checked_sub(current_base_salary)
        .map_or(Decimal::ZERO, |increase| percent_of(increase, current_base_salary))
}

fn from_percentages(employee: &Employee, settings: &BudgetSettings) -> ResolvedIncrease {
    let base = employee.current_base_salary;
    let merit_percent = employee
        .merit_percent
        .unwrap_or(settings.standard_merit_percent);
    let increase_amount = merit_percent
        .checked_add(employee.effective_promotion_percent())
        .and_then(|percent| base.checked_mul(percent))
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .map(round_increase)
        .unwrap_or(Decimal::ZERO);

    ResolvedIncrease {
        merit_percent,
        promotion_percent: employee.promotion_percent,
        ..with_increase(base, increase_amount)
    }
}

fn from_amount(employee: &Employee, increase_amount: Decimal) -> ResolvedIncrease {
    let base = employee.current_base_salary;
    let resolved = with_increase(base, increase_amount);
    let total_percent = percent_of(resolved.increase_amount, base);

    let (merit_percent, promotion_percent) = if employee.has_promotion {
        let half = (total_percent / Decimal::TWO).normalize();
        (half, half)
    } else {
        (total_percent, Decimal::ZERO)
    };

    ResolvedIncrease {
        merit_percent,
        promotion_percent,
        ..resolved
    }
}

/// Pairs an increase with its proposed salary. An increase whose sum with
/// the base is not representable counts as zero.
fn with_increase(base: Decimal, increase_amount: Decimal) -> ResolvedIncrease {
    let (increase_amount, proposed_base_salary) = match base.checked_add(increase_amount) {
        Some(proposed) => (increase_amount, proposed),
        None => (Decimal::ZERO, base),
    };
    ResolvedIncrease {
        merit_percent: Decimal::ZERO,
        promotion_percent: Decimal::ZERO,
        increase_amount,
        proposed_base_salary,
    }
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ZERO, |percent| percent.normalize())
}
