//! Report models for the compensation rollup engine.
//!
//! This module contains the [`Report`] type and the structures it is built
//! from: per-category budget status, level breakdowns, roster totals, the
//! flagged-employee list and the audit trace of the rollup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A budget category the aggregator tracks separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
    /// Base-salary increases.
    Base,
    /// Stock increases.
    Stock,
}

impl BudgetCategory {
    /// Returns the lowercase name used in audit rule ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetCategory::Base => "base",
            BudgetCategory::Stock => "stock",
        }
    }
}

/// Budget usage for a single category, in the common currency unit.
///
/// # Example
///
/// ```
/// use comp_rollup::models::CategoryBudget;
/// use rust_decimal::Decimal;
///
/// let status = CategoryBudget {
///     allowance: Decimal::from(50_000),
///     max_allowed: Decimal::from(52_500),
///     used: Decimal::from(52_000),
///     remaining: Decimal::from(-2_000),
///     over_budget: false,
///     utilization_percent: Some(Decimal::from(104)),
/// };
/// assert!(status.remaining.is_sign_negative());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBudget {
    /// The nominal allowance.
    pub allowance: Decimal,
    /// The allowance plus the over-budget tolerance.
    pub max_allowed: Decimal,
    /// The amount consumed by the roster.
    pub used: Decimal,
    /// Allowance minus usage; negative once the allowance is exceeded.
    pub remaining: Decimal,
    /// True when usage exceeds `max_allowed`.
    pub over_budget: bool,
    /// Usage as a percentage of the allowance. `None` when the allowance is
    /// zero and the ratio is undefined.
    pub utilization_percent: Option<Decimal>,
}

/// Budget status for both categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetStatus {
    /// Base-salary increase budget.
    pub base: CategoryBudget,
    /// Stock increase budget.
    pub stock: CategoryBudget,
    /// True when either category is over budget.
    pub is_over_budget: bool,
}

/// Aggregates for one current-level group.
///
/// Both percentage figures are exposed: they diverge whenever salaries
/// within the level are unequal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBreakdown {
    /// The level code, or `unspecified` for employees without one.
    pub level: String,
    /// Number of employees at this level.
    pub employee_count: u32,
    /// Sum of current base salaries (common unit).
    pub current_total: Decimal,
    /// Sum of proposed base salaries (common unit).
    pub proposed_total: Decimal,
    /// `(proposed_total - current_total) / current_total * 100`, zero when
    /// the current total is zero.
    pub aggregate_increase_percent: Decimal,
    /// Arithmetic mean of the employees' own increase percentages.
    pub mean_individual_increase_percent: Decimal,
}

/// Roster-wide totals in the common currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterTotals {
    /// Number of employees on the roster.
    pub employee_count: u32,
    /// Number of flagged employees.
    pub flagged_count: u32,
    /// Sum of current base salaries.
    pub current_base: Decimal,
    /// Sum of proposed base salaries.
    pub proposed_base: Decimal,
    /// Sum of current stock values.
    pub current_stock: Decimal,
    /// Sum of proposed stock values.
    pub proposed_stock: Decimal,
    /// Sum of resolved base-salary increase amounts.
    pub base_increase: Decimal,
    /// Proposed stock minus current stock.
    pub stock_increase: Decimal,
    /// Base increase plus stock increase.
    pub total_increase: Decimal,
}

/// An employee marked for manual review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedEmployee {
    /// The employee id.
    pub id: String,
    /// The employee name.
    pub name: String,
    /// The employee's current level, if any.
    pub current_level: Option<String>,
    /// The increase percentage that triggered the flag.
    pub total_increase_percent: Decimal,
}

/// An employee put forward for promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotedEmployee {
    /// The employee id.
    pub id: String,
    /// The employee name.
    pub name: String,
    /// The employee's current level, if any.
    pub current_level: Option<String>,
    /// The level being promoted into, if any.
    pub next_level: Option<String>,
    /// Merit percentage, zero when absent.
    pub merit_percent: Decimal,
    /// Promotion percentage.
    pub promotion_percent: Decimal,
}

/// A single step in the audit trace recording an aggregation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A condition worth surfacing that did not stop the rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The audit trace for a rollup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of aggregation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated while aggregating.
    pub warnings: Vec<AuditWarning>,
}

/// The complete derived view of a roster under a set of budget settings.
///
/// A report is a pure function of its inputs: computing it twice over the
/// same roster and settings yields equal values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Budget status for base and stock.
    pub budget: BudgetStatus,
    /// One entry per distinct current level, ordered by level code.
    pub levels: Vec<LevelBreakdown>,
    /// Roster-wide totals.
    pub totals: RosterTotals,
    /// Employees marked for review, in roster order.
    pub flagged: Vec<FlaggedEmployee>,
    /// Promoted employees, highest current level number first.
    pub promotions: Vec<PromotedEmployee>,
    /// Steps and warnings recorded while building the report.
    pub audit_trace: AuditTrace,
}
