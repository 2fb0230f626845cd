//! Calculation logic for the compensation rollup engine.
//!
//! This module contains the pure numeric core: increase resolution across
//! percentages, amounts and proposed salaries, denomination rounding,
//! currency normalization, market positions, review flagging, and the
//! budget and level aggregators that feed a [`Report`](crate::models::Report).
//!
//! Nothing here performs I/O or returns errors. Missing numeric inputs are
//! treated as zero, every product and division is checked, and sums saturate
//! at the limits of `Decimal`.

mod budget;
mod currency;
mod flagging;
mod increase;
mod level_breakdown;
mod market_position;
mod report;
mod rounding;

pub use budget::{
    BudgetStatusResult, base_increase_used, calculate_budget_status, category_budget,
    stock_increase_used,
};
pub use currency::{ExchangeRates, to_common_unit};
pub use flagging::{FLAG_THRESHOLD_PERCENT, is_flagged};
pub use increase::{
    ResolvedIncrease, apply_derived_fields, reconcile_increase, resolve_amounts,
    resolve_increase, total_increase_percent,
};
pub use level_breakdown::{LevelBreakdownResult, UNSPECIFIED_LEVEL, calculate_level_breakdown};
pub use market_position::{MarketPositions, calculate_market_positions, position_percent};
pub use report::{calculate_totals, compute_report, compute_report_with_rates};
pub use rounding::{
    COARSE_DENOMINATION, COARSE_ROUNDING_THRESHOLD, FINE_DENOMINATION, round_increase,
};
