//! Review flagging.

use rust_decimal::Decimal;

/// Increases strictly above this percentage are flagged for review.
pub const FLAG_THRESHOLD_PERCENT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Returns true when the total increase percentage needs manual review.
///
/// # Examples
///
/// ```
/// use comp_rollup::calculation::is_flagged;
/// use rust_decimal::Decimal;
///
/// assert!(!is_flagged(Decimal::from(10)));
/// assert!(is_flagged(Decimal::new(1001, 2)));
/// ```
pub fn is_flagged(total_increase_percent: Decimal) -> bool {
    total_increase_percent > FLAG_THRESHOLD_PERCENT
}
