//! Denomination rounding for proposed raises.
//!
//! Raises derived from percentages are rounded to clean administrative
//! values. Amounts entered explicitly are never rounded.

use rust_decimal::Decimal;

/// Amounts at or above this use the coarse denomination.
pub const COARSE_ROUNDING_THRESHOLD: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// Denomination for amounts at or above the threshold.
pub const COARSE_DENOMINATION: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Denomination for amounts below the threshold.
pub const FINE_DENOMINATION: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Rounds a raw increase to the nearest denomination.
///
/// Amounts of 5000 or more go to the nearest 1000, smaller amounts to the
/// nearest 500. The quotient is rounded half-up (toward positive infinity),
/// so both branches agree at the boundary. Near the limits of `Decimal`,
/// where the rounded-up value is not representable, the amount is rounded
/// toward zero instead.
///
/// # Examples
///
/// ```
/// use comp_rollup::calculation::round_increase;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_increase(Decimal::from(4999)), Decimal::from(5000));
/// assert_eq!(round_increase(Decimal::from(5000)), Decimal::from(5000));
/// assert_eq!(round_increase(Decimal::from(21400)), Decimal::from(21000));
/// ```
pub fn round_increase(amount: Decimal) -> Decimal {
    let denomination = if amount >= COARSE_ROUNDING_THRESHOLD {
        COARSE_DENOMINATION
    } else {
        FINE_DENOMINATION
    };
    let quotient = amount / denomination;
    round_half_up(quotient)
        .checked_mul(denomination)
        .unwrap_or_else(|| quotient.trunc() * denomination)
}

fn round_half_up(value: Decimal) -> Decimal {
    value
        .checked_add(Decimal::new(5, 1))
        .map_or(value, |shifted| shifted.floor())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_threshold_constants() {
        assert_eq!(COARSE_ROUNDING_THRESHOLD, dec("5000"));
        assert_eq!(COARSE_DENOMINATION, dec("1000"));
        assert_eq!(FINE_DENOMINATION, dec("500"));
    }

    #[test]
    fn test_exact_multiples_are_unchanged() {
        assert_eq!(round_increase(dec("4000")), dec("4000"));
        assert_eq!(round_increase(dec("21000")), dec("21000"));
        assert_eq!(round_increase(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_boundary_branches_agree() {
        assert_eq!(round_increase(dec("4999")), dec("5000"));
        assert_eq!(round_increase(dec("5000")), dec("5000"));
        assert_eq!(round_increase(dec("4999.99")), dec("5000"));
    }

    #[test]
    fn test_fine_branch_rounds_to_500() {
        assert_eq!(round_increase(dec("3240")), dec("3000"));
        assert_eq!(round_increase(dec("3260")), dec("3500"));
        assert_eq!(round_increase(dec("200")), Decimal::ZERO);
    }

    #[test]
    fn test_fine_branch_half_rounds_up() {
        assert_eq!(round_increase(dec("3250")), dec("3500"));
        assert_eq!(round_increase(dec("250")), dec("500"));
    }

    #[test]
    fn test_coarse_branch_rounds_to_1000() {
        assert_eq!(round_increase(dec("6400")), dec("6000"));
        assert_eq!(round_increase(dec("6500")), dec("7000"));
        assert_eq!(round_increase(dec("12499.99")), dec("12000"));
    }

    #[test]
    fn test_negative_half_rounds_toward_positive_infinity() {
        // -750 / 500 = -1.5 -> -1
        assert_eq!(round_increase(dec("-750")), dec("-500"));
        assert_eq!(round_increase(dec("-800")), dec("-1000"));
    }

    #[test]
    fn test_largest_amounts_do_not_overflow() {
        let rounded = round_increase(Decimal::MAX);
        assert!(rounded <= Decimal::MAX);
        assert!((rounded % COARSE_DENOMINATION).is_zero());

        let rounded = round_increase(Decimal::MIN);
        assert!((rounded % FINE_DENOMINATION).is_zero());
    }
}
