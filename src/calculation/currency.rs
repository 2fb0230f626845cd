//! Currency normalization.
//!
//! Every cross-employee sum is routed through [`to_common_unit`] so that
//! rosters mixing currencies aggregate in one unit. A single employee's own
//! figures stay in their native currency.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Currency;

/// A fixed table of conversion rates into the common unit.
///
/// Rates are injected, never looked up. Codes missing from the table
/// normalize at 1.0.
///
/// # Example
///
/// ```
/// use comp_rollup::calculation::ExchangeRates;
/// use comp_rollup::models::Currency;
/// use rust_decimal::Decimal;
///
/// let rates = ExchangeRates::default();
/// assert_eq!(rates.rate_for(&Currency::Gbp), Decimal::new(125, 2));
/// assert_eq!(rates.rate_for(&Currency::Other("JPY".into())), Decimal::ONE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRates {
    /// The common unit the rates convert into.
    #[serde(default)]
    pub base: Currency,
    /// Rate per currency code.
    pub rates: BTreeMap<String, Decimal>,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        let rates = BTreeMap::from([
            ("USD".to_string(), Decimal::ONE),
            ("GBP".to_string(), Decimal::new(125, 2)),
            ("EUR".to_string(), Decimal::new(108, 2)),
        ]);
        Self {
            base: Currency::Usd,
            rates,
        }
    }
}

impl ExchangeRates {
    /// Returns the rate for a currency, or 1.0 when the table has no entry.
    pub fn rate_for(&self, currency: &Currency) -> Decimal {
        self.rates
            .get(currency.code())
            .copied()
            .unwrap_or(Decimal::ONE)
    }
}

/// Converts an amount in `currency` into the common unit.
///
/// A product outside the range of `Decimal` converts to zero.
///
/// # Examples
///
/// ```
/// use comp_rollup::calculation::{ExchangeRates, to_common_unit};
/// use comp_rollup::models::Currency;
/// use rust_decimal::Decimal;
///
/// let rates = ExchangeRates::default();
/// let usd = to_common_unit(Decimal::from(1000), &Currency::Eur, &rates);
/// assert_eq!(usd, Decimal::from(1080));
/// ```
pub fn to_common_unit(amount: Decimal, currency: &Currency, rates: &ExchangeRates) -> Decimal {
    amount
        .checked_mul(rates.rate_for(currency))
        .unwrap_or(Decimal::ZERO)
}

/// Sums amounts in the common unit, saturating at the `Decimal` limits.
pub(crate) fn sum_common_units<'a, I>(items: I, rates: &ExchangeRates) -> Decimal
where
    I: IntoIterator<Item = (Decimal, &'a Currency)>,
{
    items
        .into_iter()
        .map(|(amount, currency)| to_common_unit(amount, currency, rates))
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
