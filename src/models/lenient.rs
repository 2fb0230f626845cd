//! Forgiving numeric deserializers for roster fields.
//!
//! Roster rows come from editable forms where a blank cell is sent as `""`.
//! Blank, `null`, non-numeric and out-of-range values read as zero for
//! required amounts and as absent for optional ones.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Reads a number or numeric string; anything else is `Decimal::ZERO`.
pub(crate) fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_decimal(deserializer)?.unwrap_or(Decimal::ZERO))
}

/// Reads a number or numeric string; anything else is `None`.
pub(crate) fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_value))
}

fn parse_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_text(&n.to_string()),
        Value::String(s) => parse_text(s),
        _ => None,
    }
}

fn parse_text(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
