//! # Quote Model and Numeric Field Normalization
//!
//! This module defines the quote data structure shared by every market feed
//! consumer, together with the normalization boundary that shields the rest
//! of the library from loosely shaped upstream payloads.
//!
//! ## Key Features:
//! - **Strict Data Modeling**: Uses `serde` to map incoming JSON payloads
//!   into a single well-typed `Quote` shape, accepting both `snake_case`
//!   and `camelCase` field spellings from the different feed backends.
//! - **Flexible Numeric Coercion**: Upstream sources deliver percentage
//!   changes as plain numbers, as strings decorated with `+`/`%`, or not at
//!   all. `coerce_number` folds every shape into a finite `f64` and defaults
//!   to `0.0` for anything unparseable, so a malformed field can never poison
//!   a downstream weighted sum with `NaN`.
//! - **Total Accessors**: The `*_of` helpers operate on raw
//!   `serde_json::Value` items and never panic or error, matching the
//!   degraded-mode policy of the sentiment aggregator.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Crypto pairs carried by the market feed, quoted against NOK.
///
/// Used to split the feed into macro and crypto views.
pub const CRYPTO_SYMBOLS: [&str; 10] = [
    "BTC/NOK", "ETH/NOK", "ADA/NOK", "XRP/NOK", "SOL/NOK",
    "DOT/NOK", "AVAX/NOK", "MATIC/NOK", "LINK/NOK", "UNI/NOK",
];

/// Returns true when the symbol is one of the tracked crypto/NOK pairs.
pub fn is_crypto_symbol(symbol: &str) -> bool {
    CRYPTO_SYMBOLS.contains(&symbol)
}

/// # Quote
///
/// A single market instrument's current price and percentage change,
/// identified by symbol.
///
/// Numeric fields pass through [`coerce_number`] during deserialization, so
/// a `Quote` obtained from serde always carries finite values.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Quote {
    /// The feed symbol, e.g. `OSEBX`, `DNB` or `BTC/NOK`.
    pub symbol: String,
    /// Human readable instrument name.
    #[serde(default)]
    pub name: String,
    /// Last traded price or index level.
    #[serde(default, deserialize_with = "de_flexible_number")]
    pub price: f64,
    /// Absolute change since previous close.
    #[serde(default, deserialize_with = "de_flexible_number")]
    pub change: f64,
    /// Percentage change since previous close.
    #[serde(
        default,
        alias = "changePercent",
        deserialize_with = "de_flexible_number"
    )]
    pub change_percent: f64,
    /// Quote currency, e.g. `NOK` or `USD`.
    #[serde(default)]
    pub currency: String,
    /// Feed category, e.g. `stock`, `currency` or `crypto`.
    #[serde(default)]
    pub category: String,
}

impl Quote {
    /// Convenience constructor for the common symbol/change case.
    pub fn with_change(symbol: &str, change_percent: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            change_percent: finite_or_zero(change_percent),
            ..Default::default()
        }
    }

    /// Looks up a quote by symbol within a snapshot.
    ///
    /// Symbols are assumed unique within a snapshot; the first match wins.
    pub fn find<'a>(quotes: &'a [Quote], symbol: &str) -> Option<&'a Quote> {
        quotes.iter().find(|q| q.symbol == symbol)
    }
}

/// Replaces non-finite values (`NaN`, infinities) with the neutral `0.0`.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// # Coerce Number
///
/// Extracts a finite `f64` from a heterogeneous JSON value.
///
/// Accepted shapes, in order:
/// 1. A JSON number.
/// 2. A string holding a number, optionally decorated with a leading `+`
///    and/or a trailing `%` (e.g. `"+2.5%"`).
/// 3. Anything else (null, objects, non-numeric strings) coerces to `0.0`.
///
/// This function never panics and never returns `NaN`.
pub fn coerce_number(raw: &Value) -> f64 {
    match raw {
        Value::Number(n) => finite_or_zero(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .chars()
                .filter(|c| *c != '+' && *c != '%')
                .collect();
            finite_or_zero(cleaned.parse::<f64>().unwrap_or(0.0))
        }
        _ => 0.0,
    }
}

/// Reads the percentage change off a raw feed item.
///
/// Accepts both `change_percent` and `changePercent` spellings; a missing
/// field or a non-object item yields the neutral `0.0`.
pub fn change_percent_of(item: &Value) -> f64 {
    let field = item
        .get("change_percent")
        .or_else(|| item.get("changePercent"));
    field.map(coerce_number).unwrap_or(0.0)
}

/// Reads the price off a raw feed item, defaulting to `0.0`.
pub fn price_of(item: &Value) -> f64 {
    item.get("price").map(coerce_number).unwrap_or(0.0)
}

/// Reads the absolute change off a raw feed item, defaulting to `0.0`.
pub fn change_of(item: &Value) -> f64 {
    item.get("change").map(coerce_number).unwrap_or(0.0)
}

/// True when the item's percentage change is strictly positive.
pub fn is_positive_change(item: &Value) -> bool {
    change_percent_of(item) > 0.0
}

/// Custom serde deserializer routing numeric fields through [`coerce_number`].
///
/// Unlike a plain `f64` field this accepts decorated strings and nulls, and
/// it can never surface `NaN` into the data model.
fn de_flexible_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(coerce_number(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_plain_numbers() {
        assert_eq!(coerce_number(&json!(1.25)), 1.25);
        assert_eq!(coerce_number(&json!(-3)), -3.0);
    }

    #[test]
    fn coerces_decorated_strings() {
        assert_eq!(coerce_number(&json!("+2.5%")), 2.5);
        assert_eq!(coerce_number(&json!("-0.8%")), -0.8);
        assert_eq!(coerce_number(&json!(" 1.5 ")), 1.5);
    }

    #[test]
    fn unparseable_input_defaults_to_zero() {
        assert_eq!(coerce_number(&json!(null)), 0.0);
        assert_eq!(coerce_number(&json!("n/a")), 0.0);
        assert_eq!(coerce_number(&json!({"nested": 1})), 0.0);
        assert_eq!(coerce_number(&json!([1, 2])), 0.0);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let item = json!({"symbol": "OSEBX"});
        assert_eq!(change_percent_of(&item), 0.0);
        assert_eq!(price_of(&item), 0.0);
        assert_eq!(change_of(&item), 0.0);
        assert!(!is_positive_change(&item));
    }

    #[test]
    fn accepts_both_field_spellings() {
        let snake = json!({"change_percent": "+1.2%"});
        let camel = json!({"changePercent": 1.2});
        assert_eq!(change_percent_of(&snake), 1.2);
        assert_eq!(change_percent_of(&camel), 1.2);
    }

    #[test]
    fn quote_deserializes_from_decorated_feed() {
        let raw = json!({
            "symbol": "DNB",
            "name": "DNB Bank",
            "price": "212.40",
            "changePercent": "+1.5%",
            "currency": "NOK"
        });
        let quote: Quote = serde_json::from_value(raw).unwrap();
        assert_eq!(quote.price, 212.40);
        assert_eq!(quote.change_percent, 1.5);
        assert_eq!(quote.change, 0.0);
    }

    #[test]
    fn quote_deserializes_null_fields_to_zero() {
        let raw = json!({"symbol": "MOWI", "changePercent": null, "price": null});
        let quote: Quote = serde_json::from_value(raw).unwrap();
        assert_eq!(quote.change_percent, 0.0);
        assert_eq!(quote.price, 0.0);
    }

    #[test]
    fn crypto_symbols_are_classified() {
        assert!(is_crypto_symbol("BTC/NOK"));
        assert!(!is_crypto_symbol("USD/NOK"));
        assert!(!is_crypto_symbol("DNB"));
    }
}
