//! # Fear & Greed Reference Index
//!
//! Data model for the externally computed fear/greed value blended into the
//! sentiment score, plus the synthetic fallback the dashboard shows while
//! the provider is unreachable.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::markets::quotes::coerce_number;

/// The sub-indicators published alongside the composite index.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FearGreedIndicators {
    /// Market volatility component.
    #[serde(default, deserialize_with = "de_component")]
    pub volatility: f64,
    /// Price momentum component.
    #[serde(default, deserialize_with = "de_component")]
    pub momentum: f64,
    /// Advancing vs declining breadth component.
    #[serde(default, deserialize_with = "de_component")]
    pub market_breadth: f64,
    /// Demand for safe-haven assets component.
    #[serde(default, deserialize_with = "de_component")]
    pub safe_haven: f64,
}

/// # Fear and Greed Data
///
/// The provider's composite report: the index value in `[0, 100]`, its
/// qualitative rating and the contributing sub-indicators.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FearGreedData {
    /// The composite index, clamped into `[0, 100]` on deserialization.
    #[serde(default, deserialize_with = "de_index")]
    pub index: f64,
    /// Provider-supplied qualitative rating, e.g. `Frykt` or `Grådighet`.
    #[serde(default)]
    pub sentiment: String,
    /// When the provider last refreshed the report.
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
    /// The contributing sub-indicators.
    #[serde(default)]
    pub indicators: FearGreedIndicators,
}

fn de_component<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(coerce_number(&raw))
}

fn de_index<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(coerce_number(&raw).clamp(0.0, 100.0))
}

/// # Synthetic Index
///
/// Fallback value shown while the provider is unreachable: a slow
/// oscillation anchored just below neutral, sweeping roughly 30-60 over
/// time so the gauge never freezes on a single number.
pub fn synthetic_index(now: DateTime<Utc>) -> u8 {
    let base = 45.0 + (now.timestamp_millis() as f64 / 100_000.0).sin() * 15.0;
    base.round().clamp(0.0, 100.0) as u8
}

/// Coarse three-band rating used by the fallback path.
///
/// The live provider ships five bands; the offline gauge only distinguishes
/// fear, neutral and greed.
pub fn coarse_rating(index: u8) -> &'static str {
    match index {
        0..=35 => "Frykt",
        36..=55 => "Nøytral",
        _ => "Grådighet",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn report_deserializes_with_decorated_numbers() {
        let raw = json!({
            "index": "62",
            "sentiment": "Grådighet",
            "indicators": {
                "volatility": "48.5",
                "momentum": 71,
                "marketBreadth": null,
                "safeHaven": "n/a"
            }
        });
        let data: FearGreedData = serde_json::from_value(raw).unwrap();
        assert_eq!(data.index, 62.0);
        assert_eq!(data.indicators.volatility, 48.5);
        assert_eq!(data.indicators.momentum, 71.0);
        assert_eq!(data.indicators.market_breadth, 0.0);
        assert_eq!(data.indicators.safe_haven, 0.0);
    }

    #[test]
    fn index_is_clamped_on_deserialization() {
        let high: FearGreedData = serde_json::from_value(json!({"index": 140})).unwrap();
        assert_eq!(high.index, 100.0);
        let low: FearGreedData = serde_json::from_value(json!({"index": -5})).unwrap();
        assert_eq!(low.index, 0.0);
    }

    #[test]
    fn synthetic_index_stays_within_oscillation_band() {
        for offset in 0..48 {
            let t = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
                + chrono::Duration::minutes(offset * 30);
            let idx = synthetic_index(t);
            assert!((30..=60).contains(&idx), "index {} out of band", idx);
        }
    }

    #[test]
    fn coarse_rating_bands() {
        assert_eq!(coarse_rating(0), "Frykt");
        assert_eq!(coarse_rating(35), "Frykt");
        assert_eq!(coarse_rating(36), "Nøytral");
        assert_eq!(coarse_rating(55), "Nøytral");
        assert_eq!(coarse_rating(56), "Grådighet");
        assert_eq!(coarse_rating(100), "Grådighet");
    }
}
