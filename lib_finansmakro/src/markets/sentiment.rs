//! # Market Sentiment Aggregation
//!
//! This module converts raw per-symbol market quotes into a single 0-100
//! sentiment score with a categorical label and a per-factor breakdown, the
//! number driving the dashboard's sentiment gauge.
//!
//! ## Key Features:
//! - **Fixed Factor Model**: Four configured factors (Oslo Børs index, Brent
//!   oil, NOK/USD and the banking bellwether DNB) contribute with static
//!   relative weights summing to 100.
//! - **External Blending**: An optional externally computed fear/greed value
//!   is blended into the weighted momentum score with an unweighted average.
//! - **Total Computation**: Missing quotes degrade to zero-valued components
//!   instead of erroring, and every numeric input is sanitized before it can
//!   reach the weighted sum. The computation has no failure path.
//! - **Pure Values**: Each invocation yields a fresh, immutable
//!   [`SentimentSnapshot`]; nothing is cached or mutated in place.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use crate::markets::quotes::{finite_or_zero, Quote};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score corresponding to a flat market; the additive offset of the scale.
pub const NEUTRAL_BASE: f64 = 50.0;

/// How strongly percentage moves shift the score away from neutral.
///
/// A tunable design parameter, not a derived value: with the default of 10,
/// a +1% weighted move lifts the base score by 10 points.
pub const SCORE_SENSITIVITY: f64 = 10.0;

/// # Factor
///
/// One of the four configured market dimensions contributing to the
/// weighted sentiment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    /// The Oslo Børs benchmark index.
    Osebx,
    /// Brent crude oil.
    Oil,
    /// The krone against the dollar.
    Nok,
    /// The banking sector, proxied by DNB.
    Banking,
}

impl Factor {
    /// All factors in presentation order.
    pub const ALL: [Factor; 4] = [Factor::Osebx, Factor::Oil, Factor::Nok, Factor::Banking];

    /// The feed symbol backing this factor.
    pub fn symbol(self) -> &'static str {
        match self {
            Factor::Osebx => "OSEBX",
            Factor::Oil => "BRENT_OIL",
            Factor::Nok => "NOK_USD",
            Factor::Banking => "DNB",
        }
    }

    /// The factor's relative weight in percentage points.
    ///
    /// The weights sum to 100 by convention; this is not enforced.
    pub fn weight(self) -> f64 {
        match self {
            Factor::Osebx => 35.0,
            Factor::Oil => 25.0,
            Factor::Nok => 20.0,
            Factor::Banking => 20.0,
        }
    }

    /// Display name used by the component breakdown.
    pub fn display_name(self) -> &'static str {
        match self {
            Factor::Osebx => "OSEBX",
            Factor::Oil => "Olje (Brent)",
            Factor::Nok => "NOK/USD",
            Factor::Banking => "Banking (DNB)",
        }
    }
}

/// # Sentiment Label
///
/// One of five ordered categorical bands derived from the sentiment score.
///
/// The bands are closed on the lower side and half-open upwards:
/// `[0,20]`, `(20,40]`, `(40,60]`, `(60,80]`, `(80,100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentLabel {
    /// Scores in `[0, 20]`.
    ExtremeFear,
    /// Scores in `(20, 40]`.
    Fear,
    /// Scores in `(40, 60]`.
    Neutral,
    /// Scores in `(60, 80]`.
    Optimism,
    /// Scores in `(80, 100]`.
    ExtremeOptimism,
}

impl SentimentLabel {
    /// Classifies a rounded score into its band.
    ///
    /// Total over `u8`; scores above 100 fall into the top band, although
    /// [`compute_sentiment`] never produces them.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=20 => SentimentLabel::ExtremeFear,
            21..=40 => SentimentLabel::Fear,
            41..=60 => SentimentLabel::Neutral,
            61..=80 => SentimentLabel::Optimism,
            _ => SentimentLabel::ExtremeOptimism,
        }
    }

    /// The Norwegian reader-facing wording used by the dashboard.
    pub fn as_norwegian(self) -> &'static str {
        match self {
            SentimentLabel::ExtremeFear => "Ekstrem frykt",
            SentimentLabel::Fear => "Frykt",
            SentimentLabel::Neutral => "Nøytral",
            SentimentLabel::Optimism => "Optimisme",
            SentimentLabel::ExtremeOptimism => "Ekstrem optimisme",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_norwegian())
    }
}

/// A single factor's contribution to the sentiment breakdown.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct FactorReading {
    /// Current price or index level; `0.0` when the quote was absent.
    pub value: f64,
    /// Percentage change; `0.0` when the quote was absent.
    pub change: f64,
    /// The factor's static weight in percentage points.
    pub weight: f64,
}

/// # Sentiment Components
///
/// The per-factor breakdown of a snapshot. Always contains exactly the four
/// configured factors, even when some quotes were absent from the input.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SentimentComponents {
    /// Oslo Børs benchmark reading.
    pub osebx: FactorReading,
    /// Brent oil reading.
    pub oil: FactorReading,
    /// NOK/USD reading.
    pub nok: FactorReading,
    /// Banking sector reading.
    pub banking: FactorReading,
}

impl SentimentComponents {
    /// Neutral breakdown with zeroed values and the configured weights.
    fn neutral() -> Self {
        let zeroed = |factor: Factor| FactorReading {
            value: 0.0,
            change: 0.0,
            weight: factor.weight(),
        };
        Self {
            osebx: zeroed(Factor::Osebx),
            oil: zeroed(Factor::Oil),
            nok: zeroed(Factor::Nok),
            banking: zeroed(Factor::Banking),
        }
    }

    /// Borrow a factor's reading.
    pub fn get(&self, factor: Factor) -> &FactorReading {
        match factor {
            Factor::Osebx => &self.osebx,
            Factor::Oil => &self.oil,
            Factor::Nok => &self.nok,
            Factor::Banking => &self.banking,
        }
    }

    fn get_mut(&mut self, factor: Factor) -> &mut FactorReading {
        match factor {
            Factor::Osebx => &mut self.osebx,
            Factor::Oil => &mut self.oil,
            Factor::Nok => &mut self.nok,
            Factor::Banking => &mut self.banking,
        }
    }
}

/// # Sentiment Snapshot
///
/// The immutable output of one aggregation pass: the overall 0-100 score,
/// its categorical label, the per-factor breakdown and the wall-clock
/// timestamp of the computation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SentimentSnapshot {
    /// The overall sentiment score, always within `[0, 100]`.
    pub overall: u8,
    /// The categorical band of `overall`.
    pub label: SentimentLabel,
    /// The per-factor breakdown.
    pub components: SentimentComponents,
    /// When this snapshot was computed.
    pub computed_at: DateTime<Utc>,
}

/// # Compute Sentiment
///
/// Converts a quote snapshot plus an optional external fear/greed value into
/// a [`SentimentSnapshot`].
///
/// ## Algorithm:
/// 1. Each configured factor looks up its symbol among `quotes`. A missing
///    symbol leaves the factor at its zero default; this is a defined
///    degraded mode, not an error.
/// 2. `weighted = Σ(change × weight) / 100` over the four factors.
/// 3. `base = NEUTRAL_BASE + weighted × SCORE_SENSITIVITY`.
/// 4. When `external_index` is present and finite it is clamped to
///    `[0, 100]` and blended by unweighted average; otherwise the base score
///    stands alone.
/// 5. The result is clamped to `[0, 100]` and rounded to the nearest
///    integer; the label is classified from the rounded value.
///
/// Pure and side-effect-free apart from reading the clock for the
/// timestamp. Identical inputs always yield identical `overall` and
/// `label`.
pub fn compute_sentiment(quotes: &[Quote], external_index: Option<f64>) -> SentimentSnapshot {
    let mut components = SentimentComponents::neutral();

    for factor in Factor::ALL {
        if let Some(quote) = Quote::find(quotes, factor.symbol()) {
            let reading = components.get_mut(factor);
            reading.value = finite_or_zero(quote.price);
            reading.change = finite_or_zero(quote.change_percent);
        }
    }

    let weighted: f64 = Factor::ALL
        .iter()
        .map(|f| components.get(*f).change * f.weight())
        .sum::<f64>()
        / 100.0;

    let base = NEUTRAL_BASE + weighted * SCORE_SENSITIVITY;

    let blended = match external_index.filter(|idx| idx.is_finite()) {
        Some(idx) => (base + idx.clamp(0.0, 100.0)) / 2.0,
        None => base,
    };

    let overall = blended.clamp(0.0, 100.0).round() as u8;

    SentimentSnapshot {
        overall,
        label: SentimentLabel::from_score(overall),
        components,
        computed_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_quote_set() -> Vec<Quote> {
        vec![
            Quote::with_change("OSEBX", 1.0),
            Quote::with_change("BRENT_OIL", -2.0),
            Quote::with_change("NOK_USD", 0.5),
            Quote::with_change("DNB", 1.5),
        ]
    }

    #[test]
    fn neutral_input_yields_exact_midpoint() {
        let snapshot = compute_sentiment(&[], None);
        assert_eq!(snapshot.overall, 50);
        assert_eq!(snapshot.label, SentimentLabel::Neutral);
    }

    #[test]
    fn worked_example_from_live_dashboard() {
        // weighted = (1.0*35 - 2.0*25 + 0.5*20 + 1.5*20) / 100 = 0.25
        // base = 50 + 2.5 = 52.5, blended = (52.5 + 60) / 2 = 56.25 -> 56
        let snapshot = compute_sentiment(&full_quote_set(), Some(60.0));
        assert_eq!(snapshot.overall, 56);
        assert_eq!(snapshot.label, SentimentLabel::Neutral);
    }

    #[test]
    fn without_external_index_base_score_stands() {
        let snapshot = compute_sentiment(&full_quote_set(), None);
        // base = 50 + 0.25 * 10 = 52.5 -> 53 (round half away from zero)
        assert_eq!(snapshot.overall, 53);
        assert_eq!(snapshot.label, SentimentLabel::Neutral);
    }

    #[test]
    fn overall_is_clamped_for_extreme_moves() {
        let crash = vec![
            Quote::with_change("OSEBX", -40.0),
            Quote::with_change("BRENT_OIL", -40.0),
            Quote::with_change("NOK_USD", -40.0),
            Quote::with_change("DNB", -40.0),
        ];
        assert_eq!(compute_sentiment(&crash, None).overall, 0);

        let melt_up = vec![
            Quote::with_change("OSEBX", 40.0),
            Quote::with_change("BRENT_OIL", 40.0),
            Quote::with_change("NOK_USD", 40.0),
            Quote::with_change("DNB", 40.0),
        ];
        assert_eq!(compute_sentiment(&melt_up, Some(100.0)).overall, 100);
    }

    #[test]
    fn label_bands_are_closed_lower_half_open() {
        assert_eq!(SentimentLabel::from_score(0), SentimentLabel::ExtremeFear);
        assert_eq!(SentimentLabel::from_score(20), SentimentLabel::ExtremeFear);
        assert_eq!(SentimentLabel::from_score(21), SentimentLabel::Fear);
        assert_eq!(SentimentLabel::from_score(40), SentimentLabel::Fear);
        assert_eq!(SentimentLabel::from_score(41), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(60), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(61), SentimentLabel::Optimism);
        assert_eq!(SentimentLabel::from_score(80), SentimentLabel::Optimism);
        assert_eq!(SentimentLabel::from_score(81), SentimentLabel::ExtremeOptimism);
        assert_eq!(SentimentLabel::from_score(100), SentimentLabel::ExtremeOptimism);
    }

    #[test]
    fn osebx_change_is_monotonic_in_overall() {
        let mut previous = 0;
        for step in 0..20 {
            let change = -5.0 + step as f64 * 0.5;
            let mut quotes = full_quote_set();
            quotes[0] = Quote::with_change("OSEBX", change);
            let overall = compute_sentiment(&quotes, Some(50.0)).overall;
            assert!(overall >= previous, "overall dropped at osebx change {}", change);
            previous = overall;
        }
    }

    #[test]
    fn identical_inputs_yield_identical_scores() {
        let quotes = full_quote_set();
        let first = compute_sentiment(&quotes, Some(42.0));
        let second = compute_sentiment(&quotes, Some(42.0));
        assert_eq!(first.overall, second.overall);
        assert_eq!(first.label, second.label);
        assert_eq!(first.components, second.components);
    }

    #[test]
    fn missing_banking_symbol_degrades_to_zero_component() {
        let quotes = vec![
            Quote::with_change("OSEBX", 1.0),
            Quote::with_change("BRENT_OIL", -1.0),
            Quote::with_change("NOK_USD", 0.2),
        ];
        let snapshot = compute_sentiment(&quotes, None);
        assert_eq!(snapshot.components.banking.value, 0.0);
        assert_eq!(snapshot.components.banking.change, 0.0);
        assert_eq!(snapshot.components.banking.weight, 20.0);
        assert!(snapshot.overall <= 100);
    }

    #[test]
    fn nan_inputs_are_sanitized_before_weighting() {
        let mut poisoned = Quote::with_change("OSEBX", 0.0);
        poisoned.change_percent = f64::NAN;
        poisoned.price = f64::INFINITY;
        let snapshot = compute_sentiment(&[poisoned], Some(f64::NAN));
        assert_eq!(snapshot.overall, 50);
        assert_eq!(snapshot.components.osebx.value, 0.0);
        assert_eq!(snapshot.components.osebx.change, 0.0);
    }

    #[test]
    fn components_serialize_with_all_four_factors() {
        let snapshot = compute_sentiment(&[], None);
        let value = serde_json::to_value(&snapshot).unwrap();
        let components = value.get("components").unwrap();
        for key in ["osebx", "oil", "nok", "banking"] {
            assert!(components.get(key).is_some(), "missing component {}", key);
        }
    }

    #[test]
    fn labels_render_norwegian_wording() {
        assert_eq!(SentimentLabel::ExtremeFear.to_string(), "Ekstrem frykt");
        assert_eq!(SentimentLabel::Neutral.to_string(), "Nøytral");
        assert_eq!(SentimentLabel::ExtremeOptimism.to_string(), "Ekstrem optimisme");
    }
}
