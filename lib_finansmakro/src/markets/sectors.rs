//! # Dagens Statistikk Sector Tiles
//!
//! Derives the per-sector statistics tiles from the raw quote snapshot:
//! key Norwegian sectors, aggregate Oslo Børs momentum, oil, shipping,
//! currency strength and a crypto summary. Pure transformations, no I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use serde::{Deserialize, Serialize};

use crate::markets::quotes::{finite_or_zero, is_crypto_symbol, Quote};

/// Core Norwegian large caps used for aggregate momentum measures.
pub const CORE_NORWEGIAN_STOCKS: [&str; 6] = ["EQNR", "DNB", "MOWI", "TEL", "YAR", "ANDF"];

/// Maximum number of tiles the statistics panel renders.
const MAX_STATS: usize = 10;

/// A single statistics tile: sector name, percentage change and icon.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SectorStat {
    /// Reader-facing sector name, e.g. `Bank` or `NOK Styrke`.
    pub name: String,
    /// Percentage change driving the tile's trend styling.
    pub change: f64,
    /// Emoji icon shown on the tile.
    pub icon: String,
}

impl SectorStat {
    fn new(name: &str, change: f64, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            change: finite_or_zero(change),
            icon: icon.to_string(),
        }
    }

    /// The tile's trend, picked from the sign of the change.
    pub fn trend(&self) -> Trend {
        Trend::from_change(self.change)
    }
}

/// Direction of a percentage move, used to pick icons and colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    /// Strictly positive change.
    Up,
    /// Strictly negative change.
    Down,
    /// Exactly zero change.
    Flat,
}

impl Trend {
    /// Classifies a change by sign.
    pub fn from_change(change: f64) -> Self {
        if change > 0.0 {
            Trend::Up
        } else if change < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        }
    }
}

/// Formats a change as the dashboard renders it: `+1.23%` or `-0.50%`.
///
/// Zero formats with a plus sign, matching the original presentation.
/// Non-finite input is treated as zero for both magnitude and sign.
pub fn format_change(change: f64) -> String {
    let change = finite_or_zero(change);
    let formatted = format!("{:.2}", change.abs());
    if change >= 0.0 {
        format!("+{}%", formatted)
    } else {
        format!("-{}%", formatted)
    }
}

fn average_change<'a, I>(quotes: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Quote>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for quote in quotes {
        sum += finite_or_zero(quote.change_percent);
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

fn core_stocks<'a>(quotes: &'a [Quote]) -> Vec<&'a Quote> {
    quotes
        .iter()
        .filter(|q| CORE_NORWEGIAN_STOCKS.contains(&q.symbol.as_str()))
        .collect()
}

/// # Macro Sector Statistics
///
/// Builds the statistics tiles for the macro view. Tiles whose backing
/// quotes are absent are skipped, except for the rate and currency tiles
/// which fall back to stock-derived proxies the way the live dashboard does.
/// At most ten tiles are returned, in presentation order.
pub fn macro_sector_stats(quotes: &[Quote]) -> Vec<SectorStat> {
    let mut stats = Vec::new();

    // Key Norwegian sectors proxied by their bellwether stocks.
    let sector_mapping = [("DNB", "Bank", "🏦"), ("MOWI", "Sjømat", "🐟"), ("TEL", "Telekom", "📡")];
    for (symbol, name, icon) in sector_mapping {
        if let Some(quote) = Quote::find(quotes, symbol) {
            stats.push(SectorStat::new(name, quote.change_percent, icon));
        }
    }

    let core = core_stocks(quotes);
    let core_avg = average_change(core.iter().copied());

    // Aggregate Oslo Børs momentum across the core large caps.
    if let Some(avg) = core_avg {
        stats.push(SectorStat::new("Oslo Børs", avg, "📊"));
    }

    // Equinor stands in for the Norwegian oil sector.
    if let Some(eqnr) = Quote::find(quotes, "EQNR") {
        stats.push(SectorStat::new("Norsk Olje", eqnr.change_percent, "🛢️"));
    }

    // Scaled correlation with broad stock momentum; always shown.
    let rate_change = core_avg.unwrap_or(0.0) * 0.1;
    stats.push(SectorStat::new("Styringsrente", rate_change, "🏛️"));

    // Frontline as the shipping proxy.
    if let Some(fro) = Quote::find(quotes, "FRO") {
        stats.push(SectorStat::new("Shipping", fro.change_percent, "🚢"));
    }

    // Brent crude, matched by symbol or by name.
    let brent = quotes.iter().find(|q| {
        matches!(q.symbol.as_str(), "BZ" | "BRENT" | "BRENT_OIL")
            || q.name.to_lowercase().contains("brent")
    });
    if let Some(quote) = brent {
        stats.push(SectorStat::new("Brent Crude", quote.change_percent, "⚫"));
    }

    // NOK strength: a weakening currency pair means a stronger krone, so
    // the average is taken over the negated pair changes.
    let nok_pairs: Vec<&Quote> = quotes
        .iter()
        .filter(|q| matches!(q.symbol.as_str(), "USD/NOK" | "EUR/NOK" | "GBP/NOK"))
        .collect();
    if let Some(avg) = average_change(nok_pairs.iter().copied()) {
        stats.push(SectorStat::new("NOK Styrke", -avg, "💪"));
    } else if !core.is_empty() {
        // Fallback: derive a strength proxy from stock volatility.
        let magnitude = core
            .iter()
            .map(|q| finite_or_zero(q.change_percent).abs())
            .sum::<f64>()
            / core.len() as f64;
        stats.push(SectorStat::new("NOK Styrke", magnitude * 0.3, "💪"));
    }

    // EUR/NOK exchange rate, with a sentiment-derived fallback.
    if let Some(eur_nok) = Quote::find(quotes, "EUR/NOK") {
        stats.push(SectorStat::new("EUR/NOK", eur_nok.change_percent, "€"));
    } else {
        let proxy = if core.is_empty() {
            0.0
        } else {
            core.iter()
                .map(|q| finite_or_zero(q.change_percent).abs())
                .sum::<f64>()
                / core.len() as f64
                * 0.2
        };
        stats.push(SectorStat::new("EUR/NOK", proxy, "€"));
    }

    // Crypto summary tile, averaged over the tracked pairs.
    let cryptos: Vec<&Quote> = quotes.iter().filter(|q| is_crypto_symbol(&q.symbol)).collect();
    if let Some(avg) = average_change(cryptos.iter().copied()) {
        stats.push(SectorStat::new("Krypto", avg, "₿"));
    }

    stats.truncate(MAX_STATS);
    stats
}

/// # Crypto Sector Statistics
///
/// The crypto view shows the first five tracked pairs with per-coin icons.
pub fn crypto_sector_stats(quotes: &[Quote]) -> Vec<SectorStat> {
    quotes
        .iter()
        .filter(|q| is_crypto_symbol(&q.symbol))
        .take(5)
        .map(|quote| {
            let icon = match quote.symbol.as_str() {
                "BTC/NOK" => "₿",
                "ETH/NOK" => "⟠",
                "ADA/NOK" => "🔺",
                "SOL/NOK" => "☀️",
                _ => "🪙",
            };
            let name = quote.name.replace("/NOK", "");
            let display = if name.is_empty() {
                quote.symbol.replace("/NOK", "")
            } else {
                name
            };
            SectorStat::new(&display, quote.change_percent, icon)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_quote(symbol: &str, name: &str, change: f64) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            name: name.to_string(),
            change_percent: change,
            ..Default::default()
        }
    }

    #[test]
    fn trend_follows_sign() {
        assert_eq!(Trend::from_change(0.4), Trend::Up);
        assert_eq!(Trend::from_change(-0.4), Trend::Down);
        assert_eq!(Trend::from_change(0.0), Trend::Flat);
    }

    #[test]
    fn change_formatting_matches_dashboard() {
        assert_eq!(format_change(1.234), "+1.23%");
        assert_eq!(format_change(-0.5), "-0.50%");
        assert_eq!(format_change(0.0), "+0.00%");
    }

    #[test]
    fn change_formatting_neutralizes_non_finite_input() {
        assert_eq!(format_change(f64::NAN), "+0.00%");
        assert_eq!(format_change(f64::NEG_INFINITY), "+0.00%");
    }

    #[test]
    fn sector_tiles_follow_presentation_order() {
        let quotes = vec![
            named_quote("DNB", "DNB Bank", 1.0),
            named_quote("MOWI", "Mowi", -0.5),
            named_quote("TEL", "Telenor", 0.2),
            named_quote("EQNR", "Equinor", 2.0),
        ];
        let stats = macro_sector_stats(&quotes);
        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Bank", "Sjømat", "Telekom", "Oslo Børs", "Norsk Olje", "Styringsrente", "NOK Styrke", "EUR/NOK"]
        );
    }

    #[test]
    fn oslo_bors_tile_averages_core_stocks() {
        let quotes = vec![
            named_quote("EQNR", "Equinor", 2.0),
            named_quote("DNB", "DNB Bank", 1.0),
        ];
        let stats = macro_sector_stats(&quotes);
        let oslo = stats.iter().find(|s| s.name == "Oslo Børs").unwrap();
        assert!((oslo.change - 1.5).abs() < 1e-9);
    }

    #[test]
    fn styringsrente_is_scaled_core_average() {
        let quotes = vec![named_quote("DNB", "DNB Bank", 2.0)];
        let stats = macro_sector_stats(&quotes);
        let rate = stats.iter().find(|s| s.name == "Styringsrente").unwrap();
        assert!((rate.change - 0.2).abs() < 1e-9);
    }

    #[test]
    fn nok_strength_inverts_currency_pair_moves() {
        // A falling USD/NOK and EUR/NOK means the krone strengthened.
        let quotes = vec![
            named_quote("USD/NOK", "USD/NOK", -1.0),
            named_quote("EUR/NOK", "EUR/NOK", -0.5),
        ];
        let stats = macro_sector_stats(&quotes);
        let nok = stats.iter().find(|s| s.name == "NOK Styrke").unwrap();
        assert!((nok.change - 0.75).abs() < 1e-9);
    }

    #[test]
    fn brent_matches_by_name_when_symbol_differs() {
        let quotes = vec![named_quote("CO1", "Brent Crude Oil", 1.1)];
        let stats = macro_sector_stats(&quotes);
        assert!(stats.iter().any(|s| s.name == "Brent Crude"));
    }

    #[test]
    fn empty_snapshot_still_yields_fallback_tiles() {
        let stats = macro_sector_stats(&[]);
        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Styringsrente", "EUR/NOK"]);
        assert!(stats.iter().all(|s| s.change == 0.0));
    }

    #[test]
    fn crypto_view_caps_at_five_tiles_with_icons() {
        let quotes: Vec<Quote> = [
            ("BTC/NOK", "Bitcoin/NOK"),
            ("ETH/NOK", "Ethereum/NOK"),
            ("ADA/NOK", "Cardano/NOK"),
            ("SOL/NOK", "Solana/NOK"),
            ("DOT/NOK", "Polkadot/NOK"),
            ("UNI/NOK", "Uniswap/NOK"),
        ]
        .iter()
        .map(|(s, n)| named_quote(s, n, 1.0))
        .collect();
        let stats = crypto_sector_stats(&quotes);
        assert_eq!(stats.len(), 5);
        assert_eq!(stats[0].name, "Bitcoin");
        assert_eq!(stats[0].icon, "₿");
        assert_eq!(stats[4].icon, "🪙");
    }
}
