//! # Sentiment Pipeline Offline Test
//!
//! Runs the full aggregation pipeline against a mock quote snapshot and
//! prints every derived artifact: the sentiment snapshot, the Dagens Puls
//! text, the outlook paragraphs and the sector statistics.

use lib_finansmakro::markets::quotes::Quote;
use lib_finansmakro::markets::sectors::{format_change, macro_sector_stats};
use lib_finansmakro::markets::sentiment::compute_sentiment;
use lib_finansmakro::narrative::{
    daily_pulse, investment_trend_text, sector_development_text, PulseTemplates,
};

/// Builds the worked-example quote set from the dashboard documentation.
fn mock_quotes() -> Vec<Quote> {
    let mut quotes = vec![
        Quote::with_change("OSEBX", 1.0),
        Quote::with_change("BRENT_OIL", -2.0),
        Quote::with_change("NOK_USD", 0.5),
        Quote::with_change("DNB", 1.5),
        Quote::with_change("EQNR", 0.8),
        Quote::with_change("MOWI", -0.3),
        Quote::with_change("TEL", 0.1),
    ];
    for quote in &mut quotes {
        quote.name = quote.symbol.clone();
    }
    quotes
}

fn main() -> anyhow::Result<()> {
    let quotes = mock_quotes();

    println!("[*] Computing sentiment from {} mock quotes...", quotes.len());

    // // Statement: Blend with a mock external fear/greed index of 60
    let snapshot = compute_sentiment(&quotes, Some(60.0));

    println!("\n[SUCCESS] Sentiment snapshot:");
    println!("-----------------------------------------------");
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    println!("-----------------------------------------------");

    // // Statement: Verify the documented worked example holds
    assert_eq!(snapshot.overall, 56, "worked example drifted");

    println!("[INFO] Dagens Puls: {}", daily_pulse(&snapshot, &PulseTemplates::default()));
    println!("[INFO] Investeringstrender: {}", investment_trend_text(&quotes));
    println!("[INFO] Sektorutvikling: {}", sector_development_text(&quotes));

    println!("\n[INFO] Dagens Statistikk:");
    for stat in macro_sector_stats(&quotes) {
        println!("  {} {:<14} {}", stat.icon, stat.name, format_change(stat.change));
    }

    Ok(())
}
