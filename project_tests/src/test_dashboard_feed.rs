//! # Dashboard Feed Live Test
//!
//! Connects to a running feed backend, fetches the market-data and
//! fear/greed endpoints once, and prints the computed sentiment snapshot.

use clap::Parser;
use lib_finansmakro::markets::feargreed::FearGreedData;
use lib_finansmakro::markets::quotes::Quote;
use lib_finansmakro::markets::sentiment::compute_sentiment;
use lib_finansmakro::retrieve::FeedClient;

#[derive(Parser, Debug)]
#[clap(about = "Fetches the live dashboard feeds and prints the sentiment snapshot.")]
struct Args {
    /// Base URL of the feed API.
    #[clap(long, default_value = "https://finansmakro.no/api/")]
    api_base_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // // Statement: Initialize the retry-capable feed client
    let feed = FeedClient::new(&args.api_base_url)?;

    println!("[*] Requesting live data from {}...", args.api_base_url);

    let quotes: Vec<Quote> = feed.get_json("market-data").await?;
    println!("[INFO] Received {} quotes", quotes.len());

    // // Statement: Fear/greed failures degrade to an absent external index
    let external = match feed.get_json::<FearGreedData>("fear-greed").await {
        Ok(report) => {
            println!("[INFO] Fear/greed index: {} ({})", report.index, report.sentiment);
            Some(report.index)
        }
        Err(e) => {
            eprintln!("[WARN] Fear/greed feed unavailable: {}", e);
            None
        }
    };

    let snapshot = compute_sentiment(&quotes, external);

    println!("\n[SUCCESS] Sentiment snapshot:");
    println!("-----------------------------------------------");
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    println!("-----------------------------------------------");

    Ok(())
}
