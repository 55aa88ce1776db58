//! # Dashboard Polling Ingestor
//!
//! A self-scheduling poller for the REST feeds behind the dashboard. The
//! sentiment computation itself is pure and synchronous; this module owns
//! all of the timing and I/O around it.
//!
//! ## Key Design Principles:
//! - **Self-Scheduling**: The poller runs in a loop, performs a poll, and
//!   sleeps for its configured cadence before the next one. Market quotes
//!   refresh on a short cadence, the fear/greed index on a longer one.
//! - **Pure Core**: Every cycle calls [`compute_sentiment`] with
//!   already-resolved values. The aggregator never blocks, so overlapping
//!   timers cannot race on shared state.
//! - **Resilience**: Fetch errors log a warning and retry after a fixed
//!   delay. A failing fear/greed feed keeps the previous report for a
//!   bounded grace period and then degrades to an absent external index
//!   rather than blending hours-old data or stalling the loop.
//! - **Watch Publication**: Fresh snapshots are published over a
//!   `tokio::sync::watch` channel; the display layer always observes the
//!   most recent value and never queues stale ones.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use crate::markets::feargreed::FearGreedData;
use crate::markets::quotes::Quote;
use crate::markets::sentiment::{compute_sentiment, SentimentSnapshot};
use crate::retrieve::FeedClient;

/// Cadences and endpoints for the polling loop.
#[derive(Debug, Clone)]
pub struct PollerSettings {
    /// How often the market-data feed is polled.
    pub market_interval: Duration,
    /// How often the fear/greed feed is refreshed.
    pub feargreed_interval: Duration,
    /// Delay before retrying after a failed market poll.
    pub retry_delay: Duration,
    /// How old a fear/greed report may grow before it is dropped instead
    /// of being blended into the score.
    pub feargreed_max_age: Duration,
    /// Endpoint path for the quote feed, relative to the client base URL.
    pub market_path: String,
    /// Endpoint path for the fear/greed feed.
    pub feargreed_path: String,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            market_interval: Duration::from_secs(30),
            feargreed_interval: Duration::from_secs(300),
            retry_delay: Duration::from_secs(60),
            feargreed_max_age: Duration::from_secs(900),
            market_path: "market-data".to_string(),
            feargreed_path: "fear-greed".to_string(),
        }
    }
}

/// # Dashboard Poller
///
/// Owns the feed client, the polling cadence and the snapshot channel.
pub struct DashboardPoller {
    feed: FeedClient,
    settings: PollerSettings,
    tx: watch::Sender<SentimentSnapshot>,
    /// The last successfully fetched fear/greed report and when it arrived.
    feargreed: Option<(FearGreedData, Instant)>,
}

impl DashboardPoller {
    /// Creates a poller and the receiving half of its snapshot channel.
    ///
    /// The channel starts out holding a neutral snapshot so the display
    /// layer has something to render before the first poll completes.
    pub fn new(
        feed: FeedClient,
        settings: PollerSettings,
    ) -> (Self, watch::Receiver<SentimentSnapshot>) {
        let (tx, rx) = watch::channel(compute_sentiment(&[], None));
        (
            Self {
                feed,
                settings,
                tx,
                feargreed: None,
            },
            rx,
        )
    }

    /// # Main Execution Loop
    ///
    /// Runs until the last snapshot receiver is dropped. Each cycle fetches
    /// the quote feed, refreshes the fear/greed index when it has gone
    /// stale, recomputes the snapshot and publishes it.
    pub async fn run(mut self) {
        log::info!(
            "Dashboard poller started against {}",
            self.feed.base_url()
        );

        loop {
            match self.poll_once().await {
                Ok(snapshot) => {
                    if self.tx.send(snapshot).is_err() {
                        // No display layer left listening.
                        log::info!("All snapshot receivers dropped, poller stopping");
                        return;
                    }
                    tokio::time::sleep(self.settings.market_interval).await;
                }
                Err(e) => {
                    log::warn!(
                        "Market data poll failed: {}. Retrying in {:?}",
                        e,
                        self.settings.retry_delay
                    );
                    tokio::time::sleep(self.settings.retry_delay).await;
                }
            }
        }
    }

    /// Fetches fresh inputs and recomputes the sentiment snapshot.
    async fn poll_once(&mut self) -> anyhow::Result<SentimentSnapshot> {
        let quotes: Vec<Quote> = self.feed.get_json(&self.settings.market_path).await?;

        self.refresh_feargreed_if_stale().await;

        let external = self.feargreed.as_ref().map(|(data, _)| data.index);
        Ok(compute_sentiment(&quotes, external))
    }

    /// Refreshes the fear/greed report once its cadence has elapsed.
    ///
    /// A failed refresh keeps the previous report only while it is younger
    /// than `feargreed_max_age`; after that the cached report is dropped
    /// and the aggregator runs with an absent external index, its defined
    /// degraded mode. Either way the poll cycle continues.
    async fn refresh_feargreed_if_stale(&mut self) {
        let stale = match &self.feargreed {
            Some((_, fetched_at)) => fetched_at.elapsed() >= self.settings.feargreed_interval,
            None => true,
        };
        if !stale {
            return;
        }

        match self
            .feed
            .get_json::<FearGreedData>(&self.settings.feargreed_path)
            .await
        {
            Ok(data) => {
                log::debug!("Fear/greed index refreshed: {}", data.index);
                self.feargreed = Some((data, Instant::now()));
            }
            Err(e) => {
                log::warn!("Fear/greed refresh failed: {}", e);
                self.drop_expired_feargreed();
            }
        }
    }

    /// Evicts the cached fear/greed report once it exceeds the maximum age.
    fn drop_expired_feargreed(&mut self) {
        if let Some((_, fetched_at)) = &self.feargreed {
            if fetched_at.elapsed() >= self.settings.feargreed_max_age {
                log::warn!("Fear/greed report expired without a refresh, dropping external index");
                self.feargreed = None;
            }
        }
    }
}
