// Declare the feature-gated modules
#[cfg(feature = "articles")]
pub mod articles;
#[cfg(feature = "configs")]
pub mod configs;
#[cfg(feature = "ingestors")]
pub mod ingestors;
#[cfg(feature = "loggers")]
pub mod loggers;
#[cfg(feature = "markets")]
pub mod markets;
#[cfg(feature = "narrative")]
pub mod narrative;
#[cfg(feature = "retrieve")]
pub mod retrieve;

// Re-export the most commonly used types
#[cfg(feature = "articles")]
pub use articles::{Article, ViewMode};
#[cfg(feature = "markets")]
pub use markets::quotes::Quote;
#[cfg(feature = "markets")]
pub use markets::sentiment::{compute_sentiment, SentimentLabel, SentimentSnapshot};
