//! # Article Feed Filtering
//!
//! The article model shared with the backend feed and the keyword-based
//! relevance filter that splits the feed into the macro and crypto views.
//! The macro view is restricted to Norwegian financial sources and strips
//! crypto and non-financial content; the crypto view keeps only articles
//! mentioning the tracked ecosystem.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use serde::{Deserialize, Serialize};

/// Keywords marking an article as crypto content (lowercase matching).
pub const CRYPTO_KEYWORDS: [&str; 28] = [
    "bitcoin", "ethereum", "cryptocurrency", "blockchain", "btc", "eth", "crypto",
    "coindesk", "cointelegraph", "cryptonews", "defi", "nft", "web3", "blackrock",
    "solana", "cardano", "ripple", "polkadot", "avalanche", "polygon", "chainlink",
    "uniswap", "whale", "hodl", "staking", "yield farming", "liquidated", "pepe",
];

/// Norwegian financial sources allowed in the macro view.
pub const NORWEGIAN_SOURCES: [&str; 5] =
    ["E24", "Dagens Næringsliv", "Teknisk Ukeblad", "Kapital", "Hegnar"];

/// English crypto outlets excluded from the macro view.
pub const ENGLISH_SOURCES: [&str; 3] = ["CoinDesk", "CoinTelegraph", "CryptoNews"];

/// Non-financial topics excluded from the macro view (lowercase matching).
const NON_FINANCIAL_KEYWORDS: [&str; 8] = [
    "lo-leder", "fagforening", "arbeiderparti", "valg",
    "politikk", "kommune", "skole", "helse",
];

/// Which half of the dashboard the reader is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Norwegian macro view: stocks, rates, currency, oil.
    Makro,
    /// Crypto view: the tracked coin pairs and their ecosystem.
    Krypto,
}

/// # Article
///
/// One entry of the news feed, as delivered by the backend.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Article {
    /// Backend row id.
    #[serde(default)]
    pub id: i64,
    /// Headline.
    pub title: String,
    /// Short summary shown on the card.
    #[serde(default)]
    pub summary: String,
    /// Source name; the feed reuses the author field for the outlet.
    #[serde(default)]
    pub author: String,
    /// Upstream source identifier.
    #[serde(default)]
    pub source: String,
    /// Canonical article URL.
    #[serde(default)]
    pub url: String,
    /// Feed category.
    #[serde(default)]
    pub category: String,
    /// Whether the article is pinned as featured.
    #[serde(default)]
    pub featured: bool,
    /// Editorial sentiment tag.
    #[serde(default)]
    pub sentiment: String,
    /// Publication timestamp as delivered by the feed.
    #[serde(default)]
    pub published_at: String,
}

impl Article {
    /// The lowercase haystack the keyword filters match against.
    fn searchable_text(&self) -> String {
        format!("{} {} {}", self.title, self.summary, self.author).to_lowercase()
    }

    /// True when the article mentions any crypto keyword.
    pub fn has_crypto_content(&self) -> bool {
        let text = self.searchable_text();
        CRYPTO_KEYWORDS.iter().any(|kw| text.contains(kw))
    }

    /// True when the article avoids the excluded non-financial topics.
    pub fn is_financially_relevant(&self) -> bool {
        let text = self.searchable_text();
        !NON_FINANCIAL_KEYWORDS.iter().any(|kw| text.contains(kw))
    }

    /// True when the outlet is one of the whitelisted Norwegian sources.
    pub fn is_norwegian_source(&self) -> bool {
        NORWEGIAN_SOURCES.contains(&self.author.as_str())
    }
}

/// Decides whether a single article belongs in the given view.
pub fn matches_view(article: &Article, mode: ViewMode) -> bool {
    match mode {
        ViewMode::Krypto => article.has_crypto_content(),
        ViewMode::Makro => {
            article.is_norwegian_source()
                && !ENGLISH_SOURCES.contains(&article.author.as_str())
                && !article.has_crypto_content()
                && article.is_financially_relevant()
        }
    }
}

/// Filters the feed down to the articles relevant for the given view,
/// preserving feed order.
pub fn filter_articles(articles: &[Article], mode: ViewMode) -> Vec<Article> {
    articles
        .iter()
        .filter(|a| matches_view(a, mode))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, summary: &str, author: &str) -> Article {
        Article {
            title: title.to_string(),
            summary: summary.to_string(),
            author: author.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn krypto_view_keeps_only_crypto_articles() {
        let feed = vec![
            article("Bitcoin til ny rekord", "BTC stiger", "CoinDesk"),
            article("Renteheving fra Norges Bank", "Styringsrenten opp", "E24"),
        ];
        let filtered = filter_articles(&feed, ViewMode::Krypto);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Bitcoin til ny rekord");
    }

    #[test]
    fn makro_view_requires_norwegian_source() {
        let feed = vec![
            article("Oljeprisen stiger", "Brent opp", "E24"),
            article("Oil prices surge", "Brent up", "Reuters"),
        ];
        let filtered = filter_articles(&feed, ViewMode::Makro);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].author, "E24");
    }

    #[test]
    fn makro_view_drops_crypto_content_from_norwegian_sources() {
        let feed = vec![article(
            "Bitcoin-fond lanseres i Norge",
            "Krypto for alle",
            "E24",
        )];
        assert!(filter_articles(&feed, ViewMode::Makro).is_empty());
    }

    #[test]
    fn makro_view_drops_non_financial_topics() {
        let feed = vec![
            article("Valgkamp i kommunene", "Politikk og skole", "E24"),
            article("DNB leverer sterkt kvartal", "Bankresultater", "Dagens Næringsliv"),
        ];
        let filtered = filter_articles(&feed, ViewMode::Makro);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].author, "Dagens Næringsliv");
    }

    #[test]
    fn keyword_matching_is_case_insensitive() {
        let a = article("ETHEREUM oppgradering", "", "CoinTelegraph");
        assert!(a.has_crypto_content());
    }
}
