//! # JSON Feed Retrieval
//!
//! A thin asynchronous client for the dashboard's JSON feeds, built on
//! `reqwest` with retry middleware. All feed endpoints are GET-only and
//! return JSON, so the surface is a single typed fetch.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// How long a single feed request may take before it is abandoned.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Transient failures are retried this many times with exponential backoff.
const MAX_RETRIES: u32 = 3;

/// # Feed Client
///
/// A retry-capable HTTP client bound to the feed's base URL. Relative
/// endpoint paths are joined onto the base, so one client serves both the
/// market-data and fear/greed feeds.
pub struct FeedClient {
    /// The underlying middleware-enabled client.
    inner: ClientWithMiddleware,
    /// The base URL to which all endpoint paths are joined.
    base_url: Url,
}

impl FeedClient {
    /// Creates a feed client for the given absolute base URL.
    ///
    /// # Errors
    /// Fails when the base URL is not a valid absolute URL or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let url = Url::parse(base_url)?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(MAX_RETRIES);
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("FinansMakro/1.0")
            .build()?;
        let inner = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { inner, base_url: url })
    }

    /// Fetches an endpoint and deserializes the JSON body.
    ///
    /// # Errors
    /// Returns an error on invalid paths, network failure after retries,
    /// non-2xx responses, or a body that does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let endpoint = self.base_url.join(path)?;
        let response = self.inner.get(endpoint).send().await?;
        let data = response.error_for_status()?.json::<T>().await?;
        Ok(data)
    }

    /// The base URL this client is bound to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
