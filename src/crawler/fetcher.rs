//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client with the configured user agent and timeout
//! - GET requests with a fixed number of attempts per URL
//! - Backoff between attempts
//! - Error classification for log output

use crate::config::UserAgentConfig;
use crate::crawler::observer::CrawlObserver;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Why a single fetch attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptFailure {
    /// Server answered with a non-2xx status
    #[error("HTTP {0}")]
    Status(u16),

    /// Request did not complete within the client timeout
    #[error("request timed out")]
    Timeout,

    /// Connection could not be established (DNS, refused, TLS)
    #[error("connection failed: {0}")]
    Connect(String),

    /// Anything else, including failures while reading the body
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for AttemptFailure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AttemptFailure::Timeout
        } else if e.is_connect() {
            AttemptFailure::Connect(e.to_string())
        } else {
            AttemptFailure::Other(e.to_string())
        }
    }
}

/// A URL that stayed unavailable after every attempt
#[derive(Debug, Clone, Error)]
#[error("Failed to fetch {url} after {attempts} attempts: {last}")]
pub struct FetchError {
    pub url: String,
    pub attempts: u32,
    /// Failure of the final attempt
    pub last: AttemptFailure,
}

/// Builds an HTTP client with proper configuration
///
/// The client keeps one connection pool for the lifetime of the crawl and
/// follows redirects.
///
/// # Example
///
/// ```no_run
/// use listing_harvest::config::UserAgentConfig;
/// use listing_harvest::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.value.as_str())
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches page bodies, retrying transient failures
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 2xx | Return body |
/// | Non-2xx status | Retry |
/// | Timeout | Retry |
/// | Connection error | Retry |
/// | Body read error | Retry |
///
/// `backoff` is slept between attempts but not after the last one.
pub struct Fetcher {
    client: Client,
    max_attempts: u32,
    backoff: Duration,
    observer: Arc<dyn CrawlObserver>,
}

impl Fetcher {
    pub fn new(
        client: Client,
        max_attempts: u32,
        backoff: Duration,
        observer: Arc<dyn CrawlObserver>,
    ) -> Self {
        Self {
            client,
            max_attempts: max_attempts.max(1),
            backoff,
            observer,
        }
    }

    /// Fetches a URL, trying up to `max_attempts` times
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Body of the first successful response
    /// * `Err(FetchError)` - Every attempt failed; the caller decides whether
    ///   that ends the crawl or only skips this URL
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.fetch_once(url).await {
                Ok(body) => {
                    self.observer.on_fetch_succeeded(url, attempt);
                    return Ok(body);
                }
                Err(failure) => {
                    self.observer.on_fetch_failed(url, attempt, &failure);

                    if attempt >= self.max_attempts {
                        let error = FetchError {
                            url: url.to_string(),
                            attempts: attempt,
                            last: failure,
                        };
                        self.observer.on_fetch_abandoned(&error);
                        return Err(error);
                    }

                    self.observer.on_backoff(url, attempt, self.backoff);
                    tokio::time::sleep(self.backoff).await;
                }
            }
        }
    }

    /// Issues a single GET request
    async fn fetch_once(&self, url: &str) -> Result<String, AttemptFailure> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptFailure::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
