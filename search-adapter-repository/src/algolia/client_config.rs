//! Host and transport settings for the Algolia REST client.

use std::time::Duration;

use url::Url;

use crate::errors::SearchIndexError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport settings for [`AlgoliaClient`](super::AlgoliaClient).
///
/// By default writes go to `https://{APP_ID}.algolia.net` and reads to
/// `https://{APP_ID}-dsn.algolia.net`. Either host can be overridden, e.g. to
/// point at a proxy or a local mock server.
#[derive(Debug, Clone)]
pub struct AlgoliaClientConfig {
    /// Base URL for write operations (batch, delete, clear).
    pub write_host: Option<String>,
    /// Base URL for read operations (list indices).
    pub read_host: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for AlgoliaClientConfig {
    fn default() -> Self {
        Self {
            write_host: None,
            read_host: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AlgoliaClientConfig {
    /// Send both reads and writes to a single base URL.
    pub fn with_host(host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            write_host: Some(host.clone()),
            read_host: Some(host),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the write base URL for an application.
    pub fn write_url(&self, application_id: &str) -> Result<Url, SearchIndexError> {
        match &self.write_host {
            Some(host) => parse_host(host),
            None => parse_host(&format!("https://{}.algolia.net", application_id)),
        }
    }

    /// Resolve the read base URL for an application.
    pub fn read_url(&self, application_id: &str) -> Result<Url, SearchIndexError> {
        match &self.read_host {
            Some(host) => parse_host(host),
            None => parse_host(&format!("https://{}-dsn.algolia.net", application_id)),
        }
    }
}

fn parse_host(host: &str) -> Result<Url, SearchIndexError> {
    let url = Url::parse(host)
        .map_err(|e| SearchIndexError::connection(format!("invalid host '{}': {}", host, e)))?;
    if url.cannot_be_a_base() {
        return Err(SearchIndexError::connection(format!(
            "host '{}' cannot be used as a base URL",
            host
        )));
    }
    Ok(url)
}
