//! HTTP client for paginated search-result pages.

use std::time::Duration;

use localpack_core::AppConfig;
use reqwest::Client;

use crate::error::ScrapeError;

/// Browsers send these with every navigation; the upstream source serves
/// degraded markup (or nothing) without them.
const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-GB,en-US;q=0.9,en;q=0.8";

/// Fetches one page of search-result HTML at a time.
///
/// Each fetch is a single attempt bounded by the configured timeout: no
/// retry, no backoff. Any transport failure or non-2xx status is fatal for
/// the search call that issued it.
#[derive(Debug)]
pub struct ResultPageClient {
    pub(crate) client: Client,
    pub(crate) base_url: reqwest::Url,
}

impl ResultPageClient {
    /// Creates a client with the given base search endpoint, per-request
    /// timeout, and User-Agent.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::InvalidBaseUrl`] — `base_url` does not parse.
    /// - [`ScrapeError::Http`] — the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ScrapeError> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| ScrapeError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScrapeError> {
        Self::new(
            &config.search_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches one page of results for `query` at the zero-based offset
    /// `start` and returns the raw HTML body.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::UnexpectedStatus`] — any non-2xx response.
    /// - [`ScrapeError::Http`] — network failure or timeout.
    pub async fn fetch_page(&self, query: &str, start: u32) -> Result<String, ScrapeError> {
        let url = self.search_url(query, start);
        tracing::debug!(%url, "fetching results page");

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Builds the page URL: `q` is the search text, `start` the zero-based
    /// offset (multiples of the page size), and `udm=1` pins the upstream
    /// source to the map/local-pack result layout.
    fn search_url(&self, query: &str, start: u32) -> reqwest::Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("start", &start.to_string())
            .append_pair("udm", "1");
        url
    }
}
