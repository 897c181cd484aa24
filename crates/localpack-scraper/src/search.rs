//! Pagination driver: fetch, extract, accumulate, deduplicate.
//!
//! Pages are walked strictly sequentially — each offset's relevance depends
//! on the previous page being non-empty, and the upstream source is
//! rate-sensitive. All mutable state (accumulator, offset) is local to one
//! call, so independent searches are safe to run concurrently.

use localpack_core::{dedup_listings, AppConfig, Listing};
use tokio_util::sync::CancellationToken;

use crate::client::ResultPageClient;
use crate::error::{ExtractError, ScrapeError};
use crate::extract::{self, ExtractOptions};
use crate::layout::{PageLayout, GOOGLE_LOCAL_PACK};
use crate::phone::Region;

/// Listings the upstream source serves per paginated request. The offset
/// always advances by this amount, regardless of how many records a page
/// actually yielded.
pub const PAGE_SIZE: u32 = 10;

/// Per-search knobs for the pagination driver.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Selector set for the expected page layout.
    pub layout: PageLayout,
    /// Region assumed for phone numbers without a `+CC` prefix.
    pub default_region: Region,
    /// Drop listings for which no phone number could be extracted.
    pub require_phone: bool,
    /// Hard cap on pages fetched per search. Termination normally comes from
    /// an empty page; the cap guards against an upstream that never serves
    /// one.
    pub max_pages: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            layout: GOOGLE_LOCAL_PACK,
            default_region: Region::default(),
            require_phone: false,
            max_pages: 100,
        }
    }
}

impl SearchOptions {
    /// Builds options from the application configuration. An unrecognized
    /// region code falls back to the default region with a warning.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let default_region = Region::from_code(&config.default_region).unwrap_or_else(|| {
            tracing::warn!(
                region = %config.default_region,
                "unrecognized default region, assuming US"
            );
            Region::default()
        });
        Self {
            default_region,
            max_pages: config.max_pages,
            ..Self::default()
        }
    }
}

impl ResultPageClient {
    /// Runs a full paginated search for `query` and returns the
    /// deduplicated result set in first-occurrence order.
    ///
    /// Starting at offset 0, each page is fetched and extracted; a page
    /// yielding one or more listings advances the offset by [`PAGE_SIZE`],
    /// while an empty page (or one with no results container) terminates
    /// the search successfully with whatever was accumulated.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Http`] / [`ScrapeError::UnexpectedStatus`] — a fetch
    ///   failed; fatal for the whole call, nothing is retried.
    /// - [`ScrapeError::PaginationLimit`] — more than `max_pages` non-empty
    ///   pages were served.
    /// - [`ScrapeError::Extract`] — the layout's selectors do not parse.
    pub async fn search_all(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Vec<Listing>, ScrapeError> {
        self.search_all_with_cancel(query, options, &CancellationToken::new())
            .await
    }

    /// Like [`Self::search_all`], but checks `cancel` before each page fetch.
    ///
    /// # Errors
    ///
    /// In addition to the [`Self::search_all`] errors, returns
    /// [`ScrapeError::Cancelled`] once the token is cancelled; no further
    /// requests are issued after that point.
    pub async fn search_all_with_cancel(
        &self,
        query: &str,
        options: &SearchOptions,
        cancel: &CancellationToken,
    ) -> Result<Vec<Listing>, ScrapeError> {
        let selectors = extract::Selectors::compile(&options.layout)?;
        let extract_options = ExtractOptions {
            default_region: options.default_region,
        };

        let mut accumulated: Vec<Listing> = Vec::new();
        let mut start: u32 = 0;
        let mut pages_fetched = 0usize;

        loop {
            if cancel.is_cancelled() {
                return Err(ScrapeError::Cancelled {
                    query: query.to_owned(),
                    pages_fetched,
                });
            }
            if pages_fetched >= options.max_pages {
                return Err(ScrapeError::PaginationLimit {
                    query: query.to_owned(),
                    max_pages: options.max_pages,
                });
            }

            let html = self.fetch_page(query, start).await?;
            pages_fetched += 1;

            let page = match extract::extract_with_selectors(&html, &selectors, &extract_options) {
                Ok(listings) => listings,
                // The upstream's "no results" page lacks the container
                // entirely; for pagination it means the same as an empty
                // extraction.
                Err(ExtractError::NoResultsContainer { .. }) => Vec::new(),
                Err(e) => return Err(e.into()),
            };

            // Termination keys on the raw per-page yield: a page whose cards
            // all get filtered out below must still advance the search.
            if page.is_empty() {
                tracing::debug!(query, start, pages_fetched, "empty page, search complete");
                break;
            }

            tracing::info!(query, start, count = page.len(), "extracted listings page");
            accumulated.extend(page);
            start += PAGE_SIZE;
        }

        if options.require_phone {
            accumulated.retain(Listing::has_phone);
        }
        Ok(dedup_listings(accumulated))
    }
}
