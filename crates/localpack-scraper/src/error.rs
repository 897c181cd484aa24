use thiserror::Error;

/// Errors surfaced by the search pipeline. A fetch-level failure is fatal for
/// the in-progress search call and is never retried.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid search base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("pagination limit reached for \"{query}\": exceeded {max_pages} pages")]
    PaginationLimit { query: String, max_pages: usize },

    #[error("search for \"{query}\" cancelled after {pages_fetched} pages")]
    Cancelled { query: String, pages_fetched: usize },

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Errors from the HTML record extractor.
///
/// A single malformed card never errors — it degrades to default field
/// values. The only page-level failure modes are a missing results container
/// (interpreted by the pagination driver as "no more pages") and a layout
/// whose selectors do not parse.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("page has no results container matching {selector:?}")]
    NoResultsContainer { selector: String },

    #[error("invalid layout selector {selector:?}: {reason}")]
    InvalidLayout { selector: String, reason: String },
}
