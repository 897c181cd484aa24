/// Runtime configuration for a search run, loaded from environment variables.
///
/// See [`crate::config::load_app_config`] for the variable names and defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base search endpoint, e.g. `https://www.google.com/search`.
    /// Overridable so tests and proxies can point elsewhere.
    pub search_base_url: String,
    /// Per-request timeout in seconds. A timed-out fetch is fatal for the
    /// in-progress search call — there is no retry.
    pub request_timeout_secs: u64,
    /// Browser-realistic User-Agent. The upstream source degrades or rejects
    /// responses for obviously non-browser agents.
    pub user_agent: String,
    /// ISO region code (e.g. `"US"`) assumed for phone numbers that carry no
    /// explicit country-code prefix.
    pub default_region: String,
    /// Upper bound on pages fetched per search, guarding against an upstream
    /// source that never returns an empty page.
    pub max_pages: usize,
    /// Tracing filter directive (e.g. `"info"` or `"localpack_scraper=debug"`).
    pub log_level: String,
}
