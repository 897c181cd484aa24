//! Search command handler for the CLI.
//!
//! Called from `main` after config and logging are established. Drives
//! the paginated search to completion and writes the spreadsheet.

use std::path::{Path, PathBuf};

use localpack_core::AppConfig;
use localpack_scraper::{ResultPageClient, SearchOptions};

/// Runs a full search for `query` and writes the results to a CSV file.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed, a page fetch
/// fails, or the output file cannot be written.
pub(crate) async fn run_search(
    config: &AppConfig,
    query: &str,
    out: Option<&Path>,
    require_phone: bool,
    max_pages: Option<usize>,
) -> anyhow::Result<()> {
    let client = ResultPageClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build search client: {e}"))?;

    let mut options = SearchOptions::from_config(config);
    options.require_phone = require_phone;
    if let Some(cap) = max_pages {
        options.max_pages = cap;
    }

    tracing::info!(query, require_phone, max_pages = options.max_pages, "starting search");
    let listings = client.search_all(query, &options).await?;

    let out_path = out.map_or_else(|| default_out_path(query), Path::to_path_buf);
    localpack_export::export_to_file(&listings, &out_path)?;

    println!(
        "wrote {} listings to {}",
        listings.len(),
        out_path.display()
    );
    Ok(())
}

/// Derives an output filename from the query, e.g. "gym in tokyo" becomes
/// `gym_in_tokyo.csv`.
fn default_out_path(query: &str) -> PathBuf {
    let stem: String = query
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    PathBuf::from(format!("{stem}.csv"))
}
