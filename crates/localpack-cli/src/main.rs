use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod run;

#[derive(Debug, Parser)]
#[command(name = "localpack")]
#[command(about = "Scrape Google local-pack business listings to a spreadsheet")]
struct Cli {
    /// Search query, e.g. "gym in tokyo"
    query: String,

    /// Output file path. Defaults to the query with spaces replaced, plus .csv
    #[arg(long)]
    out: Option<PathBuf>,

    /// Drop listings that have no phone number
    #[arg(long)]
    require_phone: bool,

    /// Override the configured page cap for this run
    #[arg(long)]
    max_pages: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = localpack_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    run::run_search(
        &config,
        &cli.query,
        cli.out.as_deref(),
        cli.require_phone,
        cli.max_pages,
    )
    .await
}
