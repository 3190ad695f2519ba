//! # Fresh News
//!
//! A scraping robot that searches a news site for a phrase, extracts the
//! articles published inside a configured recency window, and writes a
//! spreadsheet report plus the article images.
//!
//! ## Usage
//!
//! ```sh
//! fresh_news --config config/config.json -o ./output
//! ```
//!
//! ## Architecture
//!
//! The run is a straight pipeline:
//! 1. **Resolve**: load the run parameters from a work item or config file
//! 2. **Search**: open the site, submit the phrase, apply the category filter
//! 3. **Collect**: paginate through results, extracting eligible articles
//! 4. **Report**: download images and serialize the records to CSV
//!
//! The driver session is released on every exit path; fatal errors propagate
//! only after the release has run.

use clap::Parser;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod driver;
mod error;
mod extract;
mod models;
mod outputs;
mod paginate;
mod selectors;
mod session;
mod utils;

use cli::Cli;
use config::RunConfig;
use driver::{Driver, HttpDriver};
use error::Result;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<()> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("fresh_news starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.work_item, ?args.output_dir, "Parsed CLI arguments");

    // Parameter problems abort before any session opens.
    let run_config = RunConfig::resolve(&args.parameter_source())?;

    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e.into());
    }

    let mut driver = HttpDriver::new(&args.base_url)?;
    let outcome = run(&mut driver, &run_config, &args.base_url, &args.output_dir).await;

    // The session is released exactly once, before any error propagates.
    if let Err(e) = driver.close().await {
        warn!(error = %e, "Driver session did not close cleanly");
    }

    let records = match outcome {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, "Run failed");
            return Err(e);
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        records,
        ?elapsed,
        secs = elapsed.as_secs(),
        "Execution complete"
    );
    Ok(())
}

/// Search, collect, and report. Returns the number of records written. A run
/// that extracts zero articles still writes its (empty) report and exits
/// cleanly.
async fn run<D: Driver>(
    driver: &mut D,
    config: &RunConfig,
    base_url: &str,
    output_dir: &Path,
) -> Result<usize> {
    session::run_search(driver, base_url, &config.search_phrase, &config.category).await?;

    let records = paginate::collect_articles(driver, config).await?;
    info!(count = records.len(), "Extraction finished");

    let client = reqwest::Client::builder().build()?;
    outputs::images::download_all(&client, &records, output_dir).await;
    outputs::spreadsheet::write_report(&records, &output_dir.join("news_articles.csv"))?;

    Ok(records.len())
}
