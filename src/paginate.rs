//! Pagination controller.
//!
//! Drives extraction across result pages. Each cycle waits for the article
//! list, extracts it, and tries to advance:
//!
//! - the article list never appearing is **fatal**: an empty results page
//!   almost always means a broken locator or a site change, not a genuinely
//!   empty result set, and silently writing an empty report would hide that;
//! - a missing or dead next-page control is the **normal end of results**;
//!   the loop stops with whatever was collected;
//! - the page cap stops the loop even when a next-page control remains.
//!
//! The article collection is re-resolved from scratch on every page entry;
//! nothing obtained on a previous page survives the advance.

use crate::config::RunConfig;
use crate::driver::{Driver, DriverError};
use crate::error::{Result, ScrapeError};
use crate::extract;
use crate::models::ArticleRecord;
use crate::selectors as sel;
use std::time::Duration;
use tracing::{info, instrument};

const RESULTS_TIMEOUT: Duration = Duration::from_secs(15);
const NEXT_PAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Collect eligible articles from up to `config.max_pages` result pages, in
/// page-then-on-page encounter order.
#[instrument(level = "info", skip_all, fields(max_pages = config.max_pages))]
pub async fn collect_articles<D: Driver>(
    driver: &mut D,
    config: &RunConfig,
) -> Result<Vec<ArticleRecord>> {
    let mut records = Vec::new();
    let mut page = 1usize;

    loop {
        driver
            .wait_visible(sel::ARTICLE, RESULTS_TIMEOUT)
            .await
            .map_err(ScrapeError::ResultsNotLoaded)?;

        let extracted = extract::extract_page(driver, &config.search_phrase, config.cutoff).await?;
        info!(page, extracted = extracted.len(), "Extracted results page");
        records.extend(extracted);

        if page >= config.max_pages {
            info!(page, "Reached page cap");
            break;
        }

        match advance(driver).await {
            Ok(()) => page += 1,
            Err(error) => {
                // Benign end of results: the last page simply has no control.
                info!(page, reason = %error, "No further results page");
                break;
            }
        }
    }

    info!(total = records.len(), pages = page, "Pagination finished");
    Ok(records)
}

async fn advance<D: Driver>(driver: &mut D) -> std::result::Result<(), DriverError> {
    driver.wait_enabled(sel::NEXT_PAGE, NEXT_PAGE_TIMEOUT).await?;
    driver.click(sel::NEXT_PAGE).await
}
