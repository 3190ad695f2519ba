//! Per-page article extraction.
//!
//! Given the current results page, produce an [`ArticleRecord`] for every
//! article published on or after the cutoff date. Articles older than the
//! cutoff are skipped, not a stopping condition: "related" and sponsored
//! promos interleave with results, so later articles on the same page are
//! not guaranteed to be older.
//!
//! Articles with unusable markup (missing or non-numeric timestamp, missing
//! title or description) are skipped with a warning; a single bad promo
//! never fails the page.

use crate::driver::Driver;
use crate::error::{Result, ScrapeError};
use crate::models::ArticleRecord;
use crate::selectors as sel;
use chrono::{DateTime, Local};
use tracing::{debug, warn};

/// Extract all eligible articles from the current page, in DOM order.
pub async fn extract_page<D: Driver>(
    driver: &D,
    search_phrase: &str,
    cutoff: DateTime<Local>,
) -> Result<Vec<ArticleRecord>> {
    let total = driver.count(sel::ARTICLE).await?;
    let mut records = Vec::new();

    for index in 0..total {
        match extract_article(driver, index, search_phrase, cutoff).await {
            Ok(Some(record)) => records.push(record),
            Ok(None) => debug!(index, "Article older than cutoff; skipped"),
            Err(
                error @ (ScrapeError::MalformedArticle { .. } | ScrapeError::MissingField { .. }),
            ) => {
                warn!(index, %error, "Skipping article with unusable markup");
            }
            Err(error) => return Err(error),
        }
    }

    debug!(total, kept = records.len(), "Extracted page");
    Ok(records)
}

/// Extract one article. `Ok(None)` means the article is older than the
/// cutoff. Every read re-resolves the element by index: the DOM may mutate
/// between reads, and a held handle would go stale.
async fn extract_article<D: Driver>(
    driver: &D,
    index: usize,
    search_phrase: &str,
    cutoff: DateTime<Local>,
) -> Result<Option<ArticleRecord>> {
    let stamp = driver
        .attr(sel::ARTICLE, index, sel::ARTICLE_TIMESTAMP, sel::TIMESTAMP_ATTR)
        .await?
        .ok_or_else(|| ScrapeError::MalformedArticle {
            index,
            reason: "timestamp attribute missing".into(),
        })?;
    let published_at =
        timestamp_to_datetime(&stamp).ok_or_else(|| ScrapeError::MalformedArticle {
            index,
            reason: format!("unparseable timestamp `{stamp}`"),
        })?;

    if published_at < cutoff {
        return Ok(None);
    }

    let title = required_title(driver, index).await?;
    // Unlike the title, a present-but-blank description is kept as is; only
    // a missing node is an error.
    let description = driver
        .text(sel::ARTICLE, index, sel::ARTICLE_DESCRIPTION)
        .await?
        .map(|text| text.trim().to_string())
        .ok_or(ScrapeError::MissingField { index, field: "description" })?;
    let image_url = driver
        .attr(sel::ARTICLE, index, sel::ARTICLE_IMAGE, "src")
        .await?
        .unwrap_or_default();

    Ok(Some(ArticleRecord::new(
        title,
        description,
        published_at,
        image_url,
        search_phrase,
    )))
}

/// The title must be present and non-empty after trimming.
async fn required_title<D: Driver>(driver: &D, index: usize) -> Result<String> {
    driver
        .text(sel::ARTICLE, index, sel::ARTICLE_TITLE)
        .await?
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(ScrapeError::MissingField { index, field: "title" })
}

/// Millisecond epoch attribute to a local timestamp. The attribute carries
/// integer milliseconds; the site's precision is whole seconds.
fn timestamp_to_datetime(raw: &str) -> Option<DateTime<Local>> {
    let millis: i64 = raw.trim().parse().ok()?;
    DateTime::from_timestamp(millis / 1000, 0).map(|utc| utc.with_timezone(&Local))
}
