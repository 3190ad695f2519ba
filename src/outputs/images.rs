//! Best-effort download of article images.
//!
//! Each record's image lands in the output directory under its derived file
//! name. Failures are logged and skipped; a dead image URL never costs the
//! report a row.

use crate::error::Result;
use crate::models::ArticleRecord;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Download every record's image into `dir`, sequentially. Returns the
/// number of files written.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub async fn download_all(client: &Client, records: &[ArticleRecord], dir: &Path) -> usize {
    let downloaded = stream::iter(records)
        .then(|record| async move {
            if record.image_url.is_empty() {
                debug!(title = %record.title, "Article has no image");
                return false;
            }
            let target = dir.join(&record.image_file_name);
            match download_one(client, &record.image_url, &target).await {
                Ok(bytes) => {
                    debug!(file = %record.image_file_name, bytes, "Downloaded image");
                    true
                }
                Err(error) => {
                    warn!(url = %record.image_url, %error, "Image download failed; skipping");
                    false
                }
            }
        })
        .filter(|written| std::future::ready(*written))
        .count()
        .await;

    info!(downloaded, total = records.len(), "Image downloads complete");
    downloaded
}

async fn download_one(client: &Client, url: &str, target: &Path) -> Result<usize> {
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    tokio::fs::write(target, &bytes).await?;
    Ok(bytes.len())
}
