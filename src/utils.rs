//! File system helpers.

use std::fs as stdfs;
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path).await?;
    // Small sync write; simpler error surface than the async file API.
    let probe = path.join("..__probe_write__");
    stdfs::File::create(&probe)?;
    let _ = stdfs::remove_file(&probe);
    info!("Output directory is writable");
    Ok(())
}
