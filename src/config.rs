//! Run parameters: where they come from and what the pipeline sees.
//!
//! Parameters arrive either as a work-item payload (when launched by an
//! orchestrator) or as a static config file. Both are JSON with the same
//! fields; they differ only in defaults. The source is resolved exactly once
//! into an immutable [`RunConfig`] before the session opens; the pipeline
//! never branches on where its parameters came from.

use crate::error::{Result, ScrapeError};
use chrono::{DateTime, Duration, Local};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the run parameters come from.
#[derive(Debug, Clone)]
pub enum ParameterSource {
    /// Dynamic payload handed over by an orchestrator.
    WorkItem(PathBuf),
    /// Static config file checked into the robot's workspace.
    ConfigFile(PathBuf),
}

/// Page cap applied when a work-item payload omits `max_pages`. A static
/// config file must spell it out.
const DEFAULT_WORK_ITEM_MAX_PAGES: usize = 5;

/// Raw JSON payload shared by both parameter sources.
#[derive(Debug, Deserialize)]
struct RawParams {
    search_phrase: Option<String>,
    #[serde(default)]
    category: String,
    #[serde(default)]
    months: u32,
    max_pages: Option<usize>,
}

/// Immutable configuration for a single run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub search_phrase: String,
    /// Empty string means no category filter.
    pub category: String,
    pub max_pages: usize,
    /// Earliest publish date still eligible for inclusion.
    pub cutoff: DateTime<Local>,
}

impl RunConfig {
    pub fn resolve(source: &ParameterSource) -> Result<Self> {
        let path = match source {
            ParameterSource::WorkItem(path) | ParameterSource::ConfigFile(path) => path,
        };
        let raw = load_params(path)?;

        let search_phrase = raw
            .search_phrase
            .as_deref()
            .map(str::trim)
            .filter(|phrase| !phrase.is_empty())
            .ok_or_else(|| ScrapeError::Config("`search_phrase` is required".into()))?
            .to_string();

        let max_pages = match (source, raw.max_pages) {
            (_, Some(0)) => {
                return Err(ScrapeError::Config("`max_pages` must be at least 1".into()));
            }
            (_, Some(pages)) => pages,
            (ParameterSource::WorkItem(_), None) => DEFAULT_WORK_ITEM_MAX_PAGES,
            (ParameterSource::ConfigFile(path), None) => {
                return Err(ScrapeError::Config(format!(
                    "`max_pages` is required in {}",
                    path.display()
                )));
            }
        };

        let cutoff = cutoff_date(Local::now(), raw.months);
        info!(
            phrase = %search_phrase,
            category = %raw.category,
            months = raw.months,
            max_pages,
            cutoff = %cutoff,
            "Run configuration resolved"
        );

        Ok(RunConfig {
            search_phrase,
            category: raw.category.trim().to_string(),
            max_pages,
            cutoff,
        })
    }
}

fn load_params(path: &Path) -> Result<RawParams> {
    let body = std::fs::read_to_string(path)
        .map_err(|e| ScrapeError::Config(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&body)
        .map_err(|e| ScrapeError::Config(format!("invalid JSON in {}: {e}", path.display())))
}

/// Earliest publish date still eligible: one 30-day window per configured
/// month, with `months == 0` meaning a single 30-day window.
pub fn cutoff_date(now: DateTime<Local>, months: u32) -> DateTime<Local> {
    now - Duration::days(30 * i64::from(months.max(1)))
}
