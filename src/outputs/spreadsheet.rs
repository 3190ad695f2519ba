//! CSV report serialization.
//!
//! One row per extracted article. The image URL is used upstream to download
//! the file but is deliberately absent from the report; the derived file
//! name ties a row to its image on disk.

use crate::error::Result;
use crate::models::ArticleRecord;
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    title: &'a str,
    description: &'a str,
    date: String,
    image_file_name: &'a str,
    search_phrase_count: usize,
    contains_money: bool,
}

impl<'a> From<&'a ArticleRecord> for ReportRow<'a> {
    fn from(record: &'a ArticleRecord) -> Self {
        ReportRow {
            title: &record.title,
            description: &record.description,
            date: record.date_string(),
            image_file_name: &record.image_file_name,
            search_phrase_count: record.search_phrase_count,
            contains_money: record.contains_money,
        }
    }
}

const COLUMNS: [&str; 6] = [
    "title",
    "description",
    "date",
    "image_file_name",
    "search_phrase_count",
    "contains_money",
];

/// Write the report. An empty record set still produces a file with the
/// header row, so a completed run always leaves evidence behind.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn write_report(records: &[ArticleRecord], path: &Path) -> Result<()> {
    // Header written by hand: `serialize` emits one only alongside the first
    // row, which would leave an empty run with an empty file.
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.serialize(ReportRow::from(record))?;
    }
    writer.flush()?;

    info!(rows = records.len(), "Wrote report");
    Ok(())
}
