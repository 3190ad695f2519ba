//! The article record and its derived analytics fields.
//!
//! [`ArticleRecord`] is the output unit of the pipeline: one per article that
//! survived the recency filter. Derived fields (search phrase count, money
//! flag, image file name) are computed once at construction and never
//! mutated afterwards.

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;

/// Currency mentions: `$1,200.50` or `50 dollars` / `3 USD`.
static MONEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\$[\d,.]+|\d+\s*(dollars|usd)").expect("money pattern compiles"));

/// One extracted article, ready for the report writer.
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    pub title: String,
    pub description: String,
    pub published_at: DateTime<Local>,
    /// Absolute image URL; empty when the article carries no image. Articles
    /// without an image are still included; the download is a side effect,
    /// not a filter.
    pub image_url: String,
    /// Derived from `image_url`; see [`image_file_name`].
    pub image_file_name: String,
    /// Case-insensitive occurrences of the search phrase in title + description.
    pub search_phrase_count: usize,
    pub contains_money: bool,
}

impl ArticleRecord {
    /// Build a record, computing the derived analytics fields from the
    /// extracted text and the search phrase.
    pub fn new(
        title: String,
        description: String,
        published_at: DateTime<Local>,
        image_url: String,
        search_phrase: &str,
    ) -> Self {
        let combined = format!("{} {}", title, description).to_lowercase();
        let search_phrase_count = phrase_count(&combined, search_phrase);
        let contains_money = MONEY_RE.is_match(&combined);
        let image_file_name = image_file_name(&image_url);

        ArticleRecord {
            title,
            description,
            published_at,
            image_url,
            image_file_name,
            search_phrase_count,
            contains_money,
        }
    }

    /// Publish date in the report's `DD-MM-YYYY` format.
    pub fn date_string(&self) -> String {
        self.published_at.format("%d-%m-%Y").to_string()
    }
}

/// Non-overlapping occurrence count of `phrase` in `text_lower` (already
/// lower-cased by the caller).
fn phrase_count(text_lower: &str, phrase: &str) -> usize {
    let phrase = phrase.to_lowercase();
    if phrase.is_empty() {
        return 0;
    }
    text_lower.matches(phrase.as_str()).count()
}

/// File name for a downloaded image: the substring after the last
/// URL-encoded path separator `%2F`, or the full URL when no separator is
/// present.
pub fn image_file_name(url: &str) -> String {
    url.rsplit("%2F").next().unwrap_or(url).to_string()
}
