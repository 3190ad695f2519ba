//! Error types for the scraping pipeline.
//!
//! The taxonomy separates three severities:
//!
//! - **Fatal before the session opens**: [`ScrapeError::Config`].
//! - **Fatal during the run**: [`ScrapeError::ResultsNotLoaded`], when the result
//!   list never became visible, which points at a broken locator or a site
//!   change rather than a genuinely empty result set.
//! - **Recovered locally**: [`ScrapeError::MalformedArticle`] and
//!   [`ScrapeError::MissingField`], when a single article's markup is unusable;
//!   the extractor logs a warning and moves on to the next article.
//!
//! A missing next-page control is not an error at all: the pagination
//! controller treats it as the normal end of results.

use crate::driver::DriverError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Missing or invalid run parameter. Raised before any session opens.
    #[error("configuration error: {0}")]
    Config(String),

    /// The article list never became visible within its wait budget.
    #[error("search results never loaded")]
    ResultsNotLoaded(#[source] DriverError),

    /// An article's timestamp attribute is absent or unparseable.
    #[error("article {index}: malformed timestamp: {reason}")]
    MalformedArticle { index: usize, reason: String },

    /// An article is missing a required text field.
    #[error("article {index}: missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("report serialization error: {0}")]
    Csv(#[from] csv::Error),
}
