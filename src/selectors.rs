//! CSS locator table for the latimes.com search UI.
//!
//! Every locator the pipeline touches lives here so a site markup change is
//! a one-file fix.

pub const SEARCH_BUTTON: &str = "button[data-element='search-button']";
pub const SEARCH_INPUT: &str = "input[data-element='search-form-input']";
pub const SEARCH_SUBMIT: &str = "button[data-element='search-submit-button']";

/// Result promo cards. Only article promos carry this content type; the
/// search page mixes in other promo kinds that must not be extracted.
pub const ARTICLE: &str = "ps-promo[data-content-type='article']";
pub const ARTICLE_TIMESTAMP: &str = "p.promo-timestamp";
pub const ARTICLE_TITLE: &str = "h3.promo-title";
pub const ARTICLE_DESCRIPTION: &str = "p.promo-description";
pub const ARTICLE_IMAGE: &str = "img.image";

/// Millisecond epoch attribute on [`ARTICLE_TIMESTAMP`].
pub const TIMESTAMP_ATTR: &str = "data-timestamp";

/// Topic filter checkboxes: the label text carries the category name, the
/// inner input is the clickable control.
pub const FILTER_LABEL: &str = "div.search-filter label";
pub const FILTER_LABEL_TEXT: &str = "span";
pub const FILTER_CHECKBOX: &str = "input";

pub const NEXT_PAGE: &str = "div.search-results-module-next-page a";
