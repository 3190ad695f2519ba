//! Web automation driver capability consumed by the scraping pipeline.
//!
//! The pipeline never talks to a page directly; it goes through the
//! [`Driver`] trait, which exposes the handful of primitives the search flow
//! needs: bounded waits, clicks, text input, and indexed reads.
//!
//! # Re-resolution
//!
//! There are deliberately no element handles in this interface. Every read
//! names the element by selector and index and is resolved against the
//! current page on each call, so a DOM mutation between two reads can never
//! leave the caller holding a stale reference. The `inner` parameter scopes
//! a read to a child of the indexed element (`""` means the element itself).

use std::time::Duration;
use thiserror::Error;

mod http;
pub use http::HttpDriver;

#[cfg(test)]
pub mod mock;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("timed out after {timeout:?} waiting for `{selector}`")]
    Timeout { selector: String, timeout: Duration },

    #[error("no element matches `{selector}`")]
    NotFound { selector: String },

    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error("invalid URL `{0}`")]
    InvalidUrl(String),

    #[error("no page loaded")]
    NoPage,

    #[error("navigation failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Capabilities of a driven web session.
pub trait Driver {
    /// Load `url` (absolute, or relative to the session's base).
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError>;

    /// Wait until at least one element matches `selector`. Exceeding the
    /// budget is a [`DriverError::Timeout`].
    async fn wait_visible(&mut self, selector: &str, timeout: Duration)
        -> Result<(), DriverError>;

    /// Wait until the first match of `selector` is interactable.
    async fn wait_enabled(&mut self, selector: &str, timeout: Duration)
        -> Result<(), DriverError>;

    /// Type `text` into the first match of `selector`.
    async fn input_text(&mut self, selector: &str, text: &str) -> Result<(), DriverError>;

    /// Click the first match of `selector`.
    async fn click(&mut self, selector: &str) -> Result<(), DriverError> {
        self.click_nth(selector, 0, "").await
    }

    /// Click `inner` within the `index`-th match of `selector`.
    async fn click_nth(
        &mut self,
        selector: &str,
        index: usize,
        inner: &str,
    ) -> Result<(), DriverError>;

    /// Number of elements currently matching `selector`.
    async fn count(&self, selector: &str) -> Result<usize, DriverError>;

    /// Text content of `inner` within the `index`-th match of `selector`.
    /// `None` when the element or its child is not present.
    async fn text(
        &self,
        selector: &str,
        index: usize,
        inner: &str,
    ) -> Result<Option<String>, DriverError>;

    /// Attribute `name` of `inner` within the `index`-th match of `selector`.
    /// `None` when the element, its child, or the attribute is not present.
    async fn attr(
        &self,
        selector: &str,
        index: usize,
        inner: &str,
        name: &str,
    ) -> Result<Option<String>, DriverError>;

    /// Release the session. Called exactly once, on every exit path.
    async fn close(&mut self) -> Result<(), DriverError>;
}
