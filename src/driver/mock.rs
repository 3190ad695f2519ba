//! Canned-page driver for pipeline tests.
//!
//! Serves a fixed sequence of result pages and records every interaction so
//! tests can assert on the exact flow the pipeline drove.

use super::{Driver, DriverError};
use crate::selectors as sel;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct MockArticle {
    pub timestamp: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl MockArticle {
    pub fn new(timestamp_ms: i64, title: &str, description: &str, image: &str) -> Self {
        MockArticle {
            timestamp: Some(timestamp_ms.to_string()),
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            image: Some(image.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockPage {
    pub articles: Vec<MockArticle>,
    pub has_next: bool,
}

#[derive(Debug, Default)]
pub struct MockDriver {
    pages: Vec<MockPage>,
    current: usize,
    /// Category names offered by the filter widget.
    pub categories: Vec<String>,
    /// Simulates a broken result list: the article elements never appear.
    pub results_never_load: bool,
    pub visited: Vec<String>,
    pub inputs: Vec<(String, String)>,
    pub clicks: Vec<String>,
    pub closed: bool,
}

impl MockDriver {
    pub fn with_pages(pages: Vec<MockPage>) -> Self {
        MockDriver { pages, ..MockDriver::default() }
    }

    pub fn next_page_clicks(&self) -> usize {
        self.clicks.iter().filter(|c| c.as_str() == sel::NEXT_PAGE).count()
    }

    fn page(&self) -> &MockPage {
        &self.pages[self.current.min(self.pages.len().saturating_sub(1))]
    }

    fn article_text(&self, index: usize, inner: &str) -> Option<String> {
        let article = self.page().articles.get(index)?;
        match inner {
            sel::ARTICLE_TITLE => article.title.clone(),
            sel::ARTICLE_DESCRIPTION => article.description.clone(),
            _ => None,
        }
    }

    fn article_attr(&self, index: usize, inner: &str, name: &str) -> Option<String> {
        let article = self.page().articles.get(index)?;
        match (inner, name) {
            (sel::ARTICLE_TIMESTAMP, sel::TIMESTAMP_ATTR) => article.timestamp.clone(),
            (sel::ARTICLE_IMAGE, "src") => article.image.clone(),
            _ => None,
        }
    }
}

impl Driver for MockDriver {
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        self.visited.push(url.to_string());
        Ok(())
    }

    async fn wait_visible(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        if selector == sel::ARTICLE && self.results_never_load {
            return Err(DriverError::Timeout { selector: selector.to_string(), timeout });
        }
        Ok(())
    }

    async fn wait_enabled(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        if selector == sel::NEXT_PAGE && !self.page().has_next {
            return Err(DriverError::Timeout { selector: selector.to_string(), timeout });
        }
        Ok(())
    }

    async fn input_text(&mut self, selector: &str, text: &str) -> Result<(), DriverError> {
        self.inputs.push((selector.to_string(), text.to_string()));
        Ok(())
    }

    async fn click_nth(
        &mut self,
        selector: &str,
        _index: usize,
        _inner: &str,
    ) -> Result<(), DriverError> {
        self.clicks.push(selector.to_string());
        if selector == sel::NEXT_PAGE {
            self.current += 1;
        }
        Ok(())
    }

    async fn count(&self, selector: &str) -> Result<usize, DriverError> {
        match selector {
            sel::ARTICLE => Ok(self.page().articles.len()),
            sel::FILTER_LABEL => Ok(self.categories.len()),
            _ => Ok(1),
        }
    }

    async fn text(
        &self,
        selector: &str,
        index: usize,
        inner: &str,
    ) -> Result<Option<String>, DriverError> {
        match selector {
            sel::ARTICLE => Ok(self.article_text(index, inner)),
            sel::FILTER_LABEL if inner == sel::FILTER_LABEL_TEXT => {
                Ok(self.categories.get(index).cloned())
            }
            _ => Ok(None),
        }
    }

    async fn attr(
        &self,
        selector: &str,
        index: usize,
        inner: &str,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        match selector {
            sel::ARTICLE => Ok(self.article_attr(index, inner, name)),
            _ => Ok(None),
        }
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        self.closed = true;
        Ok(())
    }
}
