//! HTTP-backed driver.
//!
//! Models the slice of browser behavior the search flow actually exercises,
//! on top of `reqwest` and `scraper`:
//!
//! - link clicks follow the `href` and load the target document,
//! - button clicks submit the enclosing form, building the query string from
//!   the text recorded by [`Driver::input_text`],
//! - checkbox clicks re-request the current URL with the checkbox's
//!   name/value appended as a query parameter (how the site encodes its
//!   navigating facet filters),
//! - waits degenerate to presence checks: a fetched document is already
//!   settled, there is nothing to wait for.

use super::{Driver, DriverError};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub struct HttpDriver {
    client: Client,
    base: Url,
    current: Option<Url>,
    page: String,
    /// Text recorded per input selector, consumed at form submission.
    inputs: HashMap<String, String>,
}

/// Navigation effect of a click, resolved before any await so no parsed
/// document is held across a suspension point (`scraper::Html` is not
/// `Send`).
#[derive(Debug)]
enum ClickAction {
    Follow(String),
    Submit { action: String, pairs: Vec<(String, String)> },
    Toggle { name: String, value: String },
    None,
}

fn parse_selector(selector: &str) -> Result<Selector, DriverError> {
    Selector::parse(selector).map_err(|_| DriverError::Selector(selector.to_string()))
}

impl HttpDriver {
    pub fn new(base_url: &str) -> Result<Self, DriverError> {
        let base =
            Url::parse(base_url).map_err(|_| DriverError::InvalidUrl(base_url.to_string()))?;
        let client = Client::builder().build()?;
        Ok(HttpDriver {
            client,
            base,
            current: None,
            page: String::new(),
            inputs: HashMap::new(),
        })
    }

    fn document(&self) -> Result<Html, DriverError> {
        if self.current.is_none() {
            return Err(DriverError::NoPage);
        }
        // Parsed per call rather than cached: `Html` cannot cross an await.
        Ok(Html::parse_document(&self.page))
    }

    /// Resolve the `index`-th match of `selector`, optionally scoped down to
    /// `inner`, and apply `f`. `Ok(None)` when nothing matches.
    fn with_nth<T>(
        &self,
        selector: &str,
        index: usize,
        inner: &str,
        f: impl FnOnce(ElementRef) -> T,
    ) -> Result<Option<T>, DriverError> {
        let document = self.document()?;
        let outer = parse_selector(selector)?;
        let Some(element) = document.select(&outer).nth(index) else {
            return Ok(None);
        };
        if inner.is_empty() {
            return Ok(Some(f(element)));
        }
        let inner = parse_selector(inner)?;
        Ok(element.select(&inner).next().map(f))
    }

    fn click_action(
        &self,
        selector: &str,
        index: usize,
        inner: &str,
    ) -> Result<ClickAction, DriverError> {
        let document = self.document()?;
        let outer = parse_selector(selector)?;
        let mut element = document.select(&outer).nth(index).ok_or_else(|| {
            DriverError::NotFound { selector: selector.to_string() }
        })?;
        if !inner.is_empty() {
            let inner_selector = parse_selector(inner)?;
            element = element.select(&inner_selector).next().ok_or_else(|| {
                DriverError::NotFound { selector: inner.to_string() }
            })?;
        }

        if let Some(href) = element.value().attr("href") {
            return Ok(ClickAction::Follow(href.to_string()));
        }

        if element.value().name() == "input" {
            if let (Some(name), Some(value)) =
                (element.value().attr("name"), element.value().attr("value"))
            {
                return Ok(ClickAction::Toggle {
                    name: name.to_string(),
                    value: value.to_string(),
                });
            }
        }

        // A plain button submits its enclosing form with whatever text was
        // recorded for inputs inside that form.
        for ancestor in element.ancestors() {
            let Some(form) = ElementRef::wrap(ancestor).filter(|e| e.value().name() == "form")
            else {
                continue;
            };
            let action = form.value().attr("action").unwrap_or("").to_string();
            let mut pairs = Vec::new();
            for (input_selector, text) in &self.inputs {
                let Ok(input_selector) = Selector::parse(input_selector) else {
                    continue;
                };
                if let Some(input) = form.select(&input_selector).next() {
                    if let Some(name) = input.value().attr("name") {
                        pairs.push((name.to_string(), text.clone()));
                    }
                }
            }
            return Ok(ClickAction::Submit { action, pairs });
        }

        Ok(ClickAction::None)
    }

    #[cfg(test)]
    fn with_snapshot(base_url: &str, html: &str) -> Self {
        let mut driver = HttpDriver::new(base_url).unwrap();
        driver.current = Some(driver.base.clone());
        driver.page = html.to_string();
        driver
    }
}

impl Driver for HttpDriver {
    async fn navigate(&mut self, url: &str) -> Result<(), DriverError> {
        let target = self
            .base
            .join(url)
            .map_err(|_| DriverError::InvalidUrl(url.to_string()))?;
        debug!(url = %target, "GET");
        let body = self
            .client
            .get(target.clone())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        self.page = body;
        self.current = Some(target);
        Ok(())
    }

    async fn wait_visible(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        if self.count(selector).await? > 0 {
            Ok(())
        } else {
            Err(DriverError::Timeout { selector: selector.to_string(), timeout })
        }
    }

    async fn wait_enabled(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        let enabled = self.with_nth(selector, 0, "", |element| {
            element.value().attr("disabled").is_none()
        })?;
        match enabled {
            Some(true) => Ok(()),
            _ => Err(DriverError::Timeout { selector: selector.to_string(), timeout }),
        }
    }

    async fn input_text(&mut self, selector: &str, text: &str) -> Result<(), DriverError> {
        if self.count(selector).await? == 0 {
            return Err(DriverError::NotFound { selector: selector.to_string() });
        }
        self.inputs.insert(selector.to_string(), text.to_string());
        Ok(())
    }

    async fn click_nth(
        &mut self,
        selector: &str,
        index: usize,
        inner: &str,
    ) -> Result<(), DriverError> {
        match self.click_action(selector, index, inner)? {
            ClickAction::Follow(href) => self.navigate(&href).await,
            ClickAction::Submit { action, pairs } => {
                let mut target = self
                    .base
                    .join(&action)
                    .map_err(|_| DriverError::InvalidUrl(action.clone()))?;
                target.query_pairs_mut().extend_pairs(pairs);
                self.navigate(target.as_str()).await
            }
            ClickAction::Toggle { name, value } => {
                let mut target = self.current.clone().ok_or(DriverError::NoPage)?;
                target.query_pairs_mut().append_pair(&name, &value);
                self.navigate(target.as_str()).await
            }
            ClickAction::None => {
                debug!(selector, "Click had no navigable effect");
                Ok(())
            }
        }
    }

    async fn count(&self, selector: &str) -> Result<usize, DriverError> {
        let document = self.document()?;
        let selector = parse_selector(selector)?;
        Ok(document.select(&selector).count())
    }

    async fn text(
        &self,
        selector: &str,
        index: usize,
        inner: &str,
    ) -> Result<Option<String>, DriverError> {
        self.with_nth(selector, index, inner, |element| {
            element.text().collect::<String>()
        })
    }

    async fn attr(
        &self,
        selector: &str,
        index: usize,
        inner: &str,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        Ok(self
            .with_nth(selector, index, inner, |element| {
                element.value().attr(name).map(str::to_string)
            })?
            .flatten())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        // Nothing to tear down for an HTTP session; this is the release point
        // for implementations that hold a real browser.
        self.current = None;
        self.page.clear();
        self.inputs.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <form action="/search">
            <input data-element="search-form-input" name="q">
            <button data-element="search-submit-button">Go</button>
          </form>
          <label><span>California</span><input type="checkbox" name="f0" value="00000161"></label>
          <ps-promo data-content-type="article">
            <p class="promo-timestamp" data-timestamp="1741003200000"></p>
            <h3 class="promo-title">  First title  </h3>
            <p class="promo-description">First description</p>
            <img class="image" src="https://img.example.com/a%2Fb%2Fpic.jpg">
          </ps-promo>
          <ps-promo data-content-type="article">
            <h3 class="promo-title">Second title</h3>
          </ps-promo>
          <div class="search-results-module-next-page"><a href="/search?q=x&p=2">next</a></div>
        </body></html>
    "#;

    fn driver() -> HttpDriver {
        HttpDriver::with_snapshot("https://www.example.com/", PAGE)
    }

    #[tokio::test]
    async fn test_count_matches_articles() {
        let d = driver();
        assert_eq!(d.count("ps-promo[data-content-type='article']").await.unwrap(), 2);
        assert_eq!(d.count("div.missing").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_text_scoped_by_index() {
        let d = driver();
        let title = d
            .text("ps-promo[data-content-type='article']", 0, "h3.promo-title")
            .await
            .unwrap();
        assert_eq!(title.as_deref().map(str::trim), Some("First title"));
        let missing = d
            .text("ps-promo[data-content-type='article']", 1, "p.promo-description")
            .await
            .unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn test_attr_reads_timestamp() {
        let d = driver();
        let stamp = d
            .attr(
                "ps-promo[data-content-type='article']",
                0,
                "p.promo-timestamp",
                "data-timestamp",
            )
            .await
            .unwrap();
        assert_eq!(stamp.as_deref(), Some("1741003200000"));
    }

    #[tokio::test]
    async fn test_wait_visible_absent_is_timeout() {
        let mut d = driver();
        let err = d
            .wait_visible("div.missing", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DriverError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_no_page_loaded() {
        let d = HttpDriver::new("https://www.example.com/").unwrap();
        let err = d.count("a").await.unwrap_err();
        assert!(matches!(err, DriverError::NoPage));
    }

    #[test]
    fn test_click_action_follows_link() {
        let d = driver();
        let action = d
            .click_action("div.search-results-module-next-page a", 0, "")
            .unwrap();
        assert!(matches!(action, ClickAction::Follow(href) if href == "/search?q=x&p=2"));
    }

    #[tokio::test]
    async fn test_click_action_submits_form_with_recorded_input() {
        let mut d = driver();
        d.input_text("input[data-element='search-form-input']", "election")
            .await
            .unwrap();
        let action = d
            .click_action("button[data-element='search-submit-button']", 0, "")
            .unwrap();
        match action {
            ClickAction::Submit { action, pairs } => {
                assert_eq!(action, "/search");
                assert_eq!(pairs, vec![("q".to_string(), "election".to_string())]);
            }
            _ => panic!("expected form submission"),
        }
    }

    #[test]
    fn test_click_action_checkbox_is_query_toggle() {
        let d = driver();
        let action = d.click_action("label", 0, "input").unwrap();
        match action {
            ClickAction::Toggle { name, value } => {
                assert_eq!(name, "f0");
                assert_eq!(value, "00000161");
            }
            _ => panic!("expected facet toggle"),
        }
    }

    #[test]
    fn test_click_action_missing_element() {
        let d = driver();
        let err = d.click_action("div.missing", 0, "").unwrap_err();
        assert!(matches!(err, DriverError::NotFound { .. }));
    }
}
