//! Search session flow: open the site, submit the phrase, apply the filter.
//!
//! Composes the [`Driver`] primitives into the steps a reporter would take
//! by hand: open the search box, type the phrase, submit, and tick the
//! category checkbox when one is configured. Everything downstream of the
//! submitted search (waiting for results, extraction, pagination) belongs to
//! the pagination controller.

use crate::driver::Driver;
use crate::error::Result;
use crate::selectors as sel;
use std::time::Duration;
use tracing::{info, instrument, warn};

const UI_TIMEOUT: Duration = Duration::from_secs(15);

/// Navigate to the site and submit the search, leaving the driver on the
/// first results page.
#[instrument(level = "info", skip(driver))]
pub async fn run_search<D: Driver>(
    driver: &mut D,
    base_url: &str,
    phrase: &str,
    category: &str,
) -> Result<()> {
    driver.navigate(base_url).await?;

    driver.wait_visible(sel::SEARCH_BUTTON, UI_TIMEOUT).await?;
    driver.click(sel::SEARCH_BUTTON).await?;

    driver.wait_enabled(sel::SEARCH_INPUT, UI_TIMEOUT).await?;
    driver.input_text(sel::SEARCH_INPUT, phrase).await?;

    driver.wait_visible(sel::SEARCH_SUBMIT, UI_TIMEOUT).await?;
    driver.click(sel::SEARCH_SUBMIT).await?;
    info!(phrase, "Submitted search");

    if !category.is_empty() {
        apply_category(driver, category).await?;
    }
    Ok(())
}

/// Tick the filter checkbox whose label matches `category`. The label set is
/// scanned by index; the checkbox itself is the label's inner input.
async fn apply_category<D: Driver>(driver: &mut D, category: &str) -> Result<()> {
    driver.wait_visible(sel::FILTER_LABEL, UI_TIMEOUT).await?;
    let labels = driver.count(sel::FILTER_LABEL).await?;

    for index in 0..labels {
        let label = driver.text(sel::FILTER_LABEL, index, sel::FILTER_LABEL_TEXT).await?;
        if label.as_deref().map(str::trim) == Some(category) {
            driver.click_nth(sel::FILTER_LABEL, index, sel::FILTER_CHECKBOX).await?;
            info!(category, "Applied category filter");
            return Ok(());
        }
    }

    warn!(category, "Category filter not offered by the site; continuing unfiltered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::mock::{MockDriver, MockPage};

    fn driver_with_categories(categories: &[&str]) -> MockDriver {
        let mut driver = MockDriver::with_pages(vec![MockPage::default()]);
        driver.categories = categories.iter().map(|c| c.to_string()).collect();
        driver
    }

    #[tokio::test]
    async fn test_search_flow_types_phrase_and_submits() {
        let mut driver = driver_with_categories(&[]);
        run_search(&mut driver, "https://www.latimes.com/", "election", "").await.unwrap();

        assert_eq!(driver.visited, vec!["https://www.latimes.com/".to_string()]);
        assert_eq!(
            driver.inputs,
            vec![(sel::SEARCH_INPUT.to_string(), "election".to_string())]
        );
        assert_eq!(
            driver.clicks,
            vec![sel::SEARCH_BUTTON.to_string(), sel::SEARCH_SUBMIT.to_string()]
        );
    }

    #[tokio::test]
    async fn test_matching_category_is_clicked() {
        let mut driver = driver_with_categories(&["World & Nation", "Politics", "Sports"]);
        run_search(&mut driver, "https://www.latimes.com/", "election", "Politics")
            .await
            .unwrap();

        assert_eq!(driver.clicks.last().map(String::as_str), Some(sel::FILTER_LABEL));
    }

    #[tokio::test]
    async fn test_unknown_category_continues_unfiltered() {
        let mut driver = driver_with_categories(&["Sports"]);
        run_search(&mut driver, "https://www.latimes.com/", "election", "Opinion")
            .await
            .unwrap();

        // Search still submitted; no filter click recorded.
        assert!(!driver.clicks.contains(&sel::FILTER_LABEL.to_string()));
    }
}
