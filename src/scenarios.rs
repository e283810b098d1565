//! The eight end-to-end scenarios for the selenium.dev documentation site.
//!
//! Each scenario is an independent unit run against a fresh session by the
//! [`crate::harness`] runner. Bodies fail fast on the first failed assertion
//! or driver error; the runner owns setup and teardown.
//!
//! The URL oracles are literal. The search-result URL in particular points
//! at a live third-party site and is brittle by nature; it stays a strict
//! equality on purpose.

// ============================================================================
// Imports
// ============================================================================

use futures_util::future::BoxFuture;

use crate::error::{Error, Result};
use crate::harness::{Scenario, check};
use crate::session::{By, Key, Session};
use crate::wait;

// ============================================================================
// Constants
// ============================================================================

/// Homepage of the site under test.
pub const HOMEPAGE_URL: &str = "https://www.selenium.dev/";

/// Documentation landing page.
pub const DOCUMENTATION_URL: &str = "https://www.selenium.dev/documentation/";

/// Canonical URL of the first search hit for "Locators".
///
/// Scenarios 6 and 7 must land on this identical URL; any divergence between
/// them is a regression.
const SEARCH_RESULT_URL: &str =
    "https://www.selenium.dev/documentation/webdriver/elements/locators/";

/// Expected prefix of the "Edit this page" target.
const GITHUB_PREFIX: &str = "https://github.com/";

/// Query typed into the documentation search box.
const SEARCH_QUERY: &str = "Locators";

// ============================================================================
// Suite
// ============================================================================

/// Returns the full suite in its canonical order.
///
/// Ordering is cosmetic: scenarios share nothing, and reordering them must
/// not change any verdict.
#[must_use]
pub fn all() -> Vec<Scenario> {
    vec![
        Scenario::new("homepage_url", homepage_url),
        Scenario::new("homepage_title", homepage_title),
        Scenario::new("documentation_link", documentation_link),
        Scenario::new("search_popup_opens", search_popup_opens),
        Scenario::new("search_shows_results", search_shows_results),
        Scenario::new("search_result_click", search_result_click),
        Scenario::new("search_submit_enter", search_submit_enter),
        Scenario::new("edit_page_new_tab", edit_page_new_tab),
    ]
}

// ============================================================================
// Scenarios - Navigation
// ============================================================================

/// Navigating to the homepage lands on exactly the homepage URL.
fn homepage_url(session: &Session) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        session.goto(HOMEPAGE_URL).await?;
        let url = session.current_url().await?;
        check::eq("current url", HOMEPAGE_URL, url.as_str())
    })
}

/// The homepage title is exactly "Selenium".
fn homepage_title(session: &Session) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        session.goto(HOMEPAGE_URL).await?;
        let title = session.title().await?;
        check::eq("page title", "Selenium", title.as_str())
    })
}

/// Clicking "Documentation" from the homepage navigates to the docs URL.
fn documentation_link(session: &Session) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        session.goto(HOMEPAGE_URL).await?;
        session.find(By::link_text("Documentation")).await?.click().await?;
        let url = session.current_url().await?;
        check::eq("current url", DOCUMENTATION_URL, url.as_str())
    })
}

// ============================================================================
// Scenarios - Search
// ============================================================================

/// Clicking the search button opens the search popup.
///
/// The modal must be absent before the click and present and visible after.
fn search_popup_opens(session: &Session) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        session.goto(DOCUMENTATION_URL).await?;
        check::absent(session, By::class("DocSearch-Modal")).await?;

        session
            .find(By::class("DocSearch-Button-Placeholder"))
            .await?
            .click()
            .await?;

        let modal = wait::settle_on_displayed(session, &By::class("DocSearch-Modal")).await?;
        check::that("search modal is displayed", modal.is_some())
    })
}

/// Typing a query into the search box produces a results dropdown.
fn search_shows_results(session: &Session) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        session.goto(DOCUMENTATION_URL).await?;
        session
            .find(By::class("DocSearch-Button-Container"))
            .await?
            .click()
            .await?;
        check::absent(session, By::class("DocSearch-Dropdown-Container")).await?;

        session
            .find(By::id("docsearch-input"))
            .await?
            .type_text(SEARCH_QUERY)
            .await?;

        // The remote index needs time to answer; poll instead of sleeping.
        let dropdown =
            wait::settle_on_displayed(session, &By::class("DocSearch-Dropdown-Container")).await?;
        check::that("search dropdown is displayed", dropdown.is_some())
    })
}

/// Clicking the first search hit navigates to its page.
fn search_result_click(session: &Session) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        session.goto(DOCUMENTATION_URL).await?;
        session
            .find(By::class("DocSearch-Button-Container"))
            .await?
            .click()
            .await?;
        session
            .find(By::id("docsearch-input"))
            .await?
            .type_text(SEARCH_QUERY)
            .await?;

        let hit_icon = By::class("DocSearch-Hit-Select-Icon");
        let icon = match wait::settle_on_displayed(session, &hit_icon).await? {
            Some(element) => element,
            // Results never arrived; a plain find surfaces the real error.
            None => session.find(hit_icon).await?,
        };
        icon.click().await?;

        let url = wait::settle_on_url(session, SEARCH_RESULT_URL).await?;
        check::eq("current url", SEARCH_RESULT_URL, url.as_str())
    })
}

/// Pressing Enter after typing navigates to the first hit's page.
///
/// Must land on the identical URL as [`search_result_click`].
fn search_submit_enter(session: &Session) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        session.goto(DOCUMENTATION_URL).await?;
        session
            .find(By::class("DocSearch-Button-Container"))
            .await?
            .click()
            .await?;

        let input = session.find(By::id("docsearch-input")).await?;
        input.type_text(SEARCH_QUERY).await?;

        // Enter selects the first hit, so the hits must exist before we send it.
        wait::settle_on_displayed(session, &By::class("DocSearch-Dropdown-Container")).await?;
        input.press(Key::Enter).await?;

        let url = wait::settle_on_url(session, SEARCH_RESULT_URL).await?;
        check::eq("current url", SEARCH_RESULT_URL, url.as_str())
    })
}

// ============================================================================
// Scenarios - Windows
// ============================================================================

/// "Edit this page" opens a new tab pointed at GitHub.
///
/// The driver reports handles in creation order, but the new tab is
/// identified by set difference against the pre-click handles rather than
/// by index, and the post-click count is polled rather than read once.
fn edit_page_new_tab(session: &Session) -> BoxFuture<'_, Result<()>> {
    Box::pin(async move {
        session.maximize().await?;
        session.goto(DOCUMENTATION_URL).await?;

        let before = session.window_handles().await?;
        check::eq("window count before click", 1usize, before.len())?;

        session
            .find(By::partial_link_text("Edit this page"))
            .await?
            .click()
            .await?;

        let after = wait::settle_on_window_count(session, 2).await?;
        check::eq("window count after click", 2usize, after.len())?;

        let new_handle = after
            .iter()
            .find(|&handle| !before.contains(handle))
            .ok_or_else(|| Error::assertion("a new window handle", "present", "absent"))?;

        session.switch_to_window(new_handle).await?;
        let url = session.current_url().await?;
        check::starts_with("new tab url", GITHUB_PREFIX, &url)
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    #[test]
    fn test_suite_has_eight_scenarios() {
        assert_eq!(all().len(), 8);
    }

    #[test]
    fn test_scenario_names_are_unique() {
        let names: HashSet<_> = all().iter().map(Scenario::name).collect();
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn test_search_result_url_is_under_documentation() {
        assert!(SEARCH_RESULT_URL.starts_with(DOCUMENTATION_URL));
    }
}
