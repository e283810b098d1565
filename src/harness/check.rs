//! Assertion vocabulary for scenarios.
//!
//! Each assertion produces [`Error::Assertion`] with a human-readable label
//! and the expected/actual pair, which the runner surfaces verbatim in the
//! per-scenario report.
//!
//! # Example
//!
//! ```ignore
//! use selenium_dev_e2e::harness::check;
//!
//! check::eq("current url", HOMEPAGE_URL, session.current_url().await?.as_str())?;
//! check::that("search modal is displayed", modal.is_displayed().await?)?;
//! check::absent(&session, By::class("DocSearch-Modal")).await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt::Display;

use crate::error::{Error, Result};
use crate::session::{By, Session};

// ============================================================================
// Value Assertions
// ============================================================================

/// Asserts that two values are equal.
///
/// # Errors
///
/// Returns [`Error::Assertion`] carrying the expected/actual pair when the
/// values differ.
pub fn eq<T>(label: &str, expected: T, actual: T) -> Result<()>
where
    T: PartialEq + Display,
{
    if expected == actual {
        Ok(())
    } else {
        Err(Error::assertion(
            label,
            expected.to_string(),
            actual.to_string(),
        ))
    }
}

/// Asserts that a condition holds.
///
/// # Errors
///
/// Returns [`Error::Assertion`] when the condition is false.
pub fn that(label: &str, condition: bool) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::assertion(label, "true", "false"))
    }
}

/// Asserts that a string starts with the given prefix.
///
/// # Errors
///
/// Returns [`Error::Assertion`] carrying the prefix and the full actual
/// string when it does not.
pub fn starts_with(label: &str, prefix: &str, actual: &str) -> Result<()> {
    if actual.starts_with(prefix) {
        Ok(())
    } else {
        Err(Error::assertion(label, format!("{prefix}…"), actual))
    }
}

// ============================================================================
// Absence Assertion
// ============================================================================

/// Asserts that no element matches the locator right now.
///
/// A lookup failing with `ElementNotFound` is the success signal. A
/// successful lookup fails the assertion; any *other* lookup error
/// propagates unchanged, so unrelated failures are not masked as absence.
///
/// # Errors
///
/// Returns [`Error::Assertion`] if an element matches, or the original
/// error for non-lookup failures.
pub async fn absent(session: &Session, by: By) -> Result<()> {
    let label = format!("no element matches {by}");
    match session.find(by).await {
        Err(Error::ElementNotFound { .. }) => Ok(()),
        Ok(_) => Err(Error::assertion(label, "absent", "present")),
        Err(other) => Err(other),
    }
}

// ============================================================================
// Tests
// ============================================================================
