//! Error types for the end-to-end suite.
//!
//! This module defines the error taxonomy shared by the session factory, the
//! page facade, and the scenario runner.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use selenium_dev_e2e::{Result, By};
//!
//! async fn example(session: &Session) -> Result<()> {
//!     let link = session.find(By::link_text("Documentation")).await?;
//!     link.click().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Environment | [`Error::Environment`] — driver cannot be launched, fatal for the run |
//! | Navigation | [`Error::Navigation`], [`Error::Timeout`] |
//! | Element | [`Error::ElementNotFound`], [`Error::ElementNotInteractable`] |
//! | Window | [`Error::NoSuchWindow`] |
//! | Wire | [`Error::Wire`], [`Error::Http`], [`Error::Json`] |
//! | Assertion | [`Error::Assertion`] — structured expected/actual pair |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for the per-scenario report.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Environment Errors
    // ========================================================================
    /// The driver endpoint could not be brought up.
    ///
    /// Returned when the chromedriver binary is missing, the chosen port is
    /// already in use, or the endpoint never reports ready. Fatal for the
    /// run: no scenario can acquire a session.
    #[error("Environment error: {message}")]
    Environment {
        /// Description of the environment failure.
        message: String,
    },

    // ========================================================================
    // Navigation Errors
    // ========================================================================
    /// Page navigation failed.
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// The URL that was being loaded.
        url: String,
        /// Description reported by the driver.
        message: String,
    },

    /// A driver call exceeded its per-call timeout.
    #[error("Timeout after {timeout_ms}ms: {operation}")]
    Timeout {
        /// Description of the operation that timed out.
        operation: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // Element Errors
    // ========================================================================
    /// No element matched the locator at call time.
    ///
    /// Expected-present finders fail the scenario on this; the absence
    /// assertion treats it as the success signal.
    #[error("Element not found: {locator}")]
    ElementNotFound {
        /// Locator description.
        locator: String,
    },

    /// The element exists but cannot receive the interaction.
    #[error("Element not interactable: {locator}")]
    ElementNotInteractable {
        /// Locator description.
        locator: String,
    },

    // ========================================================================
    // Window Errors
    // ========================================================================
    /// The window handle is not (or no longer) valid.
    #[error("No such window: {handle}")]
    NoSuchWindow {
        /// The offending window handle.
        handle: String,
    },

    // ========================================================================
    // Wire Errors
    // ========================================================================
    /// Protocol violation or an error code the taxonomy does not map.
    #[error("Wire error: {message}")]
    Wire {
        /// Error string from the driver, or a decode failure description.
        message: String,
    },

    // ========================================================================
    // Assertion Errors
    // ========================================================================
    /// A scenario assertion did not hold.
    #[error("Assertion failed: {label} (expected: {expected}, actual: {actual})")]
    Assertion {
        /// Human-readable label of the assertion.
        label: String,
        /// Expected value.
        expected: String,
        /// Actual value.
        actual: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an environment error.
    #[inline]
    pub fn environment(message: impl Into<String>) -> Self {
        Self::Environment {
            message: message.into(),
        }
    }

    /// Creates a navigation error.
    #[inline]
    pub fn navigation(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a timeout error.
    #[inline]
    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }

    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(locator: impl Into<String>) -> Self {
        Self::ElementNotFound {
            locator: locator.into(),
        }
    }

    /// Creates an element not interactable error.
    #[inline]
    pub fn element_not_interactable(locator: impl Into<String>) -> Self {
        Self::ElementNotInteractable {
            locator: locator.into(),
        }
    }

    /// Creates a no-such-window error.
    #[inline]
    pub fn no_such_window(handle: impl Into<String>) -> Self {
        Self::NoSuchWindow {
            handle: handle.into(),
        }
    }

    /// Creates a wire error.
    #[inline]
    pub fn wire(message: impl Into<String>) -> Self {
        Self::Wire {
            message: message.into(),
        }
    }

    /// Creates an assertion error with an expected/actual pair.
    #[inline]
    pub fn assertion(
        label: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::Assertion {
            label: label.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if this is a failed assertion.
    ///
    /// Assertion failures classify a scenario as failed; everything else
    /// classifies it as errored.
    #[inline]
    #[must_use]
    pub fn is_assertion(&self) -> bool {
        matches!(self, Self::Assertion { .. })
    }

    /// Returns `true` if this error means the run cannot continue.
    #[inline]
    #[must_use]
    pub fn is_environment(&self) -> bool {
        matches!(self, Self::Environment { .. })
    }

    /// Returns `true` if this is an element error.
    #[inline]
    #[must_use]
    pub fn is_element_error(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::ElementNotInteractable { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::environment("chromedriver not found on PATH");
        assert_eq!(
            err.to_string(),
            "Environment error: chromedriver not found on PATH"
        );
    }

    #[test]
    fn test_assertion_display_carries_pair() {
        let err = Error::assertion("page title", "Selenium", "WebDriver");
        assert_eq!(
            err.to_string(),
            "Assertion failed: page title (expected: Selenium, actual: WebDriver)"
        );
    }

    #[test]
    fn test_is_timeout() {
        let timeout_err = Error::timeout("navigate", 30_000);
        let other_err = Error::wire("test");

        assert!(timeout_err.is_timeout());
        assert!(!other_err.is_timeout());
    }

    #[test]
    fn test_is_assertion() {
        assert!(Error::assertion("x", "1", "2").is_assertion());
        assert!(!Error::element_not_found("class .DocSearch-Modal").is_assertion());
    }

    #[test]
    fn test_is_element_error() {
        assert!(Error::element_not_found("id docsearch-input").is_element_error());
        assert!(Error::element_not_interactable("id docsearch-input").is_element_error());
        assert!(!Error::no_such_window("w-2").is_element_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
