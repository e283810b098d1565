//! Builder pattern for driver configuration.
//!
//! Provides a fluent API for configuring and creating [`Driver`] instances.
//!
//! # Example
//!
//! ```no_run
//! use selenium_dev_e2e::{ChromeOptions, Driver};
//!
//! # fn example() -> selenium_dev_e2e::Result<()> {
//! let driver = Driver::builder()
//!     .options(ChromeOptions::new().with_headless())
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;

use crate::error::{Error, Result};

use super::core::{Driver, Endpoint};
use super::options::{ChromeOptions, Timeouts};

// ============================================================================
// DriverBuilder
// ============================================================================

/// Builder for configuring a [`Driver`] instance.
///
/// By default the driver discovers `chromedriver` on `PATH` and spawns one
/// process per session. Use [`DriverBuilder::server_url`] to attach to an
/// endpoint that is already running instead.
#[derive(Debug, Default, Clone)]
pub struct DriverBuilder {
    /// Explicit chromedriver binary path.
    binary: Option<PathBuf>,
    /// Existing endpoint to attach to instead of spawning.
    server_url: Option<String>,
    /// Browser configuration.
    options: ChromeOptions,
    /// Per-call timeout ceilings.
    timeouts: Timeouts,
}

// ============================================================================
// DriverBuilder Implementation
// ============================================================================

impl DriverBuilder {
    /// Creates a new driver builder with default configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit path to the chromedriver binary.
    ///
    /// When unset, the factory searches `PATH` at open time.
    #[inline]
    #[must_use]
    pub fn binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.binary = Some(path.into());
        self
    }

    /// Attaches to an already-running W3C endpoint instead of spawning a
    /// chromedriver process per session.
    #[inline]
    #[must_use]
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Sets the browser configuration.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: ChromeOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the per-call timeout ceilings.
    #[inline]
    #[must_use]
    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Builds the driver with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Environment`] if both a binary path and a server URL are
    ///   set, if an explicit binary path does not exist, or if the options
    ///   fail validation.
    pub fn build(self) -> Result<Driver> {
        self.options.validate().map_err(Error::environment)?;

        let endpoint = match (self.binary, self.server_url) {
            (Some(_), Some(_)) => {
                return Err(Error::environment(
                    "binary() and server_url() are mutually exclusive; \
                     attach to a running endpoint or spawn one, not both",
                ));
            }
            (None, Some(url)) => Endpoint::Attached(url),
            (Some(path), None) => {
                if !path.exists() {
                    return Err(Error::environment(format!(
                        "chromedriver not found at: {}",
                        path.display()
                    )));
                }
                Endpoint::Spawn(Some(path))
            }
            (None, None) => Endpoint::Spawn(None),
        };

        Ok(Driver::new(endpoint, self.options, self.timeouts))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_default_builder() {
        let builder = DriverBuilder::new();
        assert!(builder.binary.is_none());
        assert!(builder.server_url.is_none());
    }

    #[test]
    fn test_build_defaults_to_path_discovery() {
        let driver = DriverBuilder::new().build().unwrap();
        assert!(matches!(driver.endpoint(), Endpoint::Spawn(None)));
    }

    #[test]
    fn test_server_url_attaches() {
        let driver = DriverBuilder::new()
            .server_url("http://127.0.0.1:9515")
            .build()
            .unwrap();
        assert!(matches!(driver.endpoint(), Endpoint::Attached(_)));
    }

    #[test]
    fn test_build_fails_with_nonexistent_binary() {
        let result = DriverBuilder::new().binary("/nonexistent/chromedriver").build();
        assert!(result.is_err());
        assert!(result.unwrap_err().is_environment());
    }

    #[test]
    fn test_build_fails_with_binary_and_server_url() {
        let result = DriverBuilder::new()
            .binary("/bin/sh")
            .server_url("http://127.0.0.1:9515")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_fails_on_invalid_options() {
        let result = DriverBuilder::new()
            .options(ChromeOptions::new().with_window_size(0, 0))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_is_clone() {
        let builder = DriverBuilder::new().server_url("http://127.0.0.1:9515");
        let cloned = builder.clone();
        assert_eq!(builder.server_url, cloned.server_url);
    }
}
