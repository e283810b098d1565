//! Chrome configuration and per-call timeouts.
//!
//! All browser configuration lives in one [`ChromeOptions`] value handed to
//! the factory; nothing is read from ambient process state.
//!
//! # Example
//!
//! ```ignore
//! use selenium_dev_e2e::ChromeOptions;
//!
//! let options = ChromeOptions::new()
//!     .with_headless()
//!     .with_window_size(1920, 1080);
//!
//! let args = options.to_args();
//! // ["--disable-search-engine-choice-screen", "--headless=new", "--window-size=1920,1080"]
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::Path;
use std::time::Duration;

use serde_json::{Value, json};

// ============================================================================
// Constants
// ============================================================================

/// Suppresses the first-run search-engine-choice interstitial.
///
/// Without this, a modal dialog blocks every automated interaction on a
/// fresh profile.
pub const DISABLE_SEARCH_ENGINE_CHOICE: &str = "--disable-search-engine-choice-screen";

// ============================================================================
// ChromeOptions
// ============================================================================

/// Chrome process configuration.
///
/// The interstitial-suppression argument is always present; everything else
/// is opt-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChromeOptions {
    /// Run Chrome without a GUI (`--headless=new`).
    pub headless: bool,

    /// Window dimensions in pixels (width, height).
    pub window_size: Option<(u32, u32)>,

    /// Additional custom command-line arguments.
    pub extra_args: Vec<String>,
}

// ============================================================================
// Constructors
// ============================================================================

impl ChromeOptions {
    /// Creates a new options instance with default settings.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            headless: false,
            window_size: None,
            extra_args: Vec::new(),
        }
    }

    /// Creates options configured for headless mode.
    #[inline]
    #[must_use]
    pub fn headless() -> Self {
        Self {
            headless: true,
            ..Default::default()
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl ChromeOptions {
    /// Enables headless mode.
    #[inline]
    #[must_use]
    pub fn with_headless(mut self) -> Self {
        self.headless = true;
        self
    }

    /// Sets window size in pixels.
    #[inline]
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = Some((width, height));
        self
    }

    /// Adds a custom command-line argument.
    #[inline]
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Adds multiple custom command-line arguments.
    #[inline]
    #[must_use]
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }
}

// ============================================================================
// Conversion Methods
// ============================================================================

impl ChromeOptions {
    /// Converts options to Chrome command-line arguments.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(4 + self.extra_args.len());

        args.push(DISABLE_SEARCH_ENGINE_CHOICE.to_string());

        if self.headless {
            args.push("--headless=new".to_string());
        }

        if let Some((width, height)) = self.window_size {
            args.push(format!("--window-size={width},{height}"));
        }

        args.extend(self.extra_args.clone());
        args
    }

    /// Builds the W3C capabilities object for a new session.
    ///
    /// The profile directory, when given, becomes Chrome's `--user-data-dir`
    /// so each session runs against an isolated temporary profile.
    #[must_use]
    pub fn to_capabilities(&self, profile_dir: Option<&Path>) -> Value {
        let mut args = self.to_args();
        if let Some(dir) = profile_dir {
            args.push(format!("--user-data-dir={}", dir.display()));
        }

        json!({
            "alwaysMatch": {
                "browserName": "chrome",
                "goog:chromeOptions": { "args": args },
            }
        })
    }

    /// Validates the options configuration.
    ///
    /// # Errors
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if let Some((width, height)) = self.window_size
            && (width == 0 || height == 0)
        {
            return Err("Window dimensions must be greater than zero".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// Timeouts
// ============================================================================

/// Per-call timeout ceilings for driver commands.
///
/// Every wire call carries one of these; scenario teardown still runs after
/// a timed-out call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeouts {
    /// Page navigation ceiling.
    pub navigation: Duration,

    /// Element lookup ceiling.
    pub find: Duration,

    /// Everything else: clicks, keys, window operations, reads.
    pub control: Duration,

    /// How long to wait for a freshly spawned endpoint to report ready.
    pub ready: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            navigation: Duration::from_secs(30),
            find: Duration::from_secs(10),
            control: Duration::from_secs(10),
            ready: Duration::from_secs(15),
        }
    }
}

impl Timeouts {
    /// Sets the navigation ceiling.
    #[inline]
    #[must_use]
    pub fn with_navigation(mut self, ceiling: Duration) -> Self {
        self.navigation = ceiling;
        self
    }

    /// Sets the element lookup ceiling.
    #[inline]
    #[must_use]
    pub fn with_find(mut self, ceiling: Duration) -> Self {
        self.find = ceiling;
        self
    }

    /// Sets the control-command ceiling.
    #[inline]
    #[must_use]
    pub fn with_control(mut self, ceiling: Duration) -> Self {
        self.control = ceiling;
        self
    }

    /// Sets the endpoint-ready ceiling.
    #[inline]
    #[must_use]
    pub fn with_ready(mut self, ceiling: Duration) -> Self {
        self.ready = ceiling;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
