//! End-to-end WebDriver test suite for the selenium.dev documentation site.
//!
//! This crate drives a real Chrome browser through a W3C WebDriver endpoint
//! (chromedriver) and asserts observable behaviors of
//! <https://www.selenium.dev>: navigation, click targets, the documentation
//! search popup, search-result routing, and external-link tab opening.
//!
//! # Architecture
//!
//! The harness is a client of the driver's HTTP endpoint:
//!
//! - **Session factory**: one chromedriver process, one isolated temporary
//!   profile, one browser session per scenario; the session is closed on
//!   every path.
//! - **Page facade**: thin, typed operations over the driver — navigate,
//!   locate, click, type, read URL/title, list and switch windows.
//! - **Scenario runner**: eight independent scenarios, run sequentially,
//!   each classified as passed, failed (assertion), or errored
//!   (infrastructure).
//!
//! # Quick Start
//!
//! ```no_run
//! use selenium_dev_e2e::{ChromeOptions, Driver, harness, scenarios};
//!
//! #[tokio::main]
//! async fn main() -> selenium_dev_e2e::Result<()> {
//!     let driver = Driver::builder()
//!         .options(ChromeOptions::new().with_headless())
//!         .build()?;
//!
//!     let report = harness::run_suite(&driver, &scenarios::all()).await;
//!     println!("{}", report.summary());
//!     std::process::exit(report.exit_code());
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`driver`] | Session factory and configuration |
//! | [`session`] | Session handle, [`Element`], locators, keys |
//! | [`wait`] | Fixed delay and bounded condition polling |
//! | [`harness`] | Scenario runner, assertions, reporting |
//! | [`scenarios`] | The eight end-to-end scenarios |
//! | [`error`] | Error taxonomy and [`Result`] alias |
//! | [`wire`] | W3C HTTP wire layer (internal) |

// ============================================================================
// Modules
// ============================================================================

/// Driver session factory and configuration.
///
/// Use [`Driver::builder()`] to create a configured factory.
pub mod driver;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Scenario runner, assertion vocabulary, and suite reporting.
pub mod harness;

/// Type-safe identifiers for driver entities.
pub mod identifiers;

/// The eight end-to-end scenarios.
pub mod scenarios;

/// Browser session and page interaction facade.
pub mod session;

/// Waiting utilities for asynchronous UI settling.
pub mod wait;

/// W3C WebDriver wire layer.
///
/// Internal module pairing the command table with the HTTP execution path.
pub mod wire;

// ============================================================================
// Re-exports
// ============================================================================

// Driver types
pub use driver::{ChromeOptions, Driver, DriverBuilder, Timeouts};

// Session types
pub use session::{By, Element, Key, Session};

// Harness types
pub use harness::{Outcome, Scenario, ScenarioStatus, SuiteReport};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{ElementId, SessionId, WindowHandle};
