//! Driver session factory and configuration.
//!
//! Use [`Driver::builder()`] to configure how sessions are created: spawn a
//! chromedriver per session (default) or attach to a running endpoint.

// ============================================================================
// Submodules
// ============================================================================

/// Builder pattern for driver configuration.
pub mod builder;

/// Driver factory core.
pub mod core;

/// Chrome configuration and per-call timeouts.
pub mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::DriverBuilder;
pub use core::{Driver, Endpoint};
pub use options::{ChromeOptions, DISABLE_SEARCH_ENGINE_CHOICE, Timeouts};
