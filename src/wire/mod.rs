//! W3C WebDriver wire layer.
//!
//! Internal module pairing the command table with the HTTP execution path.
//! The page facade in [`crate::session`] is the public surface; nothing here
//! retries, polls, or reorders — one call, one command, one response.

// ============================================================================
// Submodules
// ============================================================================

/// Command table: method, route, body per W3C command.
pub mod command;

/// HTTP client and W3C envelope decoding.
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::WireClient;
pub use command::Command;
