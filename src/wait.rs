//! Waiting utilities for asynchronous UI settling.
//!
//! The site under test does remote work (search indexing, new-tab opening)
//! with no driver-visible completion signal, so the harness has to tolerate
//! settling time. Two tools:
//!
//! - [`pause`] — an unconditional fixed sleep. A known flake source: the
//!   right duration depends on the client's connection and the remote
//!   server's response time. Use only where no observable condition exists.
//! - the `settle_on_*` helpers — bounded polling (100 ms interval, 10 s
//!   ceiling) against an observable condition. They return the *last
//!   observation* when the ceiling passes instead of erroring, so the
//!   scenario's own assertion reports the expected/actual pair.
//!
//! Real driver errors propagate from the helpers immediately; only the
//! condition itself is polled.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::error::{Error, Result};
use crate::identifiers::WindowHandle;
use crate::session::{By, Element, Session};

// ============================================================================
// Constants
// ============================================================================

/// Interval between condition probes.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Ceiling on how long a condition is polled before giving up.
pub const SETTLE_CEILING: Duration = Duration::from_secs(10);

// ============================================================================
// Fixed Delay
// ============================================================================

/// Blocks the calling flow for the given wall-clock duration.
///
/// Known flaky: whatever duration is chosen can be too short on a slow
/// connection and wastes time on a fast one. Prefer a `settle_on_*` helper
/// whenever the awaited state is observable through the driver.
pub async fn pause(duration: Duration) {
    debug!(ms = duration.as_millis() as u64, "Pausing");
    tokio::time::sleep(duration).await;
}

// ============================================================================
// Condition Waits
// ============================================================================

/// Polls until an element matching `by` is present and displayed.
///
/// Returns `Some(element)` as soon as the element is visible, or `None` if
/// the ceiling passes without one. `ElementNotFound` keeps the poll going;
/// any other error propagates.
pub async fn settle_on_displayed(session: &Session, by: &By) -> Result<Option<Element>> {
    let deadline = Instant::now() + SETTLE_CEILING;

    loop {
        match session.find(by.clone()).await {
            Ok(element) => {
                if element.is_displayed().await? {
                    return Ok(Some(element));
                }
            }
            Err(Error::ElementNotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        if Instant::now() >= deadline {
            debug!(locator = %by, "Element did not become displayed before ceiling");
            return Ok(None);
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Polls until the current URL equals `expected`, returning the last URL
/// observed.
///
/// On a match the return value equals `expected`; when the ceiling passes
/// the caller's equality assertion reports the divergence.
pub async fn settle_on_url(session: &Session, expected: &str) -> Result<String> {
    let deadline = Instant::now() + SETTLE_CEILING;

    loop {
        let current = session.current_url().await?;
        if current == expected {
            return Ok(current);
        }

        if Instant::now() >= deadline {
            debug!(expected, actual = %current, "URL did not settle before ceiling");
            return Ok(current);
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Polls until the session has `expected` window handles, returning the last
/// handle list observed.
pub async fn settle_on_window_count(
    session: &Session,
    expected: usize,
) -> Result<Vec<WindowHandle>> {
    let deadline = Instant::now() + SETTLE_CEILING;

    loop {
        let handles = session.window_handles().await?;
        if handles.len() == expected {
            return Ok(handles);
        }

        if Instant::now() >= deadline {
            debug!(
                expected,
                actual = handles.len(),
                "Window count did not settle before ceiling"
            );
            return Ok(handles);
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pause_sleeps_for_duration() {
        let start = Instant::now();
        pause(Duration::from_millis(50)).await;
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_poll_interval_well_below_ceiling() {
        assert!(SETTLE_CEILING.as_millis() / POLL_INTERVAL.as_millis() >= 10);
    }
}
