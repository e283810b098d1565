//! Browser session and page interaction facade.
//!
//! A [`Session`] is the handle to one running browser: it owns the
//! chromedriver child process (when the factory spawned one), the wire
//! client, the W3C session id, and the temporary profile directory.
//!
//! Scenario lifecycle: the runner opens a session in setup, hands it to the
//! scenario body, and closes it in teardown regardless of outcome. Exactly
//! one session per scenario; never reused.
//!
//! # Example
//!
//! ```no_run
//! use selenium_dev_e2e::{By, Driver};
//!
//! # async fn example() -> selenium_dev_e2e::Result<()> {
//! let driver = Driver::builder().build()?;
//! let session = driver.open().await?;
//!
//! session.goto("https://www.selenium.dev/").await?;
//! let link = session.find(By::link_text("Documentation")).await?;
//! link.click().await?;
//!
//! session.close().await;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// DOM element interaction.
pub mod element;

/// Keyboard key definitions.
pub mod keys;

/// Element locator strategies.
pub mod locator;

// ============================================================================
// Re-exports
// ============================================================================

pub use element::Element;
pub use keys::Key;
pub use locator::By;

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tempfile::TempDir;
use tokio::process::Child;
use tracing::{debug, info};

use crate::driver::Timeouts;
use crate::error::{Error, Result};
use crate::identifiers::{ElementId, SessionId, WindowHandle};
use crate::wire::{Command, WireClient};

// ============================================================================
// Constants
// ============================================================================

/// W3C element identifier key in find-element responses.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

// ============================================================================
// DriverProcess
// ============================================================================

/// Guards a spawned chromedriver process and its profile directory.
///
/// The profile `TempDir` is removed when the guard is dropped, after the
/// process is gone.
pub(crate) struct DriverProcess {
    /// The child process handle.
    child: Option<Child>,
    /// Process ID for logging.
    pid: u32,
    /// Per-session profile directory; removed on drop.
    #[allow(dead_code)]
    profile: TempDir,
}

impl DriverProcess {
    /// Creates a new process guard.
    pub(crate) fn new(child: Child, profile: TempDir) -> Self {
        let pid = child.id().unwrap_or(0);
        debug!(pid, "Driver process guard created");
        Self {
            child: Some(child),
            pid,
            profile,
        }
    }

    /// Kills the process and waits for it to exit. Never raises.
    async fn kill(&mut self) {
        if let Some(mut child) = self.child.take() {
            debug!(pid = self.pid, "Killing chromedriver process");
            if let Err(e) = child.kill().await {
                debug!(pid = self.pid, error = %e, "Failed to kill process");
            }
            if let Err(e) = child.wait().await {
                debug!(pid = self.pid, error = %e, "Failed to wait for process");
            }
            info!(pid = self.pid, "Driver process terminated");
        }
    }
}

impl Drop for DriverProcess {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take()
            && let Err(e) = child.start_kill()
        {
            debug!(pid = self.pid, error = %e, "Failed to send kill signal in Drop");
        }
    }
}

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a session.
pub(crate) struct SessionInner {
    /// W3C session id.
    id: SessionId,
    /// Wire client bound to this session's endpoint.
    wire: WireClient,
    /// Per-call timeout ceilings.
    timeouts: Timeouts,
    /// Spawned chromedriver process, if the factory launched one.
    process: Mutex<Option<DriverProcess>>,
}

// ============================================================================
// Session
// ============================================================================

/// A handle to one running browser session.
///
/// Cheap to clone; all clones refer to the same session.
#[derive(Clone)]
pub struct Session {
    /// Shared inner state.
    inner: Arc<SessionInner>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.inner.id)
            .field("endpoint", &self.inner.wire.base().as_str())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Session - Constructor
// ============================================================================

impl Session {
    /// Creates a new session handle.
    pub(crate) fn new(
        wire: WireClient,
        id: SessionId,
        timeouts: Timeouts,
        process: Option<DriverProcess>,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                id,
                wire,
                timeouts,
                process: Mutex::new(process),
            }),
        }
    }

    /// Returns the W3C session id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.inner.id
    }

    /// Executes a wire command against this session.
    pub(crate) async fn run(&self, command: Command) -> Result<Value> {
        self.inner
            .wire
            .execute(&self.inner.id, &command, &self.inner.timeouts)
            .await
    }
}

// ============================================================================
// Session - Navigation
// ============================================================================

impl Session {
    /// Navigates to an absolute URL.
    ///
    /// Returns once the driver considers the page load complete.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`] if the load exceeds the navigation
    /// ceiling, [`Error::Navigation`] for any other driver failure.
    pub async fn goto(&self, url: &str) -> Result<()> {
        debug!(url = %url, session_id = %self.inner.id, "Navigating");

        self.run(Command::NavigateTo {
            url: url.to_string(),
        })
        .await
        .map_err(|e| {
            if e.is_timeout() {
                e
            } else {
                Error::navigation(url, e.to_string())
            }
        })?;
        Ok(())
    }

    /// Reads the current URL.
    pub async fn current_url(&self) -> Result<String> {
        let value = self.run(Command::GetCurrentUrl).await?;
        expect_string(&value, "url")
    }

    /// Reads the current page title.
    pub async fn title(&self) -> Result<String> {
        let value = self.run(Command::GetTitle).await?;
        expect_string(&value, "title")
    }
}

// ============================================================================
// Session - Elements
// ============================================================================

impl Session {
    /// Locates the first element matching the locator, in the driver's
    /// natural document order.
    ///
    /// Single lookup at call time; no implicit retry. Callers that need to
    /// tolerate asynchronous UI settling wrap this with [`crate::wait`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotFound`] naming the locator if nothing
    /// matches right now.
    pub async fn find(&self, by: By) -> Result<Element> {
        debug!(locator = %by, session_id = %self.inner.id, "Finding element");

        let value = self
            .run(Command::FindElement {
                using: by.strategy(),
                value: by.selector(),
            })
            .await
            .map_err(|e| match e {
                Error::ElementNotFound { .. } => Error::element_not_found(by.to_string()),
                other => other,
            })?;

        let id = value
            .get(ELEMENT_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::wire("find-element response missing element reference"))?;

        Ok(Element::new(self.clone(), ElementId::new(id), by))
    }
}

// ============================================================================
// Session - Windows
// ============================================================================

impl Session {
    /// Lists window handles in the driver's creation order.
    pub async fn window_handles(&self) -> Result<Vec<WindowHandle>> {
        let value = self.run(Command::GetWindowHandles).await?;
        let handles = value
            .as_array()
            .ok_or_else(|| Error::wire("window-handles response is not an array"))?
            .iter()
            .map(|h| {
                h.as_str()
                    .map(WindowHandle::new)
                    .ok_or_else(|| Error::wire("window handle is not a string"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(handles)
    }

    /// Makes the given window the target of subsequent commands.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSuchWindow`] if the handle is not valid.
    pub async fn switch_to_window(&self, handle: &WindowHandle) -> Result<()> {
        debug!(handle = %handle, session_id = %self.inner.id, "Switching window");

        self.run(Command::SwitchToWindow {
            handle: handle.clone(),
        })
        .await
        .map_err(|e| match e {
            Error::NoSuchWindow { .. } => Error::no_such_window(handle.as_str()),
            other => other,
        })?;
        Ok(())
    }

    /// Maximizes the current window.
    pub async fn maximize(&self) -> Result<()> {
        self.run(Command::MaximizeWindow).await?;
        Ok(())
    }
}

// ============================================================================
// Session - Lifecycle
// ============================================================================

impl Session {
    /// Ends the session: quits the browser with all its windows, then kills
    /// the chromedriver process if this session spawned one.
    ///
    /// Closing a single window is unreliable on Chrome; the full quit is the
    /// contract. Never raises — teardown must not mask the scenario's own
    /// outcome — so failures are logged and swallowed.
    pub async fn close(&self) {
        debug!(session_id = %self.inner.id, "Closing session");

        if let Err(e) = self.run(Command::DeleteSession).await {
            debug!(session_id = %self.inner.id, error = %e, "Ignoring delete-session failure");
        }

        let process = self.inner.process.lock().take();
        if let Some(mut process) = process {
            process.kill().await;
        }

        info!(session_id = %self.inner.id, "Session closed");
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Decodes a string `value` payload.
fn expect_string(value: &Value, what: &str) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::wire(format!("expected string {what} in response")))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<Session>();
    }

    #[test]
    fn test_expect_string_decodes() {
        let value = Value::String("https://www.selenium.dev/".to_string());
        assert_eq!(
            expect_string(&value, "url").unwrap(),
            "https://www.selenium.dev/"
        );
    }

    #[test]
    fn test_expect_string_rejects_non_string() {
        let err = expect_string(&Value::Null, "title").unwrap_err();
        assert!(matches!(err, Error::Wire { .. }));
    }
}
