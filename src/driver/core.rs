//! Driver session factory.
//!
//! The [`Driver`] owns the environment-facing side of the harness: it finds
//! (or is pointed at) a W3C endpoint and mints one fresh [`Session`] per
//! scenario.
//!
//! # Example
//!
//! ```no_run
//! use selenium_dev_e2e::{ChromeOptions, Driver};
//!
//! # async fn example() -> selenium_dev_e2e::Result<()> {
//! let driver = Driver::builder()
//!     .options(ChromeOptions::new().with_headless())
//!     .build()?;
//!
//! let session = driver.open().await?;
//! session.goto("https://www.selenium.dev/").await?;
//! session.close().await;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::net::TcpListener;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tempfile::TempDir;
use tokio::process::{Child, Command};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::session::{DriverProcess, Session};
use crate::wire::WireClient;

use super::builder::DriverBuilder;
use super::options::{ChromeOptions, Timeouts};

// ============================================================================
// Constants
// ============================================================================

/// Name of the driver binary searched on `PATH`.
const DRIVER_BINARY: &str = "chromedriver";

/// Interval between endpoint readiness probes at startup.
const READY_POLL: Duration = Duration::from_millis(100);

// ============================================================================
// Endpoint
// ============================================================================

/// Where sessions come from.
#[derive(Debug, Clone)]
pub enum Endpoint {
    /// Spawn a chromedriver process per session, from an explicit binary
    /// path or from `PATH` discovery.
    Spawn(Option<PathBuf>),

    /// Attach to an endpoint that is already running.
    Attached(String),
}

// ============================================================================
// Driver
// ============================================================================

/// Session factory for the suite.
///
/// Holds the endpoint strategy, the browser configuration, and the per-call
/// timeouts. Sessions never share a browser process or a profile directory.
#[derive(Debug, Clone)]
pub struct Driver {
    /// Endpoint strategy.
    endpoint: Endpoint,
    /// Browser configuration applied to every session.
    options: ChromeOptions,
    /// Per-call timeout ceilings.
    timeouts: Timeouts,
}

// ============================================================================
// Driver - Public API
// ============================================================================

impl Driver {
    /// Creates a configuration builder for the driver.
    #[inline]
    #[must_use]
    pub fn builder() -> DriverBuilder {
        DriverBuilder::new()
    }

    /// Returns the endpoint strategy.
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the browser configuration.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ChromeOptions {
        &self.options
    }

    /// Returns the per-call timeout ceilings.
    #[inline]
    #[must_use]
    pub fn timeouts(&self) -> &Timeouts {
        &self.timeouts
    }

    /// Opens a fresh browser session.
    ///
    /// Spawn mode: picks a free loopback port, launches chromedriver on it,
    /// waits for the endpoint to report ready, then creates the session with
    /// an isolated temporary profile. Attached mode: creates the session on
    /// the existing endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Environment`] when the binary is missing, the
    /// endpoint never becomes ready, or the driver refuses the session.
    pub async fn open(&self) -> Result<Session> {
        match &self.endpoint {
            Endpoint::Attached(url) => self.open_attached(url).await,
            Endpoint::Spawn(binary) => self.open_spawned(binary.as_deref()).await,
        }
    }
}

// ============================================================================
// Driver - Internal API
// ============================================================================

impl Driver {
    /// Creates a new driver instance. Use [`Driver::builder`].
    pub(crate) fn new(endpoint: Endpoint, options: ChromeOptions, timeouts: Timeouts) -> Self {
        Self {
            endpoint,
            options,
            timeouts,
        }
    }

    /// Opens a session on an endpoint that is already running.
    async fn open_attached(&self, url: &str) -> Result<Session> {
        let wire = WireClient::new(url)?;
        let capabilities = self.options.to_capabilities(None);
        let session_id = wire
            .new_session(capabilities, self.timeouts.control)
            .await?;

        info!(session_id = %session_id, endpoint = url, "Session opened on attached endpoint");
        Ok(Session::new(wire, session_id, self.timeouts.clone(), None))
    }

    /// Spawns a chromedriver process and opens a session on it.
    async fn open_spawned(&self, binary: Option<&std::path::Path>) -> Result<Session> {
        let binary = resolve_binary(binary)?;
        let port = free_port()?;
        let profile = TempDir::new()
            .map_err(|e| Error::environment(format!("cannot create profile dir: {e}")))?;

        let mut child = spawn_driver(&binary, port)?;
        let pid = child.id();
        debug!(pid, port, "chromedriver process spawned");

        let wire = WireClient::new(format!("http://127.0.0.1:{port}"))?;
        if let Err(e) = self.await_ready(&wire, &mut child, port).await {
            kill_quietly(&mut child).await;
            return Err(e);
        }

        let capabilities = self.options.to_capabilities(Some(profile.path()));
        let session_id = match wire.new_session(capabilities, self.timeouts.control).await {
            Ok(id) => id,
            Err(e) => {
                kill_quietly(&mut child).await;
                return Err(e);
            }
        };

        info!(session_id = %session_id, pid, port, "Session opened");
        let process = DriverProcess::new(child, profile);
        Ok(Session::new(
            wire,
            session_id,
            self.timeouts.clone(),
            Some(process),
        ))
    }

    /// Polls the endpoint until it reports ready or the ceiling passes.
    async fn await_ready(&self, wire: &WireClient, child: &mut Child, port: u16) -> Result<()> {
        let deadline = Instant::now() + self.timeouts.ready;

        loop {
            if let Some(status) = child.try_wait()? {
                return Err(Error::environment(format!(
                    "chromedriver exited during startup ({status}); port {port} already in use?"
                )));
            }

            if wire.ready(READY_POLL * 10).await {
                debug!(port, "Endpoint ready");
                return Ok(());
            }

            if Instant::now() >= deadline {
                return Err(Error::environment(format!(
                    "chromedriver on port {port} not ready within {}ms",
                    self.timeouts.ready.as_millis()
                )));
            }

            tokio::time::sleep(READY_POLL).await;
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Resolves the chromedriver binary: explicit path, or `PATH` discovery.
fn resolve_binary(explicit: Option<&std::path::Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(Error::environment(format!(
            "chromedriver not found at: {}",
            path.display()
        )));
    }

    let path_var = std::env::var_os("PATH")
        .ok_or_else(|| Error::environment("PATH is not set; cannot locate chromedriver"))?;

    for dir in std::env::split_paths(&path_var) {
        let candidate = dir.join(DRIVER_BINARY);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "Resolved chromedriver from PATH");
            return Ok(candidate);
        }
    }

    Err(Error::environment(
        "chromedriver not found on PATH; install it or point Driver::builder().binary() at it",
    ))
}

/// Picks a free loopback port by binding port 0 and reading back the choice.
fn free_port() -> Result<u16> {
    let listener = TcpListener::bind(("127.0.0.1", 0))
        .map_err(|e| Error::environment(format!("no free loopback port: {e}")))?;
    let port = listener
        .local_addr()
        .map_err(|e| Error::environment(format!("cannot read bound port: {e}")))?
        .port();
    drop(listener);
    Ok(port)
}

/// Spawns the chromedriver process with stdio suppressed.
fn spawn_driver(binary: &std::path::Path, port: u16) -> Result<Child> {
    Command::new(binary)
        .arg(format!("--port={port}"))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| Error::environment(format!("failed to launch chromedriver: {e}")))
}

/// Kills a half-started process without surfacing errors.
async fn kill_quietly(child: &mut Child) {
    if let Err(e) = child.kill().await {
        debug!(error = %e, "Failed to kill chromedriver during startup cleanup");
    }
    let _ = child.wait().await;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_returns_driver_builder() {
        let _builder = Driver::builder();
    }

    #[test]
    fn test_driver_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<Driver>();
    }

    #[test]
    fn test_free_port_is_nonzero() {
        let port = free_port().unwrap();
        assert_ne!(port, 0);
    }

    #[test]
    fn test_resolve_explicit_missing_binary() {
        let err = resolve_binary(Some(std::path::Path::new("/nonexistent/chromedriver")))
            .unwrap_err();
        assert!(err.is_environment());
    }
}
