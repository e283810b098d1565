//! HTTP execution path for W3C WebDriver commands.
//!
//! One [`WireClient`] per session. Every call carries a per-call timeout and
//! decodes the W3C response envelope: success payloads arrive under `value`,
//! error payloads under `value.error`/`value.message`.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

use crate::driver::Timeouts;
use crate::error::{Error, Result};
use crate::identifiers::SessionId;

use super::command::Command;

// ============================================================================
// WireClient
// ============================================================================

/// W3C WebDriver HTTP client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct WireClient {
    /// Underlying HTTP client. Timeouts are per-request, not global.
    http: reqwest::Client,
    /// Endpoint base URL, normalized to end with `/`.
    base: Url,
}

impl WireClient {
    /// Creates a client for the given endpoint base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Environment`] if the URL cannot be parsed.
    pub fn new(base: impl AsRef<str>) -> Result<Self> {
        let raw = base.as_ref();
        let normalized = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };
        let base = Url::parse(&normalized)
            .map_err(|e| Error::environment(format!("invalid endpoint URL {raw}: {e}")))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    /// Returns the endpoint base URL.
    #[inline]
    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }
}

// ============================================================================
// WireClient - Endpoint Lifecycle
// ============================================================================

impl WireClient {
    /// Probes `GET /status` and reports whether the endpoint is ready to
    /// accept new sessions.
    ///
    /// Transport failures read as "not ready"; the factory polls this while
    /// the driver process starts up.
    pub async fn ready(&self, timeout: Duration) -> bool {
        let Ok(url) = self.base.join("status") else {
            return false;
        };

        match self.http.get(url).timeout(timeout).send().await {
            Ok(resp) => match resp.json::<Value>().await {
                Ok(payload) => payload
                    .pointer("/value/ready")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                Err(_) => false,
            },
            Err(e) => {
                debug!(error = %e, "Status probe failed");
                false
            }
        }
    }

    /// Creates a new session with the given W3C capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Environment`] if the driver refuses to create a
    /// session, [`Error::Timeout`] if the request times out.
    pub async fn new_session(&self, capabilities: Value, timeout: Duration) -> Result<SessionId> {
        let url = self
            .base
            .join("session")
            .map_err(|e| Error::wire(format!("session route: {e}")))?;

        let body = json!({ "capabilities": capabilities });
        debug!(endpoint = %url, "Creating session");

        let resp = self
            .http
            .post(url)
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout("new session", timeout.as_millis() as u64)
                } else {
                    Error::environment(format!("driver endpoint unreachable: {e}"))
                }
            })?;

        let status = resp.status();
        let payload: Value = resp
            .json()
            .await
            .map_err(|e| Error::wire(format!("malformed new-session response: {e}")))?;

        if !status.is_success() {
            let err = decode_error("new session", timeout.as_millis() as u64, &payload);
            // A refused session is an environment problem whatever the code.
            return Err(if err.is_environment() {
                err
            } else {
                Error::environment(err.to_string())
            });
        }

        let session_id = payload
            .pointer("/value/sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::wire("new-session response missing sessionId"))?;

        debug!(session_id, "Session created");
        Ok(SessionId::new(session_id))
    }
}

// ============================================================================
// WireClient - Command Execution
// ============================================================================

impl WireClient {
    /// Executes a session-scoped command and returns the `value` payload.
    ///
    /// # Errors
    ///
    /// Maps the W3C error envelope into the crate taxonomy; a request that
    /// exceeds the command's timeout class surfaces [`Error::Timeout`].
    pub async fn execute(
        &self,
        session: &SessionId,
        command: &Command,
        timeouts: &Timeouts,
    ) -> Result<Value> {
        let route = format!("session/{}{}", session, command.route());
        let url = self
            .base
            .join(&route)
            .map_err(|e| Error::wire(format!("command route {route}: {e}")))?;

        let timeout = command.timeout(timeouts);
        let timeout_ms = timeout.as_millis() as u64;

        debug!(command = command.label(), %url, "Executing command");

        let mut request = self
            .http
            .request(command.method(), url)
            .timeout(timeout);
        if let Some(body) = command.body() {
            request = request.json(&body);
        }

        let resp = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(command.label(), timeout_ms)
            } else {
                Error::Http(e)
            }
        })?;

        let status = resp.status();
        let payload: Value = resp.json().await.map_err(|e| {
            Error::wire(format!("malformed response to {}: {e}", command.label()))
        })?;

        if status.is_success() {
            Ok(payload.get("value").cloned().unwrap_or(Value::Null))
        } else {
            let err = decode_error(command.label(), timeout_ms, &payload);
            warn!(command = command.label(), error = %err, "Command failed");
            Err(err)
        }
    }
}

// ============================================================================
// Error Decoding
// ============================================================================

/// W3C error envelope payload: the object under `value`.
#[derive(Debug, Default, Deserialize)]
struct ErrorValue {
    /// W3C error code string, e.g. `no such element`.
    #[serde(default)]
    error: String,
    /// Human-readable message; often followed by a stacktrace.
    #[serde(default)]
    message: String,
}

/// Maps a W3C error envelope into the crate error taxonomy.
///
/// Driver messages often carry a multi-line stacktrace; only the first line
/// is kept.
fn decode_error(operation: &str, timeout_ms: u64, payload: &Value) -> Error {
    let decoded: ErrorValue = payload
        .get("value")
        .cloned()
        .map(serde_json::from_value)
        .and_then(std::result::Result::ok)
        .unwrap_or_default();

    let code = decoded.error.as_str();
    let message = decoded
        .message
        .lines()
        .next()
        .unwrap_or("")
        .to_string();

    match code {
        "no such element" => Error::element_not_found(message),
        "element not interactable" | "element click intercepted" => {
            Error::element_not_interactable(message)
        }
        "no such window" => Error::no_such_window(message),
        "timeout" | "script timeout" => Error::timeout(operation, timeout_ms),
        "session not created" => Error::environment(message),
        "" => Error::wire(format!("{operation}: non-W3C error payload")),
        _ => Error::wire(format!("{code}: {message}")),
    }
}

// ============================================================================
// Tests
// ============================================================================
