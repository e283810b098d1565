//! W3C WebDriver command table.
//!
//! Each variant describes one endpoint command: HTTP method, route relative
//! to the session, and JSON body. The harness uses exactly the surface the
//! scenarios need; there are no extension commands.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use reqwest::Method;
use serde_json::{Value, json};

use crate::driver::Timeouts;
use crate::identifiers::{ElementId, WindowHandle};

// ============================================================================
// Command Enum
// ============================================================================

/// A session-scoped W3C WebDriver command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Navigate the current top-level browsing context to a URL.
    NavigateTo {
        /// Absolute URL to load.
        url: String,
    },

    /// Read the current URL.
    GetCurrentUrl,

    /// Read the current page title.
    GetTitle,

    /// Locate the first element matching a strategy/selector pair.
    ///
    /// "First" is the driver's natural document order.
    FindElement {
        /// W3C location strategy name.
        using: &'static str,
        /// Selector value for the strategy.
        value: String,
    },

    /// Click an element.
    ElementClick {
        /// Target element reference.
        element: ElementId,
    },

    /// Append keystrokes to an element's value.
    ElementSendKeys {
        /// Target element reference.
        element: ElementId,
        /// Text to send; may contain W3C key codepoints.
        text: String,
    },

    /// Check whether an element is displayed.
    IsElementDisplayed {
        /// Target element reference.
        element: ElementId,
    },

    /// List window handles in the driver's creation order.
    GetWindowHandles,

    /// Make a window the target of subsequent commands.
    SwitchToWindow {
        /// Handle of the window to switch to.
        handle: WindowHandle,
    },

    /// Maximize the current window.
    MaximizeWindow,

    /// End the session, quitting the browser and all its windows.
    DeleteSession,
}

// ============================================================================
// Command - Wire Mapping
// ============================================================================

impl Command {
    /// Returns the HTTP method for this command.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::GetCurrentUrl
            | Self::GetTitle
            | Self::IsElementDisplayed { .. }
            | Self::GetWindowHandles => Method::GET,
            Self::DeleteSession => Method::DELETE,
            _ => Method::POST,
        }
    }

    /// Returns the route relative to `/session/{id}`.
    #[must_use]
    pub fn route(&self) -> String {
        match self {
            Self::NavigateTo { .. } | Self::GetCurrentUrl => "/url".to_string(),
            Self::GetTitle => "/title".to_string(),
            Self::FindElement { .. } => "/element".to_string(),
            Self::ElementClick { element } => format!("/element/{element}/click"),
            Self::ElementSendKeys { element, .. } => format!("/element/{element}/value"),
            Self::IsElementDisplayed { element } => format!("/element/{element}/displayed"),
            Self::GetWindowHandles => "/window/handles".to_string(),
            Self::SwitchToWindow { .. } => "/window".to_string(),
            Self::MaximizeWindow => "/window/maximize".to_string(),
            Self::DeleteSession => String::new(),
        }
    }

    /// Returns the JSON body, if the command carries one.
    ///
    /// POST commands without parameters still send `{}`; chromedriver
    /// rejects empty POST bodies.
    #[must_use]
    pub fn body(&self) -> Option<Value> {
        match self {
            Self::NavigateTo { url } => Some(json!({ "url": url })),
            Self::FindElement { using, value } => {
                Some(json!({ "using": using, "value": value }))
            }
            Self::ElementSendKeys { text, .. } => Some(json!({ "text": text })),
            Self::SwitchToWindow { handle } => Some(json!({ "handle": handle.as_str() })),
            Self::ElementClick { .. } | Self::MaximizeWindow => Some(json!({})),
            Self::GetCurrentUrl
            | Self::GetTitle
            | Self::IsElementDisplayed { .. }
            | Self::GetWindowHandles
            | Self::DeleteSession => None,
        }
    }

    /// Returns a short label for logs and timeout messages.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NavigateTo { .. } => "navigate",
            Self::GetCurrentUrl => "get current url",
            Self::GetTitle => "get title",
            Self::FindElement { .. } => "find element",
            Self::ElementClick { .. } => "click element",
            Self::ElementSendKeys { .. } => "send keys",
            Self::IsElementDisplayed { .. } => "is displayed",
            Self::GetWindowHandles => "get window handles",
            Self::SwitchToWindow { .. } => "switch to window",
            Self::MaximizeWindow => "maximize window",
            Self::DeleteSession => "delete session",
        }
    }

    /// Returns the per-call timeout class for this command.
    #[must_use]
    pub fn timeout(&self, timeouts: &Timeouts) -> Duration {
        match self {
            Self::NavigateTo { .. } => timeouts.navigation,
            Self::FindElement { .. } => timeouts.find,
            _ => timeouts.control,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate_route_and_body() {
        let cmd = Command::NavigateTo {
            url: "https://www.selenium.dev/".to_string(),
        };
        assert_eq!(cmd.method(), Method::POST);
        assert_eq!(cmd.route(), "/url");
        assert_eq!(
            cmd.body(),
            Some(json!({ "url": "https://www.selenium.dev/" }))
        );
    }

    #[test]
    fn test_get_url_is_get_without_body() {
        let cmd = Command::GetCurrentUrl;
        assert_eq!(cmd.method(), Method::GET);
        assert_eq!(cmd.route(), "/url");
        assert!(cmd.body().is_none());
    }

    #[test]
    fn test_find_element_body_carries_strategy() {
        let cmd = Command::FindElement {
            using: "link text",
            value: "Documentation".to_string(),
        };
        assert_eq!(
            cmd.body(),
            Some(json!({ "using": "link text", "value": "Documentation" }))
        );
    }

    #[test]
    fn test_click_sends_empty_object_body() {
        let cmd = Command::ElementClick {
            element: ElementId::new("e-1"),
        };
        assert_eq!(cmd.route(), "/element/e-1/click");
        assert_eq!(cmd.body(), Some(json!({})));
    }

    #[test]
    fn test_delete_session_routes_to_session_root() {
        let cmd = Command::DeleteSession;
        assert_eq!(cmd.method(), Method::DELETE);
        assert_eq!(cmd.route(), "");
        assert!(cmd.body().is_none());
    }

    #[test]
    fn test_timeout_classes() {
        let timeouts = Timeouts::default();
        let nav = Command::NavigateTo {
            url: "https://example.com".to_string(),
        };
        let find = Command::FindElement {
            using: "css selector",
            value: ".DocSearch-Modal".to_string(),
        };
        assert_eq!(nav.timeout(&timeouts), timeouts.navigation);
        assert_eq!(find.timeout(&timeouts), timeouts.find);
        assert_eq!(Command::GetTitle.timeout(&timeouts), timeouts.control);
    }
}
