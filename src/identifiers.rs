//! Type-safe identifiers for driver entities.
//!
//! The W3C wire protocol hands back opaque strings for sessions, elements,
//! and windows. Newtype wrappers keep them from being mixed up at compile
//! time.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// SessionId
// ============================================================================

/// Opaque W3C session identifier.
///
/// Issued by `POST /session`; scopes every subsequent command route.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Wraps a raw session id string.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw id string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// ElementId
// ============================================================================

/// Opaque W3C element reference.
///
/// The value under the `element-6066-11e4-a52e-4f735466cecf` key of a
/// find-element response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    /// Wraps a raw element reference string.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw reference string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// WindowHandle
// ============================================================================

/// Opaque identifier for a top-level browser window or tab.
///
/// The driver exposes handles as an ordered sequence reflecting creation
/// order; the harness never inspects the contents of a handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowHandle(String);

impl WindowHandle {
    /// Wraps a raw window handle string.
    #[inline]
    #[must_use]
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Returns the raw handle string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_roundtrip() {
        let id = SessionId::new("5e6f1c23");
        assert_eq!(id.as_str(), "5e6f1c23");
        assert_eq!(id.to_string(), "5e6f1c23");
    }

    #[test]
    fn test_window_handles_compare() {
        let a = WindowHandle::new("CDwindow-1");
        let b = WindowHandle::new("CDwindow-2");
        assert_ne!(a, b);
        assert_eq!(a, WindowHandle::new("CDwindow-1"));
    }

    #[test]
    fn test_element_id_display() {
        let id = ElementId::new("0.123-1");
        assert_eq!(format!("{id}"), "0.123-1");
    }
}
