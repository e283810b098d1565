//! Element locator strategies.
//!
//! The scenarios locate elements four ways: by link text, by partial link
//! text, by CSS class, and by element id.
//!
//! # Example
//!
//! ```ignore
//! use selenium_dev_e2e::By;
//!
//! let docs = session.find(By::link_text("Documentation")).await?;
//! let modal = session.find(By::class("DocSearch-Modal")).await?;
//! let input = session.find(By::id("docsearch-input")).await?;
//! let edit = session.find(By::partial_link_text("Edit this page")).await?;
//! ```
//!
//! Lookups are single-shot: `find` reports what matches at call time, with no
//! implicit retry. Callers that need to tolerate asynchronous UI settling
//! wrap the lookup with the [`crate::wait`] helpers.

use std::fmt;

// ============================================================================
// By Enum
// ============================================================================

/// Element locator strategy.
///
/// `LinkText` and `PartialLinkText` are native W3C location strategies;
/// `Class` and `Id` lower to CSS selectors because the W3C protocol carries
/// no dedicated strategies for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum By {
    /// Exact anchor text match (`<a>` elements only).
    LinkText(String),

    /// Substring anchor text match (`<a>` elements only).
    PartialLinkText(String),

    /// Single CSS class name.
    Class(String),

    /// Element id attribute.
    Id(String),
}

impl By {
    /// Creates a link text locator.
    #[inline]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::LinkText(text.into())
    }

    /// Creates a partial link text locator.
    #[inline]
    pub fn partial_link_text(text: impl Into<String>) -> Self {
        Self::PartialLinkText(text.into())
    }

    /// Creates a class name locator.
    #[inline]
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    /// Creates an element id locator.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Returns the W3C location strategy name.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::LinkText(_) => "link text",
            Self::PartialLinkText(_) => "partial link text",
            Self::Class(_) | Self::Id(_) => "css selector",
        }
    }

    /// Returns the W3C selector value for this locator.
    ///
    /// Class and id locators are lowered to CSS here.
    #[must_use]
    pub fn selector(&self) -> String {
        match self {
            Self::LinkText(text) | Self::PartialLinkText(text) => text.clone(),
            Self::Class(name) => format!(".{name}"),
            Self::Id(id) => format!("#{id}"),
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkText(text) => write!(f, "link text {text:?}"),
            Self::PartialLinkText(text) => write!(f, "partial link text {text:?}"),
            Self::Class(name) => write!(f, "class {name:?}"),
            Self::Id(id) => write!(f, "id {id:?}"),
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
    fn test_link_text_is_native_strategy() {
        let by = By::link_text("Documentation");
        assert_eq!(by.strategy(), "link text");
        assert_eq!(by.selector(), "Documentation");
    }

    #[test]
    fn test_partial_link_text_is_native_strategy() {
        let by = By::partial_link_text("Edit this page");
        assert_eq!(by.strategy(), "partial link text");
        assert_eq!(by.selector(), "Edit this page");
    }

    #[test]
    fn test_class_lowers_to_css() {
        let by = By::class("DocSearch-Modal");
        assert_eq!(by.strategy(), "css selector");
        assert_eq!(by.selector(), ".DocSearch-Modal");
    }

    #[test]
    fn test_id_lowers_to_css() {
        let by = By::id("docsearch-input");
        assert_eq!(by.strategy(), "css selector");
        assert_eq!(by.selector(), "#docsearch-input");
    }

    #[test]
    fn test_display_names_the_strategy() {
        assert_eq!(
            By::class("DocSearch-Modal").to_string(),
            "class \"DocSearch-Modal\""
        );
        assert_eq!(
            By::link_text("Documentation").to_string(),
            "link text \"Documentation\""
        );
    }
}
