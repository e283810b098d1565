//! DOM element interaction.
//!
//! An [`Element`] is a W3C element reference bound to the session that found
//! it, remembering the locator for error messages.
//!
//! # Example
//!
//! ```ignore
//! use selenium_dev_e2e::{By, Key};
//!
//! let input = session.find(By::id("docsearch-input")).await?;
//! input.type_text("Locators").await?;
//! input.press(Key::Enter).await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::identifiers::ElementId;
use crate::wire::Command;

use super::Session;
use super::keys::Key;
use super::locator::By;

// ============================================================================
// Element
// ============================================================================

/// A handle to a DOM element in the session's current window.
#[derive(Clone)]
pub struct Element {
    /// Owning session.
    session: Session,
    /// W3C element reference.
    id: ElementId,
    /// Locator that produced this element, kept for error context.
    locator: By,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("locator", &self.locator)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Element - Constructor
// ============================================================================

impl Element {
    /// Creates a new element handle.
    pub(crate) fn new(session: Session, id: ElementId, locator: By) -> Self {
        Self {
            session,
            id,
            locator,
        }
    }

    /// Returns this element's W3C reference.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// Returns the locator that produced this element.
    #[inline]
    #[must_use]
    pub fn locator(&self) -> &By {
        &self.locator
    }
}

// ============================================================================
// Element - Actions
// ============================================================================

impl Element {
    /// Clicks the element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotInteractable`] if the element cannot
    /// receive the click.
    pub async fn click(&self) -> Result<()> {
        debug!(element_id = %self.id, locator = %self.locator, "Clicking element");
        self.run(Command::ElementClick {
            element: self.id.clone(),
        })
        .await?;
        Ok(())
    }

    /// Appends text to the element's value, as keystrokes.
    pub async fn type_text(&self, text: &str) -> Result<()> {
        debug!(element_id = %self.id, text_len = text.len(), "Typing text");
        self.run(Command::ElementSendKeys {
            element: self.id.clone(),
            text: text.to_string(),
        })
        .await?;
        Ok(())
    }

    /// Sends a named key to the element.
    pub async fn press(&self, key: Key) -> Result<()> {
        debug!(element_id = %self.id, key = key.name(), "Pressing key");
        self.run(Command::ElementSendKeys {
            element: self.id.clone(),
            text: key.codepoint().to_string(),
        })
        .await?;
        Ok(())
    }
}

// ============================================================================
// Element - Properties
// ============================================================================

impl Element {
    /// Reports whether the element is displayed.
    pub async fn is_displayed(&self) -> Result<bool> {
        let value = self
            .run(Command::IsElementDisplayed {
                element: self.id.clone(),
            })
            .await?;
        value
            .as_bool()
            .ok_or_else(|| Error::wire("displayed response is not a boolean"))
    }
}

// ============================================================================
// Element - Internal
// ============================================================================

impl Element {
    /// Runs a command, enriching interactability errors with this element's
    /// locator.
    async fn run(&self, command: Command) -> Result<Value> {
        self.session.run(command).await.map_err(|e| match e {
            Error::ElementNotInteractable { .. } => {
                Error::element_not_interactable(self.locator.to_string())
            }
            Error::ElementNotFound { .. } => Error::element_not_found(self.locator.to_string()),
            other => other,
        })
    }
}
