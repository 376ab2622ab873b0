//! Error handling for PlanoKit
//!
//! Provides error types for each layer of the editing engine:
//! - Layout errors (shelf and element lookups)
//! - Template errors (persistence and instantiation)
//! - Session errors (interaction state)
//!
//! Bounds violations and orphaned planogram entries are never errors: the
//! former are clamped, the latter resolve to an empty slot.

use thiserror::Error;

/// Layout error type
///
/// Raised when a geometry operation names a shelf or element that does not exist.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// No element with the given id exists on any shelf
    #[error("Unknown element: {id}")]
    UnknownElement {
        /// The element id that was looked up.
        id: String,
    },

    /// No shelf with the given id exists
    #[error("Unknown shelf: {id}")]
    UnknownShelf {
        /// The shelf id that was looked up.
        id: String,
    },
}

/// Template error type
///
/// Represents failures while saving, loading, or instantiating named templates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// Referenced template name is absent from its namespace
    #[error("No {kind} template named '{name}'")]
    NotFound {
        /// The namespace that was searched.
        kind: String,
        /// The requested template name.
        name: String,
    },

    /// Template has no usable slot elements
    #[error("Template '{name}' cannot be instantiated: {reason}")]
    InvalidTemplate {
        /// The template name.
        name: String,
        /// Why the template was rejected.
        reason: String,
    },

    /// Stored payload could not be decoded
    #[error("Stored {kind} template '{name}' is corrupt: {reason}")]
    Corrupt {
        /// The namespace of the template.
        kind: String,
        /// The template name.
        name: String,
        /// Decoder message.
        reason: String,
    },
}

/// Session error type
///
/// Represents interaction-state violations in the editing session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A name prompt is awaiting an answer
    #[error("A template name prompt is pending")]
    PromptPending,

    /// An answer was submitted with no prompt open
    #[error("No template name prompt is pending")]
    NoPendingPrompt,
}

/// Main error type for PlanoKit
#[derive(Error, Debug)]
pub enum Error {
    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Template error
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Session error
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a missing-template error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Template(TemplateError::NotFound { .. }))
    }

    /// Check if this is a rejected-template error
    pub fn is_invalid_template(&self) -> bool {
        matches!(self, Error::Template(TemplateError::InvalidTemplate { .. }))
    }

    /// Check if this is a layout error
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Error::Layout(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_error_display() {
        let err = TemplateError::NotFound {
            kind: "shelf".to_string(),
            name: "endcap-v1".to_string(),
        };
        assert_eq!(err.to_string(), "No shelf template named 'endcap-v1'");

        let err = TemplateError::InvalidTemplate {
            name: "trim".to_string(),
            reason: "template has no slot elements".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Template 'trim' cannot be instantiated: template has no slot elements"
        );
    }

    #[test]
    fn test_error_classification() {
        let err: Error = TemplateError::NotFound {
            kind: "planogram".to_string(),
            name: "x".to_string(),
        }
        .into();
        assert!(err.is_not_found());
        assert!(!err.is_invalid_template());

        let err: Error = LayoutError::UnknownElement {
            id: "el-9".to_string(),
        }
        .into();
        assert!(err.is_layout_error());
        assert_eq!(err.to_string(), "Unknown element: el-9");

        let err: Error = SessionError::PromptPending.into();
        assert!(matches!(err, Error::Session(SessionError::PromptPending)));
    }
}
