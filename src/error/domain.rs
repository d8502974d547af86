//! Domain-specific error types using `thiserror`.
//!
//! This module defines the error kinds the message extractor recognizes
//! (`DomainError`, `InvocationError`) together with the errors raised by
//! the dialog front-end itself.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error used as an optional underlying cause.
pub type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// Application error carrying a curated, user-facing message.
///
/// The extractor always shows the message of a `DomainError` as-is,
/// without consulting its cause.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct DomainError {
    /// User-facing message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<BoxedSource>,
}

impl DomainError {
    /// Creates a domain error without a cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Attaches an underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxedSource>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Error whose only purpose is to carry the failure of an indirect call.
///
/// Plugins, scripted steps and other dynamically dispatched work report
/// their failure through this wrapper; the interesting message lives in
/// its cause.
#[derive(Error, Debug)]
#[error("Invocation of {target} failed")]
pub struct InvocationError {
    /// Name of the invoked target.
    pub target: String,
    /// The failure raised by the target, if it reported one.
    #[source]
    pub source: Option<BoxedSource>,
}

impl InvocationError {
    /// Creates a wrapper around the failure of `target`.
    pub fn new(target: impl Into<String>, source: Option<BoxedSource>) -> Self {
        Self {
            target: target.into(),
            source,
        }
    }
}

/// UI-related errors.
#[derive(Error, Debug)]
pub enum UiError {
    /// GTK/Libadwaita initialization error.
    #[error("UI initialization error: {0}")]
    InitializationError(String),
    /// Invalid error request handed to the launcher.
    #[error("Invalid error request: {reason}")]
    InvalidRequest { reason: String },
}

#[cfg(test)]
mod tests {
    use std::io::{Error, ErrorKind::NotFound};

    use crate::error::domain::{DomainError, InvocationError, UiError};

    #[test]
    fn test_domain_error_display() {
        let error = DomainError::new("Unable to open transformation");
        assert_eq!(error.to_string(), "Unable to open transformation");
    }

    #[test]
    fn test_domain_error_source() {
        use std::error::Error as _;

        let error = DomainError::new("Step failed").with_source(Error::new(NotFound, "missing"));
        assert_eq!(error.source().unwrap().to_string(), "missing");
    }

    #[test]
    fn test_invocation_error_display() {
        let error = InvocationError::new("TextFileInput.init", None);
        assert_eq!(error.to_string(), "Invocation of TextFileInput.init failed");
    }

    #[test]
    fn test_ui_error_display() {
        let init_error = UiError::InitializationError("no display".to_string());
        assert_eq!(init_error.to_string(), "UI initialization error: no display");

        let request_error = UiError::InvalidRequest {
            reason: "bad json".to_string(),
        };
        assert_eq!(request_error.to_string(), "Invalid error request: bad json");
    }
}
