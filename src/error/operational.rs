//! Operational error context propagation with `anyhow`.
//!
//! This module provides extension traits and utilities for enhancing
//! error context and centralized error reporting.

use std::{error::Error as StdError, fmt::Display};

use {
    anyhow::{Context, Error, Result as AnyhowResult},
    tracing::{error, warn},
};

use crate::report::{
    extractor::{ExtractionResult, MessageExtractor},
    raised::RaisedError,
};

/// Extension trait for enhanced error context.
///
/// This trait provides methods to add contextual information to errors,
/// making debugging and user feedback more informative.
pub trait ResultExt<T, E> {
    /// Adds context to an error with a static string.
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;

    /// Adds context to an error with a formatted string.
    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn add_context(self, context: &'static str) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(context)
    }

    fn add_contextf(self, format: impl Display) -> AnyhowResult<T>
    where
        E: StdError + Send + Sync + 'static,
    {
        self.context(format.to_string())
    }
}

/// Centralized error reporting and logging.
///
/// The `ErrorReporter` provides a consistent interface for logging
/// errors at different severity levels and reporting them to users.
pub struct ErrorReporter;

impl ErrorReporter {
    /// Reports a warning-level error (recoverable issues).
    pub fn warn(error: &Error, context: &str) {
        warn!(context = context, error = %error, "Warning error");
    }

    /// Reports an error-level error (non-recoverable issues).
    pub fn error(error: &Error, context: &str) {
        error!(context = context, error = %error, "Error error");
    }

    /// Converts an error to a user-friendly message.
    ///
    /// Domain messages win over the generic top-level text; `fallback` is
    /// used when the chain carries no message at all.
    pub fn to_user_message(error: &Error, fallback: &str) -> String {
        Self::extract(error, fallback).into_parts().0
    }

    /// Logs `error` and derives the texts for an error dialog.
    ///
    /// # Arguments
    ///
    /// * `error` - The error to report
    /// * `fallback` - Caller message used when the chain has none
    ///
    /// # Returns
    ///
    /// The `ExtractionResult` with display message and full trace.
    pub fn report(error: &Error, fallback: &str) -> ExtractionResult {
        Self::error(error, fallback);
        Self::extract(error, fallback)
    }

    fn extract(error: &Error, fallback: &str) -> ExtractionResult {
        let raised = RaisedError::from_anyhow(error);
        MessageExtractor::default().extract(Some(&raised), fallback)
    }
}
