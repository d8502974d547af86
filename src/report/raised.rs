//! Error chain data model walked by the message extractor.
//!
//! `RaisedError` is the owned, serializable form of a reported error. The
//! extractor itself only sees the `ErrorNode` trait, so host applications
//! can hand in their own error graphs without converting them first.

use std::{
    backtrace::BacktraceStatus,
    borrow::Cow,
    error::Error as StdError,
};

use {
    anyhow::Error as AnyhowError,
    serde::{Deserialize, Serialize},
};

use crate::error::domain::{DomainError, InvocationError};

/// Maximum number of `source()` links followed when converting a Rust error.
pub const MAX_CONVERTED_SOURCES: usize = 64;

/// Closed set of error kinds the extractor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Application error carrying its own user-facing message.
    Domain,
    /// Error whose sole purpose is to carry an underlying cause.
    Wrapper,
    /// Any other error.
    Other,
}

/// One link of an error chain, as seen by the extractor.
pub trait ErrorNode {
    /// Classification of this node.
    fn kind(&self) -> ErrorKind;

    /// The node's own message, if it has one.
    fn message(&self) -> Option<&str>;

    /// Locale-independent string representation, used when no message is available.
    fn representation(&self) -> Cow<'_, str>;

    /// Pre-rendered stack trace of this node.
    fn trace(&self) -> Option<&str>;

    /// The underlying cause, if any.
    fn cause(&self) -> Option<&dyn ErrorNode>;
}

/// Owned error chain with explicit kind-specific payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RaisedError {
    /// Application error with a curated message.
    Domain {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cause: Option<Box<RaisedError>>,
    },
    /// Carrier of an underlying cause, e.g. a failed indirect invocation.
    Wrapper {
        representation: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cause: Option<Box<RaisedError>>,
    },
    /// Any other error.
    Other {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        representation: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trace: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cause: Option<Box<RaisedError>>,
    },
}

impl RaisedError {
    /// Creates a domain error with the given message.
    pub fn domain(message: impl Into<String>) -> Self {
        RaisedError::Domain {
            message: message.into(),
            trace: None,
            cause: None,
        }
    }

    /// Creates a wrapper error around an optional cause.
    pub fn wrapper(representation: impl Into<String>, cause: Option<RaisedError>) -> Self {
        RaisedError::Wrapper {
            representation: representation.into(),
            trace: None,
            cause: cause.map(Box::new),
        }
    }

    /// Creates a generic error.
    pub fn other(representation: impl Into<String>, message: Option<String>) -> Self {
        RaisedError::Other {
            message,
            representation: representation.into(),
            trace: None,
            cause: None,
        }
    }

    /// Replaces the pre-rendered trace of this node.
    #[must_use]
    pub fn with_trace(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            RaisedError::Domain { trace, .. }
            | RaisedError::Wrapper { trace, .. }
            | RaisedError::Other { trace, .. } => *trace = Some(text.into()),
        }
        self
    }

    /// Replaces the cause of this node.
    #[must_use]
    pub fn caused_by(mut self, new_cause: RaisedError) -> Self {
        match &mut self {
            RaisedError::Domain { cause, .. }
            | RaisedError::Wrapper { cause, .. }
            | RaisedError::Other { cause, .. } => *cause = Some(Box::new(new_cause)),
        }
        self
    }

    /// Converts a Rust error and its `source()` chain using the default classifier.
    pub fn from_std_error(error: &(dyn StdError + 'static)) -> Self {
        Self::from_std_error_with(error, &DefaultClassifier)
    }

    /// Converts a Rust error and its `source()` chain with a custom classifier.
    ///
    /// At most [`MAX_CONVERTED_SOURCES`] links are converted.
    pub fn from_std_error_with(
        error: &(dyn StdError + 'static),
        classifier: &dyn ErrorClassifier,
    ) -> Self {
        let mut chain = Vec::new();
        let mut current = Some(error);
        while let Some(node) = current {
            if chain.len() == MAX_CONVERTED_SOURCES {
                break;
            }
            chain.push(node);
            current = node.source();
        }

        // Build innermost first so each node can own its cause.
        chain.into_iter().rev().fold(None::<RaisedError>, |cause, node| {
            let converted = convert_node(node, classifier);
            Some(match cause {
                Some(cause) => converted.caused_by(cause),
                None => converted,
            })
        })
        .unwrap_or_else(|| RaisedError::other(format!("{error:?}"), None))
    }

    /// Converts an `anyhow` error, keeping its backtrace when one was captured.
    pub fn from_anyhow(error: &AnyhowError) -> Self {
        let root: &(dyn StdError + 'static) = error.as_ref();
        let converted = Self::from_std_error(root);
        let backtrace = error.backtrace();
        if backtrace.status() == BacktraceStatus::Captured {
            converted.with_trace(backtrace.to_string())
        } else {
            converted
        }
    }
}

impl ErrorNode for RaisedError {
    fn kind(&self) -> ErrorKind {
        match self {
            RaisedError::Domain { .. } => ErrorKind::Domain,
            RaisedError::Wrapper { .. } => ErrorKind::Wrapper,
            RaisedError::Other { .. } => ErrorKind::Other,
        }
    }

    fn message(&self) -> Option<&str> {
        match self {
            RaisedError::Domain { message, .. } => Some(message),
            RaisedError::Wrapper { .. } => None,
            RaisedError::Other { message, .. } => message.as_deref(),
        }
    }

    fn representation(&self) -> Cow<'_, str> {
        match self {
            RaisedError::Domain { message, .. } => Cow::Borrowed(message),
            RaisedError::Wrapper { representation, .. } => Cow::Borrowed(representation),
            RaisedError::Other {
                message: Some(message),
                representation,
                ..
            } if !message.is_empty() => Cow::Owned(format!("{representation}: {message}")),
            RaisedError::Other { representation, .. } => Cow::Borrowed(representation),
        }
    }

    fn trace(&self) -> Option<&str> {
        match self {
            RaisedError::Domain { trace, .. }
            | RaisedError::Wrapper { trace, .. }
            | RaisedError::Other { trace, .. } => trace.as_deref(),
        }
    }

    fn cause(&self) -> Option<&dyn ErrorNode> {
        match self {
            RaisedError::Domain { cause, .. }
            | RaisedError::Wrapper { cause, .. }
            | RaisedError::Other { cause, .. } => {
                cause.as_deref().map(|cause| cause as &dyn ErrorNode)
            }
        }
    }
}

impl From<&AnyhowError> for RaisedError {
    fn from(error: &AnyhowError) -> Self {
        Self::from_anyhow(error)
    }
}

/// Decides which [`ErrorKind`] a Rust error belongs to.
pub trait ErrorClassifier {
    /// Classifies a single error, ignoring its sources.
    fn classify(&self, error: &(dyn StdError + 'static)) -> ErrorKind;
}

/// Recognizes [`DomainError`] and [`InvocationError`]; everything else is `Other`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClassifier;

impl ErrorClassifier for DefaultClassifier {
    fn classify(&self, error: &(dyn StdError + 'static)) -> ErrorKind {
        if error.is::<DomainError>() {
            ErrorKind::Domain
        } else if error.is::<InvocationError>() {
            ErrorKind::Wrapper
        } else {
            ErrorKind::Other
        }
    }
}

fn convert_node(error: &(dyn StdError + 'static), classifier: &dyn ErrorClassifier) -> RaisedError {
    let display = error.to_string();
    match classifier.classify(error) {
        ErrorKind::Domain => RaisedError::domain(display),
        ErrorKind::Wrapper => RaisedError::wrapper(display, None),
        ErrorKind::Other => {
            let message = (!display.is_empty()).then_some(display);
            RaisedError::other(format!("{error:?}"), message)
        }
    }
}
