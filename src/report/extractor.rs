//! Display message extraction from raised errors.
//!
//! The extractor turns an error chain into the two texts an error dialog
//! shows: a short message for the label and the full trace for the details
//! view. Precedence, most specific first:
//!
//! 1. the message of a domain error;
//! 2. for a wrapper error, the first cause in its chain that yields a
//!    non-empty message or representation;
//! 3. the message of any other error;
//! 4. the caller-supplied fallback.
//!
//! An empty string never counts as a message.

use std::collections::HashSet;

use {
    serde::{Deserialize, Serialize},
    tracing::debug,
};

use crate::report::{
    identity,
    raised::{ErrorKind, ErrorNode},
    trace::render_trace_with_depth,
};

/// Default number of causes followed before the walk gives up.
pub const DEFAULT_MAX_CAUSE_DEPTH: usize = 64;

/// Texts derived from a raised error for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    display_message: String,
    detail_text: String,
}

impl ExtractionResult {
    fn new(display_message: String, detail_text: String) -> Self {
        Self {
            display_message,
            detail_text,
        }
    }

    /// Short message for the dialog's description.
    #[must_use]
    pub fn display_message(&self) -> &str {
        &self.display_message
    }

    /// Full rendered trace for the details view; empty when there was no error.
    #[must_use]
    pub fn detail_text(&self) -> &str {
        &self.detail_text
    }

    /// Consumes the result, returning `(display_message, detail_text)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.display_message, self.detail_text)
    }
}

/// Extracts display texts from error chains.
///
/// The extraction is pure and total: it performs no I/O and never fails,
/// and a cause chain that loops back on itself is walked only once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageExtractor {
    max_cause_depth: usize,
}

impl Default for MessageExtractor {
    fn default() -> Self {
        Self {
            max_cause_depth: DEFAULT_MAX_CAUSE_DEPTH,
        }
    }
}

impl MessageExtractor {
    /// Creates an extractor with the default depth limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits how many causes are followed, both when searching for a
    /// message and when rendering the trace.
    #[must_use]
    pub fn with_max_cause_depth(mut self, max_cause_depth: usize) -> Self {
        self.max_cause_depth = max_cause_depth;
        self
    }

    /// Configured depth limit.
    #[must_use]
    pub fn max_cause_depth(&self) -> usize {
        self.max_cause_depth
    }

    /// Derives the display message and detail text for `error`.
    ///
    /// # Arguments
    ///
    /// * `error` - The raised error, or `None` when the caller has only a message
    /// * `fallback_message` - Shown whenever no message can be derived from the error
    ///
    /// # Returns
    ///
    /// The `ExtractionResult` for the dialog.
    #[must_use]
    pub fn extract(&self, error: Option<&dyn ErrorNode>, fallback_message: &str) -> ExtractionResult {
        let Some(error) = error else {
            return ExtractionResult::new(fallback_message.to_owned(), String::new());
        };

        let display_message = match self.display_message(error) {
            Some(message) => message,
            None => {
                debug!(kind = ?error.kind(), "No message in error chain, using fallback");
                fallback_message.to_owned()
            }
        };

        ExtractionResult::new(
            display_message,
            render_trace_with_depth(error, self.max_cause_depth),
        )
    }

    fn display_message(&self, error: &dyn ErrorNode) -> Option<String> {
        match error.kind() {
            ErrorKind::Domain | ErrorKind::Other => informative(error.message()),
            ErrorKind::Wrapper => {
                let cause = error.cause()?;
                if cause.kind() == ErrorKind::Domain {
                    informative(cause.message())
                } else {
                    self.first_informative_cause(error, cause)
                }
            }
        }
    }

    /// Walks the chain from `cause` and returns the text of the first node
    /// that has any, preferring its message over its representation.
    fn first_informative_cause(
        &self,
        wrapper: &dyn ErrorNode,
        cause: &dyn ErrorNode,
    ) -> Option<String> {
        let mut seen = HashSet::from([identity(wrapper)]);
        let mut current = Some(cause);
        let mut depth = 0;

        while let Some(node) = current {
            if depth >= self.max_cause_depth || !seen.insert(identity(node)) {
                debug!(depth, "Stopped walking cause chain");
                return None;
            }

            let text = informative(node.message())
                .or_else(|| informative(Some(node.representation().as_ref())));
            if text.is_some() {
                return text;
            }

            current = node.cause();
            depth += 1;
        }

        None
    }
}

/// Derives the display message and detail text with the default extractor.
///
/// # Arguments
///
/// * `error` - The raised error, or `None` when the caller has only a message
/// * `fallback_message` - Shown whenever no message can be derived from the error
#[must_use]
pub fn extract(error: Option<&dyn ErrorNode>, fallback_message: &str) -> ExtractionResult {
    MessageExtractor::default().extract(error, fallback_message)
}

fn informative(text: Option<&str>) -> Option<String> {
    text.filter(|text| !text.is_empty()).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use std::{borrow::Cow, cell::Cell};

    use crate::report::{
        extractor::{ExtractionResult, MessageExtractor, extract},
        raised::{ErrorKind, ErrorNode, RaisedError},
        trace::render_trace,
    };

    const FALLBACK: &str = "Unhandled";

    struct Looping<'a> {
        kind: ErrorKind,
        representation: &'static str,
        next: Cell<Option<&'a Looping<'a>>>,
    }

    impl<'a> Looping<'a> {
        fn new(kind: ErrorKind, representation: &'static str) -> Self {
            Self {
                kind,
                representation,
                next: Cell::new(None),
            }
        }
    }

    impl ErrorNode for Looping<'_> {
        fn kind(&self) -> ErrorKind {
            self.kind
        }

        fn message(&self) -> Option<&str> {
            None
        }

        fn representation(&self) -> Cow<'_, str> {
            Cow::Borrowed(self.representation)
        }

        fn trace(&self) -> Option<&str> {
            None
        }

        fn cause(&self) -> Option<&dyn ErrorNode> {
            self.next.get().map(|next| next as &dyn ErrorNode)
        }
    }

    struct IoFailure {
        message: &'static str,
    }

    impl ErrorNode for IoFailure {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }

        fn message(&self) -> Option<&str> {
            Some(self.message)
        }

        fn representation(&self) -> Cow<'_, str> {
            Cow::Borrowed("Io")
        }

        fn trace(&self) -> Option<&str> {
            None
        }

        fn cause(&self) -> Option<&dyn ErrorNode> {
            None
        }
    }

    /// Wrapper holding its cause by value as the first field.
    #[repr(C)]
    struct Invocation<C> {
        cause: C,
        target: &'static str,
    }

    impl<C: ErrorNode> ErrorNode for Invocation<C> {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Wrapper
        }

        fn message(&self) -> Option<&str> {
            None
        }

        fn representation(&self) -> Cow<'_, str> {
            Cow::Borrowed(self.target)
        }

        fn trace(&self) -> Option<&str> {
            None
        }

        fn cause(&self) -> Option<&dyn ErrorNode> {
            Some(&self.cause)
        }
    }

    struct Unnamed;

    impl ErrorNode for Unnamed {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }

        fn message(&self) -> Option<&str> {
            None
        }

        fn representation(&self) -> Cow<'_, str> {
            Cow::Borrowed("Unnamed")
        }

        fn trace(&self) -> Option<&str> {
            None
        }

        fn cause(&self) -> Option<&dyn ErrorNode> {
            None
        }
    }

    fn display(error: &RaisedError) -> String {
        extract(Some(error), FALLBACK).display_message().to_owned()
    }

    #[test]
    fn test_no_error_uses_fallback() {
        for fallback in ["Unable to save", "", "Ошибка"] {
            let result = extract(None, fallback);
            assert_eq!(result.display_message(), fallback);
            assert_eq!(result.detail_text(), "");
        }
    }

    #[test]
    fn test_domain_error_message() {
        let error = RaisedError::domain("Database connection failed")
            .caused_by(RaisedError::other("java.net.ConnectException", Some("refused".into())));
        assert_eq!(display(&error), "Database connection failed");
    }

    #[test]
    fn test_wrapper_around_domain_error() {
        let error = RaisedError::wrapper(
            "InvocationTargetException",
            Some(RaisedError::domain("Step configuration is invalid")),
        );
        assert_eq!(display(&error), "Step configuration is invalid");
    }

    #[test]
    fn test_wrapper_around_plain_error_message() {
        let error = RaisedError::wrapper(
            "InvocationTargetException",
            Some(RaisedError::other("java.io.IOException", Some("No space left".into()))),
        );
        assert_eq!(display(&error), "No space left");
    }

    #[test]
    fn test_wrapper_around_message_less_error_uses_representation() {
        let error = RaisedError::wrapper(
            "InvocationTargetException",
            Some(
                RaisedError::other("java.lang.NullPointerException", None)
                    .caused_by(RaisedError::other("Deeper", Some("not reached".into()))),
            ),
        );
        assert_eq!(display(&error), "java.lang.NullPointerException");
    }

    #[test]
    fn test_wrapper_skips_causes_without_any_text() {
        let error = RaisedError::wrapper(
            "InvocationTargetException",
            Some(
                RaisedError::other("", Some(String::new()))
                    .caused_by(RaisedError::other("Root", Some("disk failure".into()))),
            ),
        );
        assert_eq!(display(&error), "disk failure");
    }

    #[test]
    fn test_wrapper_around_empty_domain_error_falls_back() {
        let error = RaisedError::wrapper("InvocationTargetException", Some(RaisedError::domain("")));
        assert_eq!(display(&error), FALLBACK);
    }

    #[test]
    fn test_wrapper_without_cause() {
        let error = RaisedError::wrapper("InvocationTargetException", None)
            .with_trace("\tat Method.invoke");
        let result = extract(Some(&error), FALLBACK);

        assert_eq!(result.display_message(), FALLBACK);
        assert_eq!(result.detail_text(), render_trace(&error));
        assert_eq!(result.detail_text(), "InvocationTargetException\n\tat Method.invoke\n");
    }

    #[test]
    fn test_wrapper_with_silent_chain_falls_back() {
        let error = RaisedError::wrapper(
            "InvocationTargetException",
            Some(RaisedError::other("", None).caused_by(RaisedError::other("", None))),
        );
        assert_eq!(display(&error), FALLBACK);
    }

    #[test]
    fn test_other_error_message() {
        let error = RaisedError::other("java.lang.RuntimeException", Some("Out of memory".into()));
        assert_eq!(display(&error), "Out of memory");
    }

    #[test]
    fn test_empty_message_is_not_a_message() {
        let other = RaisedError::other("java.lang.RuntimeException", Some(String::new()));
        assert_eq!(display(&other), FALLBACK);

        let domain = RaisedError::domain("");
        assert_eq!(display(&domain), FALLBACK);
    }

    #[test]
    fn test_other_error_without_message_ignores_cause() {
        let error = RaisedError::other("java.lang.RuntimeException", None)
            .caused_by(RaisedError::domain("hidden"));
        assert_eq!(display(&error), FALLBACK);
    }

    #[test]
    fn test_detail_text_is_independent_of_branch() {
        let errors = [
            RaisedError::domain("a").with_trace("\tat A.a"),
            RaisedError::wrapper("W", Some(RaisedError::domain("b"))).with_trace("\tat W.w"),
            RaisedError::other("O", None).with_trace("\tat O.o"),
        ];
        for error in &errors {
            assert_eq!(extract(Some(error), FALLBACK).detail_text(), render_trace(error));
        }
    }

    #[test]
    fn test_cyclic_chain_terminates() {
        let wrapper = Looping::new(ErrorKind::Wrapper, "Wrapper");
        let silent = Looping::new(ErrorKind::Other, "");
        wrapper.next.set(Some(&silent));
        silent.next.set(Some(&wrapper));

        let result = extract(Some(&wrapper), FALLBACK);
        assert_eq!(result.display_message(), FALLBACK);
        assert!(result.detail_text().contains("[CIRCULAR REFERENCE: Wrapper]"));
    }

    #[test]
    fn test_depth_limit_stops_walk() {
        let error = RaisedError::wrapper(
            "W",
            Some(
                RaisedError::other("", None)
                    .caused_by(RaisedError::other("", None).caused_by(RaisedError::domain("deep"))),
            ),
        );

        let shallow = MessageExtractor::new().with_max_cause_depth(2);
        assert_eq!(shallow.max_cause_depth(), 2);
        assert_eq!(shallow.extract(Some(&error), FALLBACK).display_message(), FALLBACK);
        assert_eq!(display(&error), "deep");
    }

    #[test]
    fn test_into_parts() {
        let result: ExtractionResult = extract(Some(&RaisedError::domain("boom")), FALLBACK);
        let (message, details) = result.into_parts();
        assert_eq!(message, "boom");
        assert_eq!(details, "boom\n");
    }

    #[test]
    fn test_cause_embedded_at_parent_address() {
        let error = Invocation {
            cause: IoFailure {
                message: "disk full",
            },
            target: "Invoke",
        };

        let result = extract(Some(&error), FALLBACK);
        assert_eq!(result.display_message(), "disk full");
        assert_eq!(result.detail_text(), "Invoke\nCaused by: Io\n");
    }

    #[test]
    fn test_zero_sized_cause_is_not_a_revisit() {
        let error = Invocation {
            cause: Unnamed,
            target: "Invoke",
        };

        let result = extract(Some(&error), FALLBACK);
        assert_eq!(result.display_message(), "Unnamed");
        assert!(!result.detail_text().contains("CIRCULAR REFERENCE"));
    }
}
