//! Error reporting core: the raised error model, message extraction and
//! trace rendering.
//!
//! Nothing in this module touches the UI; the dialog and the terminal
//! renderer both consume an `ExtractionResult`.

pub mod extractor;
pub mod raised;
pub mod request;
pub mod trace;

pub use {
    extractor::{DEFAULT_MAX_CAUSE_DEPTH, ExtractionResult, MessageExtractor, extract},
    raised::{DefaultClassifier, ErrorClassifier, ErrorKind, ErrorNode, RaisedError},
    request::ErrorRequest,
    trace::{render_trace, render_trace_with_depth},
};

/// Identity of a chain node, used to detect revisits.
///
/// Both the data address and the vtable take part: a cause embedded at
/// offset zero of its parent, or a zero-sized cause, shares the parent's
/// address but not its vtable. Duplicated vtables can hide a revisit; the
/// depth cap still bounds such walks.
pub(crate) fn identity<'a>(node: &'a (dyn ErrorNode + 'a)) -> *const (dyn ErrorNode + 'a) {
    std::ptr::from_ref(node)
}
