//! Full textual trace of an error chain for the "details" view.
//!
//! The layout follows the classic printed stack trace: the top-level error,
//! its frames, then one `Caused by:` section per cause.

use std::{collections::HashSet, fmt::Write};

use crate::report::{extractor::DEFAULT_MAX_CAUSE_DEPTH, identity, raised::ErrorNode};

/// Prefix of every cause section header.
pub const CAUSED_BY: &str = "Caused by: ";

/// Renders the full trace of `error` and all of its causes.
#[must_use]
pub fn render_trace(error: &dyn ErrorNode) -> String {
    render_trace_with_depth(error, DEFAULT_MAX_CAUSE_DEPTH)
}

/// Renders the full trace, following at most `max_depth` causes.
///
/// A node that appears twice ends the output with a circular reference marker.
#[must_use]
pub fn render_trace_with_depth(error: &dyn ErrorNode, max_depth: usize) -> String {
    let mut out = String::new();
    let mut seen = HashSet::new();
    let mut current = Some(error);
    let mut depth = 0;

    while let Some(node) = current {
        if !seen.insert(identity(node)) {
            let _ = writeln!(out, "\t[CIRCULAR REFERENCE: {}]", node.representation());
            break;
        }
        if depth > max_depth {
            out.push_str("\t... (cause chain truncated)\n");
            break;
        }

        if depth > 0 {
            out.push_str(CAUSED_BY);
        }
        let _ = writeln!(out, "{}", node.representation());
        if let Some(trace) = node.trace().filter(|trace| !trace.is_empty()) {
            out.push_str(trace);
            if !trace.ends_with('\n') {
                out.push('\n');
            }
        }

        current = node.cause();
        depth += 1;
    }

    out
}
