//! Plain-text rendering of an error report for terminals and logs.

use std::fmt::Write;

use crate::report::{extractor::ExtractionResult, request::ErrorRequest};

/// Formats `request` and its extracted texts as a plain-text report.
///
/// The details section is left out when there is no trace.
#[must_use]
pub fn render_report(request: &ErrorRequest, result: &ExtractionResult) -> String {
    let mut out = String::new();
    let message = request.message_or_default();
    let _ = writeln!(out, "{}: {}", request.title, message);
    if result.display_message() != message {
        let _ = writeln!(out, "{}", result.display_message());
    }
    if !result.detail_text().is_empty() {
        out.push('\n');
        out.push_str(result.detail_text());
    }
    out
}
