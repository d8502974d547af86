//! Errdialog - error reporting dialogs
//!
//! Turns raised errors into the two texts an error dialog needs: a short,
//! never-empty display message and the full trace for a details view. The
//! extraction core is a pure function over an error chain; a Libadwaita
//! dialog and a plain-text renderer present its output.

pub mod config;
pub mod error;
pub mod report;
pub mod ui;

// Re-export key types for convenience
pub use {
    config::{DialogLabels, DialogSettings, SettingsManager, WindowGeometry},
    error::{DomainError, ErrorReporter, InvocationError, UiError},
    report::{
        ErrorKind, ErrorNode, ErrorRequest, ExtractionResult, MessageExtractor, RaisedError,
        extract, render_trace,
    },
    ui::{ErrorDialog, ErrorDialogApplication},
};
