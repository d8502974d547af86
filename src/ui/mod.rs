//! User-facing presentation of error reports.
//!
//! This module provides the Libadwaita error dialog, its details window,
//! the standalone application used by the launcher, and a plain-text
//! renderer for environments without a display.


pub mod application;
pub mod details_dialog;
pub mod error_dialog;
pub mod terminal;

pub use {
    application::ErrorDialogApplication,
    details_dialog::DetailsDialog,
    error_dialog::{ERROR_DIALOG_KEY, ErrorDialog},
    terminal::render_report,
};
