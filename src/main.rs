//! Errdialog - error dialog launcher
//!
//! Shows an error dialog for a report handed over by another process.
//!
//! Usage: `errdialog [TITLE] [MESSAGE] < request.json`
//!
//! When stdin is not a terminal it is read as a JSON `ErrorRequest`; the
//! positional arguments override its title and message. Without a display
//! the report is printed to stderr instead.

use std::{
    env::args,
    io::{IsTerminal, Read, stdin},
    process::ExitCode,
};

use {
    anyhow::{Error, Result},
    tracing_subscriber::EnvFilter,
};

use errdialog::{
    ErrorDialogApplication, ErrorReporter, ErrorRequest, MessageExtractor, UiError,
    config::get_config_path,
    error::ResultExt,
    report::request::{DEFAULT_MESSAGE, DEFAULT_TITLE},
    ui::{application::log_exit_code, render_report},
};

/// Main entry point for the launcher.
///
/// Exits with the status of the GTK main loop.
fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let request = read_request()?;

    if let Err(e) = libadwaita::init().map_err(|e| UiError::InitializationError(e.to_string())) {
        ErrorReporter::warn(&Error::new(e), "No display available, printing report");
        let result = request.extract(&MessageExtractor::default());
        eprint!("{}", render_report(&request, &result));
        return Ok(ExitCode::SUCCESS);
    }

    let app = ErrorDialogApplication::new(request)
        .add_contextf(format!("Failed to load settings from {:?}", get_config_path()))?;
    Ok(log_exit_code(app.run()).into())
}

/// Builds the request from stdin and the command line.
fn read_request() -> Result<ErrorRequest> {
    let mut input = stdin();
    let mut request = if input.is_terminal() {
        ErrorRequest::new(DEFAULT_TITLE, DEFAULT_MESSAGE)
    } else {
        let mut json = String::new();
        input
            .read_to_string(&mut json)
            .add_context("Failed to read error request from stdin")?;
        if json.trim().is_empty() {
            ErrorRequest::new(DEFAULT_TITLE, DEFAULT_MESSAGE)
        } else {
            ErrorRequest::from_json(&json).add_context("Failed to parse error request")?
        }
    };

    let mut positional = args().skip(1);
    if let Some(title) = positional.next() {
        request.title = title;
    }
    if let Some(message) = positional.next() {
        request.message = message;
    }

    // An empty MESSAGE argument must not blank out the dialog.
    Ok(request.normalized())
}
