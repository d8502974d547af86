//! Standalone application hosting a single error dialog.
//!
//! This module implements the `ErrorDialogApplication` used by the
//! launcher binary. The application quits once the dialog is closed.

use std::sync::Arc;

use {
    libadwaita::{
        Application,
        gio::ApplicationFlags,
        glib::ExitCode,
        gtk::Window as GtkWindow,
        prelude::{ApplicationExt, ApplicationExtManual, GtkWindowExt},
    },
    tracing::{debug, info, warn},
};

use crate::{
    config::{SettingsError, SettingsManager},
    report::request::ErrorRequest,
    ui::error_dialog::ErrorDialog,
};

/// Application ID registered with the session.
pub const APPLICATION_ID: &str = "io.github.errdialog";

/// Application showing one error report.
pub struct ErrorDialogApplication {
    /// The main application instance.
    pub app: Application,
    /// Error shown on activation.
    pub request: ErrorRequest,
    /// Settings manager shared with the dialog.
    pub settings: Arc<SettingsManager>,
}

impl ErrorDialogApplication {
    /// Creates a new application with settings loaded from the XDG config dir.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the settings file exists but cannot be read.
    pub fn new(request: ErrorRequest) -> Result<Self, SettingsError> {
        Ok(Self::with_settings(request, Arc::new(SettingsManager::new()?)))
    }

    /// Creates a new application with the given settings manager.
    pub fn with_settings(request: ErrorRequest, settings: Arc<SettingsManager>) -> Self {
        // Every launch reports its own error, so instances must not merge.
        let app = Application::builder()
            .application_id(APPLICATION_ID)
            .flags(ApplicationFlags::NON_UNIQUE)
            .build();

        Self {
            app,
            request,
            settings,
        }
    }

    /// Runs the GTK main loop until the dialog is closed.
    pub fn run(&self) -> ExitCode {
        self.app.connect_activate({
            let request = self.request.clone();
            let settings = self.settings.clone();

            move |app| {
                info!(title = %request.title, "Showing error dialog");
                let dialog = ErrorDialog::new(None::<&GtkWindow>, &request, settings.clone());
                dialog.window.set_application(Some(app));
                dialog.present();
            }
        });

        // Command line arguments belong to the launcher, not to GApplication.
        self.app.run_with_args::<&str>(&[])
    }
}

/// Logs how the main loop ended and passes the status on to the process.
pub fn log_exit_code(exit_code: ExitCode) -> ExitCode {
    if exit_code == ExitCode::SUCCESS {
        debug!("Error dialog closed");
    } else {
        warn!(code = u8::from(exit_code), "Error dialog exited with failure");
    }
    exit_code
}

#[cfg(test)]
mod tests {
    use libadwaita::glib::ExitCode;

    use crate::ui::application::log_exit_code;

    #[test]
    fn test_log_exit_code_preserves_status() {
        assert_eq!(log_exit_code(ExitCode::SUCCESS), ExitCode::SUCCESS);
        assert_eq!(u8::from(log_exit_code(ExitCode::from(3))), 3);
    }
}
