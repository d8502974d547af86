//! Modal error dialog with an expandable details window.
//!
//! The dialog shows the caller's message as a bold heading and the
//! extracted display message in a read-only box below it. The Details
//! button opens the full trace. Closing the dialog by any path stores its
//! geometry, which is restored the next time it opens.

use std::sync::Arc;

use {
    libadwaita::{
        HeaderBar, ToolbarView, Window,
        glib::Propagation,
        gtk::{
            Align::{Center, Start},
            Box as GtkBox, Button, Label,
            Orientation::{Horizontal, Vertical},
            ScrolledWindow, TextView, Window as GtkWindow, WrapMode,
        },
        prelude::{
            BoxExt, ButtonExt, GtkWindowExt, IsA, ObjectExt, TextBufferExt, TextViewExt,
        },
    },
    tracing::{debug, warn},
};

use crate::{
    config::{SettingsManager, WindowGeometry},
    report::{
        extractor::{ExtractionResult, MessageExtractor},
        request::ErrorRequest,
    },
    ui::details_dialog::DetailsDialog,
};

/// Settings key of the error dialog's geometry.
pub const ERROR_DIALOG_KEY: &str = "error-dialog";

/// Error dialog built from an `ErrorRequest`.
pub struct ErrorDialog {
    /// The dialog window.
    pub window: Window,
    /// Heading with the caller's message.
    pub message_label: Label,
    /// Read-only view with the extracted display message.
    pub description: TextView,
    /// Button closing the dialog.
    pub ok_button: Button,
    /// Button opening the details window; insensitive without details.
    pub details_button: Button,
    result: ExtractionResult,
}

impl ErrorDialog {
    /// Creates a new error dialog.
    ///
    /// # Arguments
    ///
    /// * `parent` - Window the dialog is modal for, if any
    /// * `request` - Title, message and raised error to show
    /// * `settings` - Settings manager providing labels and geometry
    ///
    /// # Returns
    ///
    /// A new `ErrorDialog` instance, not yet presented.
    pub fn new(
        parent: Option<&impl IsA<GtkWindow>>,
        request: &ErrorRequest,
        settings: Arc<SettingsManager>,
    ) -> Self {
        let result = request.extract(&MessageExtractor::default());
        let labels = settings.get_settings().labels.clone();
        let geometry = settings.window_geometry(ERROR_DIALOG_KEY);

        let message_label = Label::builder()
            .label(request.message_or_default())
            .halign(Start)
            .xalign(0.0)
            .wrap(true)
            .css_classes(vec!["title-4".to_string()])
            .build();

        let description = TextView::builder()
            .editable(false)
            .cursor_visible(false)
            .wrap_mode(WrapMode::WordChar)
            .top_margin(6)
            .bottom_margin(6)
            .left_margin(6)
            .right_margin(6)
            .build();
        description.buffer().set_text(result.display_message());

        let scrolled_window = ScrolledWindow::builder()
            .hexpand(true)
            .vexpand(true)
            .child(&description)
            .css_classes(vec!["card".to_string()])
            .build();

        let ok_button = Button::builder()
            .label(labels.ok_button.as_str())
            .css_classes(vec!["suggested-action".to_string()])
            .build();
        let details_button = Button::builder()
            .label(labels.details_button.as_str())
            .sensitive(!result.detail_text().is_empty())
            .build();

        let button_row = GtkBox::builder()
            .orientation(Horizontal)
            .spacing(12)
            .halign(Center)
            .build();
        button_row.append(&ok_button);
        button_row.append(&details_button);

        let content = GtkBox::builder()
            .orientation(Vertical)
            .spacing(12)
            .margin_top(12)
            .margin_bottom(12)
            .margin_start(12)
            .margin_end(12)
            .build();
        content.append(&message_label);
        content.append(&scrolled_window);
        content.append(&button_row);

        let toolbar_view = ToolbarView::new();
        toolbar_view.add_top_bar(&HeaderBar::new());
        toolbar_view.set_content(Some(&content));

        let window = Window::builder()
            .title(request.title.as_str())
            .modal(true)
            .default_width(geometry.width)
            .default_height(geometry.height)
            .content(&toolbar_view)
            .build();
        window.set_transient_for(parent);
        if geometry.maximized {
            window.maximize();
        }
        window.set_default_widget(Some(&ok_button));
        window.set_focus(Some(&ok_button));

        ok_button.connect_clicked({
            let window_weak = window.downgrade();
            move |_| {
                if let Some(window) = window_weak.upgrade() {
                    window.close();
                }
            }
        });

        details_button.connect_clicked({
            let window_weak = window.downgrade();
            let details = result.detail_text().to_string();
            move |_| {
                if let Some(window) = window_weak.upgrade() {
                    DetailsDialog::new(Some(&window), &labels, &details).present();
                }
            }
        });

        window.connect_close_request(move |window| {
            persist_geometry(window, &settings);
            Propagation::Proceed
        });

        debug!(
            display_message = result.display_message(),
            "ErrorDialog: Created"
        );

        Self {
            window,
            message_label,
            description,
            ok_button,
            details_button,
            result,
        }
    }

    /// Texts the dialog was built from.
    pub fn result(&self) -> &ExtractionResult {
        &self.result
    }

    /// Shows the dialog.
    pub fn present(&self) {
        self.window.present();
    }
}

/// Stores the current size of `window`; failures are logged, never shown.
fn persist_geometry(window: &Window, settings: &SettingsManager) {
    let (width, height) = window.default_size();
    let geometry = WindowGeometry {
        width,
        height,
        maximized: window.is_maximized(),
    };
    if let Err(e) = settings.remember_window_geometry(ERROR_DIALOG_KEY, geometry) {
        warn!(error = %e, "Failed to persist error dialog geometry");
    }
}
