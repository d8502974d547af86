//! Read-only window showing the full error trace.

use {
    libadwaita::{
        HeaderBar, ToolbarView, Window,
        gtk::{
            Align::Start, Box as GtkBox, Label, Orientation::Vertical, ScrolledWindow, TextView,
            Window as GtkWindow, WrapMode,
        },
        prelude::{BoxExt, GtkWindowExt, IsA, TextBufferExt, TextViewExt},
    },
    tracing::debug,
};

use crate::config::DialogLabels;

/// Window with a heading and a non-editable, scrollable text view.
pub struct DetailsDialog {
    /// The details window.
    pub window: Window,
    /// View holding the trace text.
    pub text_view: TextView,
}

impl DetailsDialog {
    /// Creates the details window.
    ///
    /// # Arguments
    ///
    /// * `parent` - Window the details are shown for, if any
    /// * `labels` - Title and heading texts
    /// * `details` - Full trace text
    pub fn new(parent: Option<&impl IsA<GtkWindow>>, labels: &DialogLabels, details: &str) -> Self {
        let heading = Label::builder()
            .label(labels.details_message.as_str())
            .halign(Start)
            .xalign(0.0)
            .css_classes(vec!["heading".to_string()])
            .build();

        let text_view = TextView::builder()
            .editable(false)
            .cursor_visible(false)
            .monospace(true)
            .wrap_mode(WrapMode::None)
            .top_margin(6)
            .bottom_margin(6)
            .left_margin(6)
            .right_margin(6)
            .build();
        text_view.buffer().set_text(details);

        let scrolled_window = ScrolledWindow::builder()
            .hexpand(true)
            .vexpand(true)
            .child(&text_view)
            .css_classes(vec!["card".to_string()])
            .build();

        let content = GtkBox::builder()
            .orientation(Vertical)
            .spacing(12)
            .margin_top(12)
            .margin_bottom(12)
            .margin_start(12)
            .margin_end(12)
            .build();
        content.append(&heading);
        content.append(&scrolled_window);

        let toolbar_view = ToolbarView::new();
        toolbar_view.add_top_bar(&HeaderBar::new());
        toolbar_view.set_content(Some(&content));

        let window = Window::builder()
            .title(labels.details_title.as_str())
            .modal(true)
            .default_width(700)
            .default_height(500)
            .content(&toolbar_view)
            .build();
        window.set_transient_for(parent);

        debug!(length = details.len(), "DetailsDialog: Created");

        Self { window, text_view }
    }

    /// Shows the details window.
    pub fn present(&self) {
        self.window.present();
    }
}
