//! Dialog settings and persistent window state.
//!
//! This module provides preference management with XDG Base Directory
//! compliance and persistent geometry handling.

pub mod settings;

pub use settings::{
    DialogLabels, DialogSettings, SettingsError, SettingsManager, WindowGeometry, get_config_path,
};
