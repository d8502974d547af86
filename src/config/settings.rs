//! Dialog preference management with XDG Base Directory compliance.
//!
//! This module persists the geometry each dialog had when it was last
//! closed, together with the labels shown on the dialog.

use std::{
    collections::BTreeMap,
    env::var,
    fs::{create_dir_all, read_to_string, write},
    io::Error as StdError,
    path::PathBuf,
};

use {
    parking_lot::{RwLock, RwLockReadGuard},
    serde::{Deserialize, Serialize},
    serde_json::{Error as SerdeJsonError, from_str, to_string_pretty},
    thiserror::Error,
    tracing::debug,
};

/// Error type for settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Failed to read or write settings file.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// Failed to serialize or deserialize settings.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] SerdeJsonError),
    /// Invalid settings value.
    #[error("Invalid settings value: {reason}")]
    InvalidValue { reason: String },
}

/// Size and state of a dialog window when it was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    /// Window width in pixels.
    pub width: i32,
    /// Window height in pixels.
    pub height: i32,
    /// Whether the window was maximized.
    #[serde(default)]
    pub maximized: bool,
}

impl WindowGeometry {
    /// Checks that the geometry describes a visible window.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` for non-positive dimensions.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SettingsError::InvalidValue {
                reason: format!("window size {}x{} is not positive", self.width, self.height),
            });
        }
        Ok(())
    }
}

/// Texts shown on the error dialog and its details window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogLabels {
    /// Label of the confirmation button.
    pub ok_button: String,
    /// Label of the button opening the details window.
    pub details_button: String,
    /// Title of the details window.
    pub details_title: String,
    /// Heading shown above the details text.
    pub details_message: String,
}

impl Default for DialogLabels {
    fn default() -> Self {
        Self {
            ok_button: "OK".to_string(),
            details_button: "Details".to_string(),
            details_title: "Error details".to_string(),
            details_message: "Full error description".to_string(),
        }
    }
}

/// Serializable dialog settings structure with default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogSettings {
    /// Last geometry per dialog, keyed by dialog name.
    pub window_geometry: BTreeMap<String, WindowGeometry>,
    /// Geometry used for dialogs without a stored entry.
    pub default_geometry: WindowGeometry,
    /// Dialog labels.
    pub labels: DialogLabels,
}

impl Default for DialogSettings {
    fn default() -> Self {
        Self {
            window_geometry: BTreeMap::new(),
            default_geometry: WindowGeometry {
                width: 600,
                height: 400,
                maximized: false,
            },
            labels: DialogLabels::default(),
        }
    }
}

/// Handles loading, saving, and validation of dialog settings.
#[derive(Debug)]
pub struct SettingsManager {
    /// Thread-safe settings storage.
    settings: RwLock<DialogSettings>,
    /// Path to the configuration file on disk.
    config_path: PathBuf,
}

impl Clone for SettingsManager {
    fn clone(&self) -> Self {
        Self {
            settings: RwLock::new(self.settings.read().clone()),
            config_path: self.config_path.clone(),
        }
    }
}

impl SettingsManager {
    /// Creates a new settings manager with default config path.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if settings cannot be loaded from disk.
    pub fn new() -> Result<Self, SettingsError> {
        Self::with_config_path(get_config_path())
    }

    /// Creates a new settings manager with a custom config path (for testing).
    ///
    /// # Arguments
    ///
    /// * `config_path` - Custom path for the settings file
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if settings cannot be loaded from disk.
    pub fn with_config_path(config_path: PathBuf) -> Result<Self, SettingsError> {
        if let Some(parent) = config_path.parent() {
            create_dir_all(parent)?;
        }

        let settings = if config_path.exists() {
            debug!("Loading settings from existing file: {:?}", config_path);
            let contents = read_to_string(&config_path)?;
            from_str(&contents)?
        } else {
            debug!("Using default settings, no file at: {:?}", config_path);
            DialogSettings::default()
        };

        Ok(SettingsManager {
            settings: RwLock::new(settings),
            config_path,
        })
    }

    /// Gets the current settings.
    pub fn get_settings(&self) -> RwLockReadGuard<'_, DialogSettings> {
        self.settings.read()
    }

    /// Gets the configuration file path.
    pub fn get_config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Updates the settings and saves them to disk.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if any geometry is invalid or the settings
    /// cannot be saved to disk.
    pub fn update_settings(&self, new_settings: DialogSettings) -> Result<(), SettingsError> {
        new_settings.default_geometry.validate()?;
        for geometry in new_settings.window_geometry.values() {
            geometry.validate()?;
        }

        let mut settings_write = self.settings.write();
        *settings_write = new_settings;
        drop(settings_write);
        self.save_settings()
    }

    /// Geometry to open the named dialog with.
    ///
    /// Falls back to the default geometry when none was stored.
    pub fn window_geometry(&self, dialog: &str) -> WindowGeometry {
        let settings = self.settings.read();
        settings
            .window_geometry
            .get(dialog)
            .copied()
            .unwrap_or(settings.default_geometry)
    }

    /// Stores the geometry of the named dialog and saves to disk.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if the geometry is invalid or cannot be saved.
    pub fn remember_window_geometry(
        &self,
        dialog: &str,
        geometry: WindowGeometry,
    ) -> Result<(), SettingsError> {
        geometry.validate()?;
        debug!(dialog, ?geometry, "Remembering window geometry");
        self.settings
            .write()
            .window_geometry
            .insert(dialog.to_string(), geometry);
        self.save_settings()
    }

    /// Saves the current settings to disk.
    fn save_settings(&self) -> Result<(), SettingsError> {
        debug!("Saving settings to file: {:?}", self.config_path);
        let contents = to_string_pretty(&*self.settings.read())?;
        write(&self.config_path, contents)?;
        Ok(())
    }
}

/// Ensures proper XDG directory usage for the config file.
///
/// # Returns
///
/// The path to the configuration file.
#[must_use]
pub fn get_config_path() -> PathBuf {
    let mut config_dir = get_xdg_config_home();
    config_dir.push("errdialog");
    config_dir.push("settings.json");
    config_dir
}

/// Gets the XDG config home directory following XDG Base Directory specification.
///
/// Uses `XDG_CONFIG_HOME` environment variable if set, otherwise defaults to $HOME/.config
fn get_xdg_config_home() -> PathBuf {
    if let Ok(config_home) = var("XDG_CONFIG_HOME")
        && !config_home.is_empty()
    {
        return PathBuf::from(config_home);
    }

    if let Ok(home) = var("HOME") {
        let mut path = PathBuf::from(home);
        path.push(".config");
        return path;
    }

    PathBuf::from(".")
}
