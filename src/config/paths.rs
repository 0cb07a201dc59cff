//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings):
//!   Windows: %APPDATA%\glance-overlay\
//!   macOS:   ~/Library/Application Support/glance-overlay/
//!   Linux:   ~/.config/glance-overlay/
//!
//! Data dir (datasets):
//!   Windows: %LOCALAPPDATA%\glance-overlay\
//!   macOS:   ~/Library/Application Support/glance-overlay/
//!   Linux:   ~/.local/share/glance-overlay/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Directory for imported dataset files (`<dataset>.json`).
    pub datasets_dir: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "glance-overlay";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path (should be extremely rare in practice).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let datasets_dir = data_dir.join("datasets");

        Self {
            config_dir,
            settings_file,
            datasets_dir,
        }
    }

    /// Path of the JSON file backing a named dataset.
    pub fn dataset_file(&self, dataset: &str) -> PathBuf {
        self.datasets_dir.join(format!("{dataset}.json"))
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
