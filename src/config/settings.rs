//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//!
//! The overlay engine never reads these from disk itself — the host loads an
//! [`AppConfig`] and hands the relevant parts to the engine, re-sending them
//! via a `Reconfigure` command whenever the user changes something.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// PlaybackOrder
// ---------------------------------------------------------------------------

/// How the playback scheduler picks the next record on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackOrder {
    /// `(index + 1) mod count` — visits every record before wrapping.
    Sequential,
    /// Uniform random index on every tick.  Immediate repeats are allowed.
    Random,
}

impl Default for PlaybackOrder {
    fn default() -> Self {
        Self::Sequential
    }
}

// ---------------------------------------------------------------------------
// ColumnSetting
// ---------------------------------------------------------------------------

/// Per-content-column display and speech configuration.
///
/// `index` is a *content* index: column 0 is the first user-imported column,
/// not the record identifier.  Columns with no entry fall back to
/// shown = true, speech = false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSetting {
    /// Content-column index in `[0, N-1]` for a record with N content columns.
    pub index: usize,
    /// Whether the column's value appears in the overlay.
    pub is_shown: bool,
    /// Whether the column's value is narrated aloud.
    pub is_speech: bool,
    /// Persisted voice identifier, `None` when the user never picked one.
    ///
    /// A stale id (voice no longer installed) degrades to the first available
    /// voice at task-build and playback time rather than failing.
    pub voice_id: Option<String>,
}

/// The full set of per-column settings for the active record shape.
///
/// Thin wrapper so lookups resolve the unconfigured-column defaults in one
/// place instead of at every call site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSettings(pub Vec<ColumnSetting>);

impl ColumnSettings {
    /// Whether the content column at `index` is displayed (default true).
    pub fn is_shown(&self, index: usize) -> bool {
        self.get(index).map_or(true, |s| s.is_shown)
    }

    /// Whether the content column at `index` is narrated (default false).
    pub fn is_speech(&self, index: usize) -> bool {
        self.get(index).map_or(false, |s| s.is_speech)
    }

    /// The persisted voice id for `index`, if any.
    pub fn voice_id(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|s| s.voice_id.as_deref())
    }

    fn get(&self, index: usize) -> Option<&ColumnSetting> {
        self.0.iter().find(|s| s.index == index)
    }
}

// ---------------------------------------------------------------------------
// OverlayConfig
// ---------------------------------------------------------------------------

/// Overlay playback and rendering settings.
///
/// Defaults: one record every five seconds, sequential order, joined
/// single line, auto-resize on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Overlay window width in pixels when auto-resize is off.
    pub width: f32,
    /// Overlay window height in pixels when auto-resize is off.
    pub height: f32,
    /// Resize the overlay to fit the rendered content after each change.
    pub auto_resize: bool,
    /// Overlay font size in pixels.
    pub font_size: f32,
    /// Milliseconds between playback ticks.
    pub interval_ms: u64,
    /// Sequential or random record advancement.
    pub order: PlaybackOrder,
    /// `true`: one display line per shown column.  `false`: all shown columns
    /// joined into a single `"{id}. a <sep> b"` line.
    pub break_line: bool,
    /// Separator used between columns in single-line mode.
    pub separator: String,
    /// Overlay background colour as a CSS hex string.
    pub bg_color: String,
    /// Run display text through the transliteration collaborator.
    pub furigana: bool,
    /// Speech pitch multiplier (1.0 = neutral).
    pub pitch: f32,
    /// Speech rate multiplier (1.0 = neutral).
    pub rate: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 34.0,
            auto_resize: true,
            font_size: 14.0,
            interval_ms: 5_000,
            order: PlaybackOrder::Sequential,
            break_line: false,
            separator: "🍠".into(),
            bg_color: "#FFFFFF".into(),
            furigana: false,
            pitch: 1.0,
            rate: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use glance_overlay::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name of the record set currently cycled by the overlay.  Empty until
    /// the user selects one.
    pub selected_dataset: String,
    /// Start the host application at login.
    pub run_on_startup: bool,
    /// Overlay playback / rendering settings.
    pub overlay: OverlayConfig,
    /// Per-column show / speak / voice settings.
    pub columns: ColumnSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            selected_dataset: String::new(),
            run_on_startup: true,
            overlay: OverlayConfig::default(),
            columns: ColumnSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a non-default `AppConfig` survives a TOML round trip.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let mut original = AppConfig::default();
        original.selected_dataset = "n5-vocab".into();
        original.overlay.interval_ms = 2_500;
        original.overlay.order = PlaybackOrder::Random;
        original.overlay.break_line = true;
        original.overlay.separator = " | ".into();
        original.overlay.furigana = true;
        original.columns = ColumnSettings(vec![
            ColumnSetting {
                index: 0,
                is_shown: true,
                is_speech: true,
                voice_id: Some("ja-JP-voice-1".into()),
            },
            ColumnSetting {
                index: 1,
                is_shown: false,
                is_speech: false,
                voice_id: None,
            },
        ]);

        original.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original, loaded);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config, AppConfig::default());
    }

    /// Verify the documented default values.
    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert!(cfg.selected_dataset.is_empty());
        assert!(cfg.run_on_startup);
        assert_eq!(cfg.overlay.interval_ms, 5_000);
        assert_eq!(cfg.overlay.order, PlaybackOrder::Sequential);
        assert!(!cfg.overlay.break_line);
        assert_eq!(cfg.overlay.separator, "🍠");
        assert_eq!(cfg.overlay.font_size, 14.0);
        assert!(cfg.overlay.auto_resize);
        assert!(!cfg.overlay.furigana);
        assert_eq!(cfg.overlay.pitch, 1.0);
        assert_eq!(cfg.overlay.rate, 1.0);
        assert!(cfg.columns.0.is_empty());
    }

    // ---- ColumnSettings defaults ---

    #[test]
    fn unconfigured_column_is_shown_but_silent() {
        let columns = ColumnSettings::default();
        assert!(columns.is_shown(0));
        assert!(!columns.is_speech(0));
        assert!(columns.voice_id(0).is_none());
    }

    #[test]
    fn configured_column_overrides_defaults() {
        let columns = ColumnSettings(vec![ColumnSetting {
            index: 1,
            is_shown: false,
            is_speech: true,
            voice_id: Some("v1".into()),
        }]);

        assert!(columns.is_shown(0)); // untouched column keeps defaults
        assert!(!columns.is_shown(1));
        assert!(columns.is_speech(1));
        assert_eq!(columns.voice_id(1), Some("v1"));
    }
}
