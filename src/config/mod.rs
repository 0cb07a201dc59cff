//! Configuration module for the glance overlay.
//!
//! Provides `AppConfig` (top-level settings), `OverlayConfig` (playback and
//! rendering), `ColumnSettings` (per-column show / speak / voice), `AppPaths`
//! for cross-platform data directories, and TOML persistence via
//! `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, ColumnSetting, ColumnSettings, OverlayConfig, PlaybackOrder};
