//! Command / event seam between the host window and the overlay engine.
//!
//! Both directions flow over `tokio::sync::mpsc` channels.  The host sends
//! [`EngineCommand`]s (dataset selection, settings changes, hover pause,
//! layout measurements); the engine emits [`EngineEvent`]s whenever the
//! committed display changes.

use crate::config::{ColumnSettings, OverlayConfig};
use crate::record::Record;

/// Commands delivered from the host to the engine.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// The user selected a dataset; fetch it through the record source and
    /// restart playback from index 0.
    SelectDataset(String),

    /// Replace the record set directly (dataset already fetched by the
    /// host).  Empty sets stop playback and clear the display.
    LoadRecords(Vec<Record>),

    /// Settings changed: apply the new snapshot and re-render the current
    /// record in place, without restarting playback.
    Reconfigure {
        overlay: OverlayConfig,
        columns: ColumnSettings,
    },

    /// Pointer entered the overlay (or it lost focus): freeze the index and
    /// silence speech.
    Pause,

    /// Pointer left the overlay: resume ticking from a fresh full interval.
    Resume,

    /// The host laid out the committed display lines and measured the
    /// content box.  Drives the resize reporter when auto-resize is on.
    ContentMeasured { width: f32, height: f32 },

    /// Tear the engine down.
    Shutdown,
}

/// Events delivered from the engine to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A new generation's display lines were committed.
    DisplayChanged { lines: Vec<String> },

    /// The record set became empty; the overlay should show nothing.
    DisplayCleared,
}
