//! Overlay engine module.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      OverlayEngine                         │
//! │                                                            │
//! │  EngineCommand ──▶ run loop ──▶ EngineEvent                │
//! │                      │                                     │
//! │        ┌─────────────┼──────────────┐                      │
//! │        ▼             ▼              ▼                      │
//! │  PlaybackState  TextRenderPipeline  SpeechSequencer        │
//! │  (timer, index) (async, token-     (hard-cancels the       │
//! │                  checked renders)   previous generation)   │
//! │                      │                                     │
//! │                      ▼                                     │
//! │                ResizeReporter ──▶ WindowHost               │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! One [`OverlayEngine`] instance exists per open overlay.  It owns its
//! timer handle and playback state explicitly — there are no module-level
//! singletons — and is torn down by dropping the command sender or sending
//! [`EngineCommand::Shutdown`].

pub mod events;
pub mod playback;
pub mod resize;
pub mod runner;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use events::{EngineCommand, EngineEvent};
pub use playback::PlaybackState;
pub use resize::{ResizeReporter, WindowError, WindowHost};
pub use runner::{Collaborators, OverlayEngine};
