//! Speech module — voices, tasks and the sequencer.
//!
//! This module provides:
//! * [`Voice`] / [`VoiceDirectory`] / [`resolve_voice`] — live voice lookup
//!   with first-available fallback.
//! * [`SpeechTask`] / [`build_speech_tasks`] — the ordered, markup-free task
//!   list for one record.
//! * [`SpeechEngine`] — async trait over the platform synthesiser.
//! * [`SpeechSequencer`] — plays a generation's tasks in order, hard-
//!   cancelling the previous generation first.

pub mod sequencer;
pub mod task;
pub mod voice;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use sequencer::{SpeechEngine, SpeechError, SpeechParams, SpeechSequencer};
pub use task::{build_speech_tasks, SpeechTask};
pub use voice::{resolve_voice, StaticVoiceDirectory, Voice, VoiceDirectory};
