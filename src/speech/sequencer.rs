//! Speech engine trait and the per-generation speech sequencer.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinHandle;

use super::task::SpeechTask;
use super::voice::{resolve_voice, Voice, VoiceDirectory};

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

/// Errors that can occur while speaking one task.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// The synthesiser rejected or aborted the utterance.
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    /// The platform speech engine is not available.
    #[error("speech engine unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// SpeechParams
// ---------------------------------------------------------------------------

/// Prosody parameters applied to every utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechParams {
    /// Pitch multiplier, 1.0 = neutral.
    pub pitch: f32,
    /// Rate multiplier, 1.0 = neutral.
    pub rate: f32,
}

impl Default for SpeechParams {
    fn default() -> Self {
        Self {
            pitch: 1.0,
            rate: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechEngine trait
// ---------------------------------------------------------------------------

/// Async trait over the platform speech synthesiser.
///
/// `speak` resolves when the utterance has finished playing (or failed).
/// `voice` is `None` when no voices are installed; the engine then uses its
/// own default voice.  `cancel_all` must stop anything currently playing or
/// queued — a hard cancel, not a drain.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    async fn speak(
        &self,
        text: &str,
        voice: Option<&Voice>,
        params: &SpeechParams,
    ) -> Result<(), SpeechError>;

    fn cancel_all(&self);
}

// ---------------------------------------------------------------------------
// SpeechSequencer
// ---------------------------------------------------------------------------

/// Plays one record's speech tasks in order, superseding the previous
/// record's speech.
///
/// Each [`play`](Self::play) call starts a new generation: the previous
/// generation's playback task is aborted and the engine hard-cancelled, so
/// at most one record's speech is ever audible — even when two generations
/// carry textually identical tasks (repeated record in random order).
pub struct SpeechSequencer {
    engine: Arc<dyn SpeechEngine>,
    voices: Arc<dyn VoiceDirectory>,
    params: SpeechParams,
    generation: u64,
    current: Option<JoinHandle<()>>,
}

impl SpeechSequencer {
    pub fn new(
        engine: Arc<dyn SpeechEngine>,
        voices: Arc<dyn VoiceDirectory>,
        params: SpeechParams,
    ) -> Self {
        Self {
            engine,
            voices,
            params,
            generation: 0,
            current: None,
        }
    }

    /// Replace prosody parameters for subsequent generations.
    pub fn set_params(&mut self, params: SpeechParams) {
        self.params = params;
    }

    /// Cancel the previous generation and play `tasks` in order.
    ///
    /// Voices are resolved against the live directory per task at playback
    /// time.  A failed task is logged and skipped; remaining tasks still
    /// play.  An empty task list cancels prior speech and plays nothing.
    pub fn play(&mut self, tasks: Vec<SpeechTask>) {
        self.cancel();

        if tasks.is_empty() {
            return;
        }

        self.generation += 1;
        let generation = self.generation;
        let engine = Arc::clone(&self.engine);
        let voices = Arc::clone(&self.voices);
        let params = self.params.clone();

        self.current = Some(tokio::spawn(async move {
            for task in tasks {
                let live = voices.list_voices();
                let voice = resolve_voice(&live, task.voice_id.as_deref());

                if let Err(e) = engine.speak(&task.text, voice, &params).await {
                    log::warn!("speech task skipped (generation {generation}): {e}");
                }
            }
        }));
    }

    /// Hard-cancel whatever is playing or queued.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.abort();
        }
        self.engine.cancel_all();
    }

    /// Wait for the current generation to finish (test hook).
    #[cfg(test)]
    pub(crate) async fn join_current(&mut self) {
        if let Some(handle) = self.current.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for SpeechSequencer {
    fn drop(&mut self) {
        if let Some(handle) = self.current.take() {
            handle.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
