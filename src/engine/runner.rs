//! Overlay engine — drives the record cycle and all per-generation work.
//!
//! [`OverlayEngine`] owns the playback timer, the current record index, and
//! the injected collaborators, and responds to [`EngineCommand`]s received
//! over a `tokio::sync::mpsc` channel.
//!
//! # Generation flow
//!
//! ```text
//! timer tick (or load / reconfigure)
//!   └─▶ advance index, snapshot (record, settings), generation += 1
//!         ├─▶ build speech tasks ──▶ sequencer.play   (cancels previous)
//!         └─▶ spawn render(record) ─▶ RenderOutcome { token, lines }
//!               └─▶ token == latest generation?
//!                     ├─ yes ▶ EngineEvent::DisplayChanged
//!                     └─ no  ▶ discarded (record advanced meanwhile)
//! ```
//!
//! Every tick's render and speech work is based on the snapshot taken at
//! tick time; later settings changes never alter an in-flight render.  A
//! hung transliteration stalls only its own generation — the next tick
//! spawns an independent render that supersedes it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::config::{ColumnSettings, OverlayConfig};
use crate::record::{Record, RecordSource};
use crate::render::{RenderMode, TextRenderPipeline};
use crate::speech::{build_speech_tasks, SpeechEngine, SpeechParams, SpeechSequencer, VoiceDirectory};
use crate::transliterate::Transliterator;

use super::events::{EngineCommand, EngineEvent};
use super::playback::PlaybackState;
use super::resize::{ResizeReporter, WindowHost};

// ---------------------------------------------------------------------------
// RenderOutcome
// ---------------------------------------------------------------------------

/// Result of one spawned render, tagged with the generation that started it.
struct RenderOutcome {
    token: u64,
    lines: Vec<String>,
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// The external collaborators injected into the engine.
///
/// All are `Arc<dyn …>` so the host can share them with its own surfaces
/// (e.g. the configuration table also lists voices).
pub struct Collaborators {
    pub records: Arc<dyn RecordSource>,
    pub transliterator: Arc<dyn Transliterator>,
    pub speech: Arc<dyn SpeechEngine>,
    pub voices: Arc<dyn VoiceDirectory>,
    pub window: Arc<dyn WindowHost>,
}

// ---------------------------------------------------------------------------
// OverlayEngine
// ---------------------------------------------------------------------------

/// Drives the overlay's record cycle.
///
/// Create with [`OverlayEngine::new`], then call [`run`](Self::run) inside a
/// tokio task.  One engine instance exists per open overlay; dropping the
/// command sender tears it down.
pub struct OverlayEngine {
    overlay: OverlayConfig,
    columns: ColumnSettings,
    records: Vec<Record>,
    playback: Option<PlaybackState>,
    /// Monotonic generation counter; doubles as the render token.
    generation: u64,
    source: Arc<dyn RecordSource>,
    pipeline: TextRenderPipeline,
    sequencer: SpeechSequencer,
    voices: Arc<dyn VoiceDirectory>,
    resize: ResizeReporter,
    events_tx: mpsc::Sender<EngineEvent>,
}

impl OverlayEngine {
    /// Create a new engine.
    ///
    /// # Arguments
    ///
    /// * `overlay`       — playback / rendering settings snapshot.
    /// * `columns`       — per-column show / speak / voice settings.
    /// * `collaborators` — record source, transliterator, speech engine,
    ///                     voice directory and window host.
    /// * `events_tx`     — channel the host reads display changes from.
    pub fn new(
        overlay: OverlayConfig,
        columns: ColumnSettings,
        collaborators: Collaborators,
        events_tx: mpsc::Sender<EngineEvent>,
    ) -> Self {
        let params = SpeechParams {
            pitch: overlay.pitch,
            rate: overlay.rate,
        };
        let sequencer = SpeechSequencer::new(
            Arc::clone(&collaborators.speech),
            Arc::clone(&collaborators.voices),
            params,
        );

        Self {
            pipeline: TextRenderPipeline::new(Arc::clone(&collaborators.transliterator)),
            resize: ResizeReporter::new(Arc::clone(&collaborators.window)),
            source: collaborators.records,
            voices: collaborators.voices,
            sequencer,
            overlay,
            columns,
            records: Vec::new(),
            playback: None,
            generation: 0,
            events_tx,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the engine until `commands` is closed or `Shutdown` arrives.
    ///
    /// This is an `async fn` and should be spawned as a tokio task by the
    /// host that owns the overlay window.
    pub async fn run(mut self, mut commands: mpsc::Receiver<EngineCommand>) {
        let (render_tx, mut render_rx) = mpsc::channel::<RenderOutcome>(16);
        let mut timer: Option<Interval> = None;

        loop {
            tokio::select! {
                cmd = commands.recv() => {
                    match cmd {
                        None | Some(EngineCommand::Shutdown) => break,
                        Some(cmd) => self.handle_command(cmd, &mut timer, &render_tx).await,
                    }
                }

                Some(outcome) = render_rx.recv() => {
                    self.commit_render(outcome).await;
                }

                _ = tick_or_never(timer.as_mut()) => {
                    self.on_tick(&render_tx).await;
                }
            }
        }

        self.sequencer.cancel();
        log::info!("engine: shutting down");
    }

    // -----------------------------------------------------------------------
    // Command handling
    // -----------------------------------------------------------------------

    async fn handle_command(
        &mut self,
        cmd: EngineCommand,
        timer: &mut Option<Interval>,
        render_tx: &mpsc::Sender<RenderOutcome>,
    ) {
        match cmd {
            EngineCommand::SelectDataset(dataset) => {
                log::info!("engine: loading dataset {dataset:?}");
                match self.source.fetch_records(&dataset).await {
                    Ok(records) => self.load_records(records, timer, render_tx).await,
                    Err(e) => {
                        log::warn!("engine: dataset {dataset:?} failed to load: {e}");
                        self.load_records(Vec::new(), timer, render_tx).await;
                    }
                }
            }

            EngineCommand::LoadRecords(records) => {
                self.load_records(records, timer, render_tx).await;
            }

            EngineCommand::Reconfigure { overlay, columns } => {
                self.reconfigure(overlay, columns, timer, render_tx).await;
            }

            EngineCommand::Pause => {
                log::debug!("engine: paused");
                if let Some(playback) = self.playback.as_mut() {
                    playback.is_paused = true;
                }
                *timer = None;
                self.sequencer.cancel();
            }

            EngineCommand::Resume => {
                if self.playback.is_none() {
                    return;
                }
                log::debug!("engine: resumed");
                if let Some(playback) = self.playback.as_mut() {
                    playback.is_paused = false;
                }
                // Fresh full interval, never the remainder of the old one.
                *timer = Some(self.make_timer());
            }

            EngineCommand::ContentMeasured { width, height } => {
                if self.overlay.auto_resize {
                    self.resize.report(width, height);
                }
            }

            // Handled by the run loop before dispatch.
            EngineCommand::Shutdown => {}
        }
    }

    /// Replace the record set and restart playback from index 0.
    async fn load_records(
        &mut self,
        records: Vec<Record>,
        timer: &mut Option<Interval>,
        render_tx: &mpsc::Sender<RenderOutcome>,
    ) {
        self.records = records;
        self.sequencer.cancel();
        // Invalidate renders still in flight for the previous set.
        self.generation = self.generation.wrapping_add(1);

        if self.records.is_empty() {
            log::debug!("engine: record set empty, going idle");
            self.playback = None;
            *timer = None;
            let _ = self.events_tx.send(EngineEvent::DisplayCleared).await;
            return;
        }

        self.playback = Some(PlaybackState::new(self.overlay.order));
        *timer = Some(self.make_timer());
        self.present(render_tx).await;
    }

    /// Apply a new settings snapshot and re-present the current record.
    async fn reconfigure(
        &mut self,
        overlay: OverlayConfig,
        columns: ColumnSettings,
        timer: &mut Option<Interval>,
        render_tx: &mpsc::Sender<RenderOutcome>,
    ) {
        self.overlay = overlay;
        self.columns = columns;
        self.sequencer.set_params(SpeechParams {
            pitch: self.overlay.pitch,
            rate: self.overlay.rate,
        });

        if let Some(playback) = self.playback.as_mut() {
            playback.order = self.overlay.order;
        }

        if let Some(playback) = self.playback.as_ref() {
            // New interval takes effect immediately, index unchanged.
            *timer = if playback.is_paused {
                None
            } else {
                Some(self.make_timer())
            };
            self.present(render_tx).await;
        }
    }

    // -----------------------------------------------------------------------
    // Ticking and presentation
    // -----------------------------------------------------------------------

    async fn on_tick(&mut self, render_tx: &mpsc::Sender<RenderOutcome>) {
        let count = self.records.len();
        let Some(playback) = self.playback.as_mut() else {
            return;
        };
        playback.advance(count);
        self.present(render_tx).await;
    }

    /// Start a new generation for the current record: speech right away,
    /// display lines through the async render pipeline.
    async fn present(&mut self, render_tx: &mpsc::Sender<RenderOutcome>) {
        let (index, paused) = match self.playback.as_ref() {
            Some(p) => (p.current_index, p.is_paused),
            None => return,
        };
        let Some(record) = self.records.get(index).cloned() else {
            return;
        };

        self.generation = self.generation.wrapping_add(1);
        let token = self.generation;

        // Speech never waits on transliteration.  Skipped while paused so a
        // settings change under the pointer does not start narrating.
        if !paused {
            let voices = self.voices.list_voices();
            let tasks = build_speech_tasks(Some(&record), &self.columns, &voices);
            self.sequencer.play(tasks);
        }

        let pipeline = self.pipeline.clone();
        let columns = self.columns.clone();
        let mode = RenderMode::from_overlay(&self.overlay);
        let furigana = self.overlay.furigana;
        let render_tx = render_tx.clone();

        tokio::spawn(async move {
            let lines = pipeline.render(&record, &columns, &mode, furigana).await;
            // Engine already gone: the outcome is moot.
            let _ = render_tx.send(RenderOutcome { token, lines }).await;
        });
    }

    /// Commit a finished render unless a newer generation superseded it.
    async fn commit_render(&mut self, outcome: RenderOutcome) {
        if outcome.token != self.generation {
            log::debug!(
                "engine: discarding stale render (token {}, current generation {})",
                outcome.token,
                self.generation
            );
            return;
        }

        let _ = self
            .events_tx
            .send(EngineEvent::DisplayChanged {
                lines: outcome.lines,
            })
            .await;
    }

    fn make_timer(&self) -> Interval {
        let period = Duration::from_millis(self.overlay.interval_ms.max(1));
        // interval() fires immediately; the first tick must wait a full period.
        let mut timer = tokio::time::interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }
}

/// Await the next timer tick, or forever when playback is idle or paused.
async fn tick_or_never(timer: Option<&mut Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
