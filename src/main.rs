//! Headless demo driver for the overlay engine.
//!
//! Runs the full playback pipeline against a JSON dataset, printing display
//! lines to stdout and narrating through a logging speech engine.  The real
//! host wires the same engine to an overlay window; this binary exists so
//! the engine can be exercised end to end without one.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Build collaborators: JSON record source, kana transliterator,
//!    console speech engine and window host.
//! 4. Spawn the engine and select the dataset (first CLI argument, or the
//!    persisted `selected_dataset`).
//! 5. Print display lines until Ctrl-C.

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::sync::mpsc;

use glance_overlay::config::{AppConfig, AppPaths};
use glance_overlay::engine::{
    Collaborators, EngineCommand, EngineEvent, OverlayEngine, WindowError, WindowHost,
};
use glance_overlay::record::JsonRecordSource;
use glance_overlay::speech::{
    SpeechEngine, SpeechError, SpeechParams, StaticVoiceDirectory, Voice,
};
use glance_overlay::transliterate::KanaTransliterator;

// ---------------------------------------------------------------------------
// Console collaborators
// ---------------------------------------------------------------------------

/// Speech engine that logs utterances instead of synthesising audio.
struct ConsoleSpeech;

#[async_trait]
impl SpeechEngine for ConsoleSpeech {
    async fn speak(
        &self,
        text: &str,
        voice: Option<&Voice>,
        params: &SpeechParams,
    ) -> Result<(), SpeechError> {
        let voice = voice.map_or("default", |v| v.name.as_str());
        log::info!("speak [{voice}, rate {}]: {text}", params.rate);
        Ok(())
    }

    fn cancel_all(&self) {
        log::debug!("speech cancelled");
    }
}

/// Window host that logs resize requests.
struct ConsoleWindow;

#[async_trait]
impl WindowHost for ConsoleWindow {
    async fn request_resize(&self, width: f32, height: f32) -> Result<(), WindowError> {
        log::info!("overlay resize requested: {width}x{height}");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("glance overlay starting up");

    let paths = AppPaths::new();
    let config = AppConfig::load()?;

    let dataset = match std::env::args().nth(1) {
        Some(name) => name,
        None if !config.selected_dataset.is_empty() => config.selected_dataset.clone(),
        None => bail!(
            "no dataset selected — pass a dataset name or set one in {}",
            paths.settings_file.display()
        ),
    };

    let collaborators = Collaborators {
        records: Arc::new(JsonRecordSource::new(paths.datasets_dir.clone())),
        transliterator: Arc::new(KanaTransliterator),
        speech: Arc::new(ConsoleSpeech),
        voices: Arc::new(StaticVoiceDirectory(vec![Voice::new(
            "console",
            "Console",
            "und",
        )])),
        window: Arc::new(ConsoleWindow),
    };

    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (event_tx, mut event_rx) = mpsc::channel(64);

    let engine = OverlayEngine::new(
        config.overlay.clone(),
        config.columns.clone(),
        collaborators,
        event_tx,
    );
    let engine_task = tokio::spawn(engine.run(cmd_rx));

    cmd_tx
        .send(EngineCommand::SelectDataset(dataset))
        .await
        .ok();

    loop {
        tokio::select! {
            event = event_rx.recv() => match event {
                Some(EngineEvent::DisplayChanged { lines }) => {
                    for line in &lines {
                        println!("{line}");
                    }
                    println!("---");
                }
                Some(EngineEvent::DisplayCleared) => println!("(empty record set)"),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                log::info!("interrupted, shutting down");
                break;
            }
        }
    }

    cmd_tx.send(EngineCommand::Shutdown).await.ok();
    let _ = engine_task.await;
    Ok(())
}
