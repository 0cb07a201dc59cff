//! Glance overlay — playback and rendering engine for an always-on-top
//! record overlay.
//!
//! The overlay cycles through one record at a time from a user-selected
//! record set, optionally narrating it aloud and transliterating it, then
//! resizing itself to fit.  This crate is the temporal core of that tool:
//!
//! * [`engine`] — the [`OverlayEngine`](engine::OverlayEngine) run loop:
//!   playback timer, pause/resume, generation tokens, resize debouncing.
//! * [`render`] — column projection, markup normalisation, and the async
//!   text render pipeline.
//! * [`speech`] — speech task building and the hard-cancelling sequencer.
//! * [`record`] — the explicit record schema and the record-source seam.
//! * [`transliterate`] — the transliteration seam and a built-in kana
//!   normaliser.
//! * [`config`] — typed settings with TOML persistence.
//!
//! The record store, settings UI, window lifecycle and speech synthesiser
//! are external collaborators injected as trait objects; see
//! [`engine::Collaborators`].

pub mod config;
pub mod engine;
pub mod record;
pub mod render;
pub mod speech;
pub mod transliterate;
