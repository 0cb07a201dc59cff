//! Rendering module — from raw record columns to display lines.
//!
//! This module provides:
//! * [`project`] / [`Projection`] — the show/speak/voice view of a record.
//! * [`remove_font_size`] / [`strip_markup`] — markup normalisation.
//! * [`TextRenderPipeline`] / [`RenderMode`] — async line assembly with
//!   optional transliteration.
//!
//! The engine owns stale-result discarding; everything here is pure with
//! respect to its inputs apart from the transliteration call.

pub mod markup;
pub mod pipeline;
pub mod projection;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use markup::{remove_font_size, strip_markup};
pub use pipeline::{RenderMode, TextRenderPipeline};
pub use projection::{project, ProjectedValue, Projection, SpeechValue};
