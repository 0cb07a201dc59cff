//! Transliteration collaborator.
//!
//! The overlay can annotate or convert display text before it is shown
//! (furigana-style reading aids).  The conversion runs out of
//! process or against a loaded dictionary, so the seam is an async trait:
//! a call may take arbitrarily long and may fail, and the render pipeline
//! treats failure as "use the original text".
//!
//! [`KanaTransliterator`] is the built-in implementation — a lightweight
//! katakana→hiragana normaliser on top of `wana_kana`.  Full kanji→furigana
//! engines plug in behind the same trait.

pub mod kana;

pub use kana::KanaTransliterator;

use async_trait::async_trait;
use thiserror::Error;

// ---------------------------------------------------------------------------
// TransliterateError
// ---------------------------------------------------------------------------

/// Errors that can occur during transliteration.
#[derive(Debug, Error)]
pub enum TransliterateError {
    /// The engine or its dictionary is not available.
    #[error("transliteration engine unavailable: {0}")]
    Unavailable(String),

    /// The text could not be converted.
    #[error("transliteration failed: {0}")]
    Conversion(String),
}

// ---------------------------------------------------------------------------
// Transliterator trait
// ---------------------------------------------------------------------------

/// Async trait for text transliteration.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn Transliterator>` across spawned render tasks.
#[async_trait]
pub trait Transliterator: Send + Sync {
    async fn transliterate(&self, text: &str) -> Result<String, TransliterateError>;
}
