//! Text render pipeline — projected column values to display lines.
//!
//! Rendering is asynchronous because transliteration is: each engine
//! generation spawns one render, and the engine discards the outcome if a
//! newer generation has been presented by the time it resolves.  The
//! pipeline itself is stateless, so a clone per spawned render is cheap
//! (one `Arc` clone).

use std::sync::Arc;

use crate::config::{ColumnSettings, OverlayConfig};
use crate::record::Record;
use crate::transliterate::Transliterator;

use super::markup::remove_font_size;
use super::projection::project;

// ---------------------------------------------------------------------------
// RenderMode
// ---------------------------------------------------------------------------

/// How display values are assembled into lines.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderMode {
    /// One line per shown column; columns that render to an empty string are
    /// omitted entirely.
    BreakLines,
    /// All shown columns joined with the separator into a single line,
    /// prefixed with the record identifier (`"{id}. "`).  Columns are never
    /// omitted in this mode, only joined.
    SingleLineJoined(String),
}

impl RenderMode {
    /// Derive the mode from overlay configuration.
    pub fn from_overlay(overlay: &OverlayConfig) -> Self {
        if overlay.break_line {
            RenderMode::BreakLines
        } else {
            RenderMode::SingleLineJoined(overlay.separator.clone())
        }
    }
}

// ---------------------------------------------------------------------------
// TextRenderPipeline
// ---------------------------------------------------------------------------

/// Converts a record's projected column values into display lines.
#[derive(Clone)]
pub struct TextRenderPipeline {
    transliterator: Arc<dyn Transliterator>,
}

impl TextRenderPipeline {
    pub fn new(transliterator: Arc<dyn Transliterator>) -> Self {
        Self { transliterator }
    }

    /// Render `record` into display lines.
    ///
    /// Steps per shown column: strip inline `font-size` declarations, then
    /// (when `furigana` is on) transliterate.  In
    /// [`RenderMode::SingleLineJoined`] transliteration runs once over the
    /// whole joined line instead of per column.
    ///
    /// Transliteration failure falls back to the untransliterated text; it
    /// is logged here and never surfaced to the caller.
    pub async fn render(
        &self,
        record: &Record,
        columns: &ColumnSettings,
        mode: &RenderMode,
        furigana: bool,
    ) -> Vec<String> {
        let projection = project(Some(record), columns);

        match mode {
            RenderMode::BreakLines => {
                let mut lines = Vec::with_capacity(projection.display.len());
                for value in &projection.display {
                    let text = remove_font_size(&value.value);
                    let text = self.maybe_transliterate(text, furigana).await;
                    if text.trim().is_empty() {
                        continue;
                    }
                    lines.push(text);
                }
                lines
            }

            RenderMode::SingleLineJoined(separator) => {
                let joined = projection
                    .display
                    .iter()
                    .map(|v| remove_font_size(&v.value))
                    .collect::<Vec<_>>()
                    .join(separator);
                let line = format!("{}. {}", record.id, joined);
                vec![self.maybe_transliterate(line, furigana).await]
            }
        }
    }

    async fn maybe_transliterate(&self, text: String, furigana: bool) -> String {
        if !furigana {
            return text;
        }
        match self.transliterator.transliterate(&text).await {
            Ok(converted) => converted,
            Err(e) => {
                log::warn!("transliteration failed, using original text: {e}");
                text
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnSetting;
    use crate::transliterate::TransliterateError;
    use async_trait::async_trait;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Transliterator that brackets its input so tests can see it ran.
    struct Bracketing;

    #[async_trait]
    impl Transliterator for Bracketing {
        async fn transliterate(&self, text: &str) -> Result<String, TransliterateError> {
            Ok(format!("[{text}]"))
        }
    }

    /// Transliterator that always fails.
    struct Failing;

    #[async_trait]
    impl Transliterator for Failing {
        async fn transliterate(&self, _text: &str) -> Result<String, TransliterateError> {
            Err(TransliterateError::Conversion("dictionary not loaded".into()))
        }
    }

    fn pipeline(t: impl Transliterator + 'static) -> TextRenderPipeline {
        TextRenderPipeline::new(Arc::new(t))
    }

    fn cat_record() -> Record {
        Record::new(
            1,
            vec!["<span style='font-size:20px'>猫</span>".into(), "cat".into()],
        )
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    /// The joined-line scenario: font-size attribute removed, tag preserved,
    /// identifier prefixed, separator between columns.
    #[tokio::test]
    async fn single_line_joins_with_id_prefix() {
        let lines = pipeline(Bracketing)
            .render(
                &cat_record(),
                &ColumnSettings::default(),
                &RenderMode::SingleLineJoined(" | ".into()),
                false,
            )
            .await;

        assert_eq!(lines, vec!["1. <span>猫</span> | cat"]);
    }

    /// Break-line mode with column 1 hidden: only column 0 survives.
    #[tokio::test]
    async fn break_lines_suppresses_hidden_column() {
        let columns = ColumnSettings(vec![ColumnSetting {
            index: 1,
            is_shown: false,
            is_speech: false,
            voice_id: None,
        }]);

        let lines = pipeline(Bracketing)
            .render(&cat_record(), &columns, &RenderMode::BreakLines, false)
            .await;

        assert_eq!(lines, vec!["<span>猫</span>"]);
    }

    /// Break-line mode omits columns whose value renders to an empty string.
    #[tokio::test]
    async fn break_lines_omits_empty_values() {
        let record = Record::new(2, vec!["".into(), "  ".into(), "dog".into()]);

        let lines = pipeline(Bracketing)
            .render(
                &record,
                &ColumnSettings::default(),
                &RenderMode::BreakLines,
                false,
            )
            .await;

        assert_eq!(lines, vec!["dog"]);
    }

    /// Joined mode never omits a column, only joins.
    #[tokio::test]
    async fn single_line_keeps_empty_values() {
        let record = Record::new(3, vec!["".into(), "dog".into()]);

        let lines = pipeline(Bracketing)
            .render(
                &record,
                &ColumnSettings::default(),
                &RenderMode::SingleLineJoined("/".into()),
                false,
            )
            .await;

        assert_eq!(lines, vec!["3. /dog"]);
    }

    /// Furigana on: break-line mode transliterates each line separately.
    #[tokio::test]
    async fn break_lines_transliterates_per_column() {
        let record = Record::new(4, vec!["猫".into(), "犬".into()]);

        let lines = pipeline(Bracketing)
            .render(
                &record,
                &ColumnSettings::default(),
                &RenderMode::BreakLines,
                true,
            )
            .await;

        assert_eq!(lines, vec!["[猫]", "[犬]"]);
    }

    /// Furigana on: joined mode transliterates once over the whole line.
    #[tokio::test]
    async fn single_line_transliterates_once() {
        let record = Record::new(5, vec!["猫".into(), "犬".into()]);

        let lines = pipeline(Bracketing)
            .render(
                &record,
                &ColumnSettings::default(),
                &RenderMode::SingleLineJoined("・".into()),
                true,
            )
            .await;

        assert_eq!(lines, vec!["[5. 猫・犬]"]);
    }

    /// Transliteration failure falls back to the untransformed text.
    #[tokio::test]
    async fn transliteration_failure_falls_back() {
        let record = Record::new(6, vec!["猫".into()]);

        let lines = pipeline(Failing)
            .render(
                &record,
                &ColumnSettings::default(),
                &RenderMode::BreakLines,
                true,
            )
            .await;

        assert_eq!(lines, vec!["猫"]);
    }

    /// Mode derivation follows the break-line flag and separator setting.
    #[test]
    fn mode_from_overlay_config() {
        let mut overlay = OverlayConfig::default();
        assert_eq!(
            RenderMode::from_overlay(&overlay),
            RenderMode::SingleLineJoined("🍠".into())
        );

        overlay.break_line = true;
        assert_eq!(RenderMode::from_overlay(&overlay), RenderMode::BreakLines);
    }
}
