//! Speech tasks and the task builder.

use crate::config::ColumnSettings;
use crate::record::Record;
use crate::render::{project, strip_markup};

use super::voice::Voice;

/// One speakable unit: markup-free text plus the voice to speak it with.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechTask {
    /// Plain text with all markup stripped.
    pub text: String,
    /// Voice id after build-time fallback; `None` only when no voices were
    /// available at build time.
    pub voice_id: Option<String>,
}

/// Build the ordered speech task list for one record.
///
/// Tasks come from the narrated subset of the projection, in ascending
/// content-index order — this is also the playback order.  Tasks whose text
/// strips to empty or whitespace are omitted.  Unset or stale voice ids fall
/// back to the first voice in `voices` here; the sequencer re-resolves
/// against the live directory again at playback time.
pub fn build_speech_tasks(
    record: Option<&Record>,
    columns: &ColumnSettings,
    voices: &[Voice],
) -> Vec<SpeechTask> {
    let projection = project(record, columns);

    projection
        .speech
        .into_iter()
        .filter_map(|value| {
            let text = strip_markup(&value.value);
            let text = text.trim();
            if text.is_empty() {
                return None;
            }

            let voice_id = value
                .voice_id
                .or_else(|| voices.first().map(|v| v.id.clone()));

            Some(SpeechTask {
                text: text.to_string(),
                voice_id,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
