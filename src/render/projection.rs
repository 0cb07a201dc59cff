//! Column projection — the filtered, ordered view of a record's columns.
//!
//! [`project`] is a pure function of its inputs: it decides which content
//! columns are displayed and which are narrated, in ascending content-index
//! order.  Voice ids pass through as persisted; resolution against the live
//! voice directory happens at task-build and playback time so stale ids
//! degrade gracefully instead of failing here.

use crate::config::ColumnSettings;
use crate::record::Record;

/// A content column selected for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedValue {
    /// Content-column index the value came from.
    pub index: usize,
    /// Raw column value, markup untouched.
    pub value: String,
}

/// A content column selected for narration.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechValue {
    /// Content-column index the value came from.
    pub index: usize,
    /// Raw column value, markup untouched.
    pub value: String,
    /// Persisted voice id, unresolved.
    pub voice_id: Option<String>,
}

/// Result of projecting one record through the column settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    /// Shown columns, ascending content index.
    pub display: Vec<ProjectedValue>,
    /// Narrated subset of the shown columns, ascending content index.
    pub speech: Vec<SpeechValue>,
}

/// Project `record` through `columns`.
///
/// * Unconfigured columns default to shown, not spoken.
/// * A column is narrated only when it is both shown and speech-enabled.
/// * An absent record yields an empty projection; this never fails.
pub fn project(record: Option<&Record>, columns: &ColumnSettings) -> Projection {
    let Some(record) = record else {
        return Projection::default();
    };

    let mut projection = Projection::default();

    for (index, value) in record.columns.iter().enumerate() {
        if !columns.is_shown(index) {
            continue;
        }

        projection.display.push(ProjectedValue {
            index,
            value: value.clone(),
        });

        if columns.is_speech(index) {
            projection.speech.push(SpeechValue {
                index,
                value: value.clone(),
                voice_id: columns.voice_id(index).map(str::to_string),
            });
        }
    }

    projection
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnSetting;

    fn record() -> Record {
        Record::new(1, vec!["猫".into(), "cat".into(), "ねこ".into()])
    }

    #[test]
    fn absent_record_projects_empty() {
        let projection = project(None, &ColumnSettings::default());
        assert!(projection.display.is_empty());
        assert!(projection.speech.is_empty());
    }

    #[test]
    fn default_settings_show_everything_speak_nothing() {
        let projection = project(Some(&record()), &ColumnSettings::default());
        assert_eq!(projection.display.len(), 3);
        assert_eq!(projection.display[0].value, "猫");
        assert_eq!(projection.display[2].index, 2);
        assert!(projection.speech.is_empty());
    }

    #[test]
    fn hidden_column_is_excluded_from_both_lists() {
        let columns = ColumnSettings(vec![ColumnSetting {
            index: 1,
            is_shown: false,
            is_speech: true, // ignored: hidden columns are never narrated
            voice_id: None,
        }]);

        let projection = project(Some(&record()), &columns);
        assert_eq!(
            projection.display.iter().map(|v| v.index).collect::<Vec<_>>(),
            vec![0, 2]
        );
        assert!(projection.speech.is_empty());
    }

    #[test]
    fn speech_subset_keeps_ascending_index_order() {
        let columns = ColumnSettings(vec![
            ColumnSetting {
                index: 2,
                is_shown: true,
                is_speech: true,
                voice_id: Some("v2".into()),
            },
            ColumnSetting {
                index: 0,
                is_shown: true,
                is_speech: true,
                voice_id: None,
            },
        ]);

        let projection = project(Some(&record()), &columns);
        let indices: Vec<_> = projection.speech.iter().map(|v| v.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(projection.speech[1].voice_id.as_deref(), Some("v2"));
        assert!(projection.speech[0].voice_id.is_none());
    }

    #[test]
    fn settings_beyond_record_shape_are_ignored() {
        let columns = ColumnSettings(vec![ColumnSetting {
            index: 9,
            is_shown: true,
            is_speech: true,
            voice_id: None,
        }]);

        let projection = project(Some(&record()), &columns);
        assert_eq!(projection.display.len(), 3);
        assert!(projection.speech.is_empty());
    }
}
