//! `RecordSource` trait and the file-backed JSON implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use super::Record;

// ---------------------------------------------------------------------------
// RecordSourceError
// ---------------------------------------------------------------------------

/// Errors that can occur while fetching a record set.
#[derive(Debug, Error)]
pub enum RecordSourceError {
    /// The dataset file or table could not be read.
    #[error("failed to read dataset {dataset:?}: {message}")]
    Io {
        dataset: String,
        message: String,
    },

    /// The dataset content could not be parsed into records.
    #[error("failed to parse dataset {dataset:?}: {message}")]
    Parse {
        dataset: String,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// RecordSource trait
// ---------------------------------------------------------------------------

/// Async collaborator that materialises a named dataset into records.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn RecordSource>`.  The engine calls this once per dataset change.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_records(&self, dataset: &str) -> Result<Vec<Record>, RecordSourceError>;
}

// ---------------------------------------------------------------------------
// JsonRecordSource
// ---------------------------------------------------------------------------

/// Record source backed by per-dataset JSON files in a directory.
///
/// Each dataset lives at `<root>/<dataset>.json` as an array of records:
///
/// ```json
/// [
///   { "id": 1, "columns": ["猫", "cat"], "created_at": "2024-01-01" }
/// ]
/// ```
pub struct JsonRecordSource {
    root: PathBuf,
}

impl JsonRecordSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl RecordSource for JsonRecordSource {
    async fn fetch_records(&self, dataset: &str) -> Result<Vec<Record>, RecordSourceError> {
        let path = self.root.join(format!("{dataset}.json"));

        let content =
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| RecordSourceError::Io {
                    dataset: dataset.to_string(),
                    message: e.to_string(),
                })?;

        let records: Vec<Record> =
            serde_json::from_str(&content).map_err(|e| RecordSourceError::Parse {
                dataset: dataset.to_string(),
                message: e.to_string(),
            })?;

        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn fetch_reads_records_from_json_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("animals.json");
        std::fs::write(
            &path,
            r#"[
                { "id": 1, "columns": ["猫", "cat"], "created_at": "2024-01-01" },
                { "id": 2, "columns": ["犬", "dog"], "created_at": "2024-01-02" }
            ]"#,
        )
        .expect("write dataset");

        let source = JsonRecordSource::new(dir.path());
        let records = source.fetch_records("animals").await.expect("fetch");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].column(0), Some("猫"));
        assert_eq!(records[1].column(1), Some("dog"));
    }

    #[tokio::test]
    async fn fetch_missing_dataset_is_io_error() {
        let dir = tempdir().expect("temp dir");
        let source = JsonRecordSource::new(dir.path());

        let err = source.fetch_records("nope").await.unwrap_err();
        assert!(matches!(err, RecordSourceError::Io { .. }));
    }

    #[tokio::test]
    async fn fetch_malformed_dataset_is_parse_error() {
        let dir = tempdir().expect("temp dir");
        std::fs::write(dir.path().join("bad.json"), "not json").expect("write");

        let source = JsonRecordSource::new(dir.path());
        let err = source.fetch_records("bad").await.unwrap_err();
        assert!(matches!(err, RecordSourceError::Parse { .. }));
    }
}
