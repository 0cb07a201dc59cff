//! Record schema and record-source collaborator.
//!
//! A [`Record`] has an explicit shape — identifier, N content columns, and a
//! creation timestamp — declared once here.  Projection and rendering operate
//! on content-column indices, never on the incidental ordering of some
//! fetched row object.
//!
//! [`RecordSource`] is the async collaborator that materialises a named
//! dataset into `Vec<Record>`.  It is called once per dataset change; the
//! engine never polls it.

pub mod source;

pub use source::{JsonRecordSource, RecordSource, RecordSourceError};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One row of a user-imported record set.
///
/// `columns` holds the content columns in order; content index 0 is the first
/// user-visible column.  `created_at` is carried for display in the
/// management table but never shown in the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Record identifier, unique within its dataset.
    pub id: i64,
    /// Content columns, possibly containing inline HTML markup.
    pub columns: Vec<String>,
    /// Creation timestamp as stored by the record store.
    pub created_at: String,
}

impl Record {
    /// Convenience constructor for plain-text records.
    pub fn new(id: i64, columns: Vec<String>) -> Self {
        Self {
            id,
            columns,
            created_at: String::new(),
        }
    }

    /// The content column at `index`, if the record has one.
    pub fn column(&self, index: usize) -> Option<&str> {
        self.columns.get(index).map(String::as_str)
    }
}
