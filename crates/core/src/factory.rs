//! Constructors for composite tree components.

use chrono::{DateTime, Utc};
use medfolder_types::ComponentId;

use crate::{Folder, MedicalRecord, RecordItem};

/// Component construction operations.
///
/// This is a zero-sized type used for namespacing constructors for folders and records.
/// All methods are associated functions.
pub struct MedicalComponentFactory;

impl MedicalComponentFactory {
    /// Creates an empty folder.
    pub fn create_folder(id: impl Into<ComponentId>, name: impl Into<String>) -> Folder {
        Folder::new(id, name)
    }

    /// Creates a record leaf with an explicit display name.
    pub fn create_record(
        id: i64,
        name: impl Into<String>,
        date: DateTime<Utc>,
        diagnosis: impl Into<String>,
        treatment: impl Into<String>,
        notes: impl Into<String>,
        follow_up_date: Option<DateTime<Utc>>,
    ) -> RecordItem {
        RecordItem {
            id,
            name: name.into(),
            date,
            diagnosis: diagnosis.into(),
            treatment: treatment.into(),
            notes: notes.into(),
            follow_up_date,
        }
    }

    /// Creates a record leaf from an indexed record, named `"Record <id>"`.
    pub fn record_from(record: &MedicalRecord) -> RecordItem {
        Self::create_record(
            record.id,
            format!("Record {}", record.id),
            record.date,
            record.diagnosis.clone(),
            record.treatment.clone(),
            record.notes.clone(),
            record.follow_up_date,
        )
    }
}
