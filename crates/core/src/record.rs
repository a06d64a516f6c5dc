//! The medical record value type indexed by date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single medical record.
///
/// Records are plain values: once created they are not mutated. The `id` is not required to
/// be unique by anything in this crate; keeping ids unique is the caller's responsibility.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: i64,
    pub patient_id: i64,
    /// Date of the encounter. This is the ordering key of the index.
    pub date: DateTime<Utc>,
    pub diagnosis: String,
    pub treatment: String,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<DateTime<Utc>>,
}

impl MedicalRecord {
    pub fn new(
        id: i64,
        patient_id: i64,
        date: DateTime<Utc>,
        diagnosis: impl Into<String>,
        treatment: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id,
            patient_id,
            date,
            diagnosis: diagnosis.into(),
            treatment: treatment.into(),
            notes: notes.into(),
            follow_up_date: None,
        }
    }

    /// Returns this record with a follow-up date set.
    pub fn with_follow_up(mut self, follow_up_date: DateTime<Utc>) -> Self {
        self.follow_up_date = Some(follow_up_date);
        self
    }
}
