//! Session and Record models.

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use super::Exercise;

/// A recorded training session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Unique identifier for the session
    pub id: u64,

    /// Short name for the user to identify the session
    pub name: String,

    /// What the session is about
    #[serde(default)]
    pub description: String,

    /// What went well or badly, injuries, why it was aborted...
    #[serde(default)]
    pub notes: String,

    /// When the session started. May precede the first record, e.g. time
    /// spent preparing material.
    pub start: Timestamp,

    /// Records in insertion order
    #[serde(default)]
    pub records: Vec<Record>,
}

impl Session {
    /// End of the last record, if any.
    pub fn end(&self) -> Option<Timestamp> {
        self.records.iter().map(|record| record.end).max()
    }

    /// Sum of the reps of all WORK records.
    pub fn total_reps(&self) -> u64 {
        self.records.iter().map(|record| u64::from(record.reps)).sum()
    }
}

/// One executed exercise inside a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub id: u64,

    /// ID of the owning session
    pub session_id: u64,

    /// Executed exercise (not owned)
    pub exercise: Exercise,

    /// When the execution started (UTC)
    pub start: Timestamp,

    /// When the execution finished (UTC)
    pub end: Timestamp,

    /// Repetitions performed; zero for REST and PREPARATION
    #[serde(default)]
    pub reps: u32,
}

impl Record {
    /// Wall-clock time spent on the record.
    pub fn duration(&self) -> SignedDuration {
        self.end.duration_since(self.start)
    }
}
