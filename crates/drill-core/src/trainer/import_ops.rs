//! Impetus import operations for the Trainer.

use std::path::PathBuf;

use super::Trainer;
use crate::{
    error::Result,
    import::{ImportSummary, PlanImporter, SessionImporter},
};

impl Trainer {
    /// Imports one Impetus file as Plans.
    ///
    /// Returns `Err` only when the file cannot be read or is not XML; broken
    /// workouts are listed in [`ImportSummary::failures`].
    pub async fn import_plan_file(&self, path: impl Into<PathBuf>) -> Result<ImportSummary> {
        let path = path.into();
        self.with_database(move |db| PlanImporter::new(db).import_file(&path))
            .await
    }

    /// Imports one Impetus file as Sessions, using the configured reps table.
    pub async fn import_session_file(&self, path: impl Into<PathBuf>) -> Result<ImportSummary> {
        let path = path.into();
        let reps = self.reps.clone();
        self.with_database(move |db| {
            SessionImporter::new(db)
                .with_reps_table(reps)
                .import_file(&path)
        })
        .await
    }

    /// Imports Plans from an Impetus document held in memory.
    pub async fn import_plans(&self, xml: impl Into<String>) -> Result<ImportSummary> {
        let xml = xml.into();
        self.with_database(move |db| PlanImporter::new(db).import_str(&xml))
            .await
    }

    /// Imports Sessions from an Impetus document held in memory.
    pub async fn import_sessions(&self, xml: impl Into<String>) -> Result<ImportSummary> {
        let xml = xml.into();
        let reps = self.reps.clone();
        self.with_database(move |db| {
            SessionImporter::new(db)
                .with_reps_table(reps)
                .import_str(&xml)
        })
        .await
    }
}
