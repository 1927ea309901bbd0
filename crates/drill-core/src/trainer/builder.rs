//! Builder for creating and configuring Trainer instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Trainer;
use crate::{
    db::Database,
    error::{Result, TrainingError},
    import::RepsTable,
};

/// Builder for creating and configuring Trainer instances.
#[derive(Debug, Clone)]
pub struct TrainerBuilder {
    database_path: Option<PathBuf>,
    reps: RepsTable,
}

impl TrainerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            reps: RepsTable::default(),
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/drill/drill.db` or `~/.local/share/drill/drill.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the reps table used when importing sessions.
    pub fn with_reps_table(mut self, reps: RepsTable) -> Self {
        self.reps = reps;
        self
    }

    /// Builds the configured trainer, creating the database file and schema
    /// if needed.
    ///
    /// # Errors
    ///
    /// Returns `TrainingError::FileSystem` if the database directory cannot
    /// be created and `TrainingError::Database` if schema setup fails.
    pub async fn build(self) -> Result<Trainer> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TrainingError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), TrainingError>(())
        })
        .await
        .map_err(|e| TrainingError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Trainer::new(db_path, self.reps))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("drill")
            .place_data_file("drill.db")
            .map_err(|e| TrainingError::XdgDirectory(e.to_string()))
    }
}

impl Default for TrainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
