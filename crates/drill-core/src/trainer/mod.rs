//! High-level async API over the training database.
//!
//! [`Trainer`] is what interface layers (the CLI, a query API) talk to. Each
//! call opens the SQLite file on a blocking worker thread, runs one
//! [`Database`] operation there and hands the result back to the async
//! caller:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Trainer      │    │  spawn_blocking │    │    Database     │
//! │  (async facade) │───▶│  (worker pool)  │───▶│ (rusqlite, tx)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Transactions never span two calls, so concurrent imports of different
//! files share nothing but the database file itself.
//!
//! # Example
//!
//! ```rust,no_run
//! use drill_core::{models::ExerciseType, params::CreateExercise, TrainerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let trainer = TrainerBuilder::new()
//!     .with_database_path(Some("drill.db"))
//!     .build()
//!     .await?;
//!
//! let exercise = trainer
//!     .create_exercise(&CreateExercise::new("Burpees", ExerciseType::Work))
//!     .await?;
//! println!("{exercise}");
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tokio::task;

use crate::{
    db::Database,
    error::{Result, TrainingError},
    import::RepsTable,
};

pub mod builder;
pub mod exercise_ops;
pub mod import_ops;
pub mod plan_ops;
pub mod session_ops;

#[cfg(test)]
mod tests;

pub use builder::TrainerBuilder;

/// Main entry point for exercise, plan and session operations.
pub struct Trainer {
    pub(crate) db_path: PathBuf,
    pub(crate) reps: RepsTable,
}

impl Trainer {
    pub(crate) fn new(db_path: PathBuf, reps: RepsTable) -> Self {
        Self { db_path, reps }
    }

    /// Path of the SQLite file this trainer operates on.
    pub fn database_path(&self) -> &std::path::Path {
        &self.db_path
    }

    /// Runs `op` against a freshly opened database on the blocking pool.
    pub(crate) async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| TrainingError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
