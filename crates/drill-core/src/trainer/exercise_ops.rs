//! Exercise operations for the Trainer.

use super::Trainer;
use crate::{
    error::Result,
    models::Exercise,
    params::{CreateExercise, Id},
};

impl Trainer {
    /// Creates a new exercise.
    pub async fn create_exercise(&self, params: &CreateExercise) -> Result<Exercise> {
        let params = params.clone();
        self.with_database(move |db| db.create_exercise(&params))
            .await
    }

    /// Returns the exercise matching name, type and (if given) description,
    /// creating it when there is none. The flag is true for a new exercise.
    pub async fn get_or_create_exercise(
        &self,
        params: &CreateExercise,
    ) -> Result<(Exercise, bool)> {
        let params = params.clone();
        self.with_database(move |db| db.get_or_create_exercise(&params))
            .await
    }

    /// Retrieves an exercise by its ID.
    pub async fn get_exercise(&self, params: &Id) -> Result<Option<Exercise>> {
        let id = params.id;
        self.with_database(move |db| db.get_exercise(id)).await
    }

    /// Lists all exercises ordered by name.
    pub async fn list_exercises(&self) -> Result<Vec<Exercise>> {
        self.with_database(|db| db.list_exercises()).await
    }

    /// Deletes an exercise and every goal and record using it. Returns the
    /// deleted exercise, or `None` if it did not exist.
    pub async fn delete_exercise(&self, params: &Id) -> Result<Option<Exercise>> {
        let id = params.id;
        self.with_database(move |db| {
            let Some(exercise) = db.get_exercise(id)? else {
                return Ok(None);
            };
            db.delete_exercise(id)?;
            Ok(Some(exercise))
        })
        .await
    }
}
