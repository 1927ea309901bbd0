//! Exercise CRUD operations and lookups.

use rusqlite::{params, Connection, OptionalExtension};

use super::exercise_columns;
use crate::{
    error::{DatabaseResultExt, Result},
    models::{Exercise, ExerciseType},
    params::CreateExercise,
    validation::ensure_not_blank,
};

const INSERT_EXERCISE_SQL: &str =
    "INSERT INTO exercises (name, description, exercise_type) VALUES (?1, ?2, ?3)";
const SELECT_EXERCISE_SQL: &str =
    "SELECT id, name, description, exercise_type FROM exercises WHERE id = ?1";
const FIND_EXERCISE_SQL: &str = "SELECT id, name, description, exercise_type FROM exercises WHERE name = ?1 AND description = ?2 AND exercise_type = ?3 ORDER BY id LIMIT 1";
const FIND_EXERCISE_ANY_DESCRIPTION_SQL: &str = "SELECT id, name, description, exercise_type FROM exercises WHERE name = ?1 AND exercise_type = ?2 ORDER BY id LIMIT 1";
const LIST_EXERCISES_SQL: &str =
    "SELECT id, name, description, exercise_type FROM exercises ORDER BY name, id";
const DELETE_EXERCISE_SQL: &str = "DELETE FROM exercises WHERE id = ?1";

/// Fetches an exercise by id on any connection or open transaction.
pub(crate) fn fetch_exercise(conn: &Connection, id: u64) -> Result<Option<Exercise>> {
    conn.query_row(SELECT_EXERCISE_SQL, params![id as i64], |row| {
        exercise_columns(row, 0)
    })
    .optional()
    .db_context("Failed to query exercise")
}

impl super::Database {
    /// Creates a new exercise. Fails if the name is blank.
    pub fn create_exercise(&self, params: &CreateExercise) -> Result<Exercise> {
        ensure_not_blank("name", &params.name)?;
        let description = params.description_or_default();

        self.connection
            .execute(
                INSERT_EXERCISE_SQL,
                params![
                    params.name,
                    description,
                    params.exercise_type.as_str()
                ],
            )
            .db_context("Failed to insert exercise")?;

        Ok(Exercise {
            id: self.connection.last_insert_rowid() as u64,
            name: params.name.clone(),
            description: description.to_string(),
            exercise_type: params.exercise_type,
        })
    }

    /// Retrieves an exercise by its ID.
    pub fn get_exercise(&self, id: u64) -> Result<Option<Exercise>> {
        fetch_exercise(&self.connection, id)
    }

    /// Looks an exercise up by name and type, and by description too when
    /// one is given. The oldest match wins when several rows qualify.
    pub fn find_exercise(
        &self,
        name: &str,
        description: Option<&str>,
        exercise_type: ExerciseType,
    ) -> Result<Option<Exercise>> {
        let found = match description {
            Some(description) => self.connection.query_row(
                FIND_EXERCISE_SQL,
                params![name, description, exercise_type.as_str()],
                |row| exercise_columns(row, 0),
            ),
            None => self.connection.query_row(
                FIND_EXERCISE_ANY_DESCRIPTION_SQL,
                params![name, exercise_type.as_str()],
                |row| exercise_columns(row, 0),
            ),
        };
        found.optional().db_context("Failed to look up exercise")
    }

    /// Returns the matching exercise, creating it on a miss. The flag tells
    /// whether a new row was inserted.
    pub fn get_or_create_exercise(&self, params: &CreateExercise) -> Result<(Exercise, bool)> {
        if let Some(existing) = self.find_exercise(
            &params.name,
            params.description.as_deref(),
            params.exercise_type,
        )? {
            return Ok((existing, false));
        }
        Ok((self.create_exercise(params)?, true))
    }

    /// Lists all exercises ordered by name.
    pub fn list_exercises(&self) -> Result<Vec<Exercise>> {
        let mut stmt = self
            .connection
            .prepare(LIST_EXERCISES_SQL)
            .db_context("Failed to prepare query")?;

        let exercises = stmt
            .query_map([], |row| exercise_columns(row, 0))
            .db_context("Failed to query exercises")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read exercise row")?;

        Ok(exercises)
    }

    /// Permanently deletes an exercise together with every goal and record
    /// that references it. Returns false when no such exercise exists.
    pub fn delete_exercise(&mut self, id: u64) -> Result<bool> {
        let rows_affected = self
            .connection
            .execute(DELETE_EXERCISE_SQL, params![id as i64])
            .db_context("Failed to delete exercise")?;

        Ok(rows_affected > 0)
    }
}
