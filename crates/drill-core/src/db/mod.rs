//! SQLite persistence for exercises, plans and sessions.
//!
//! Every tree-shaped write (a Plan with its Loops and Goals, a Session with
//! its Records) runs inside one `rusqlite::Transaction`. A transaction that is
//! dropped without `commit()` rolls back, so an early `?` return from a
//! failed validation never leaves a partial tree behind.

use std::path::Path;

use jiff::Timestamp;
use rusqlite::{types::Type, Connection, Row};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{Exercise, ExerciseType},
};

pub mod exercise_queries;
pub mod migrations;
pub mod plan_queries;
pub mod session_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database file and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        Self::with_connection(connection)
    }

    /// Opens a private in-memory database, mostly useful for tests.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Reads an RFC 3339 text column as a timestamp.
pub(crate) fn timestamp_column(row: &Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads four consecutive exercise columns (id, name, description, type)
/// starting at `offset`.
pub(crate) fn exercise_columns(row: &Row, offset: usize) -> rusqlite::Result<Exercise> {
    let type_idx = offset + 3;
    let type_str: String = row.get(type_idx)?;
    let exercise_type = type_str.parse::<ExerciseType>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            type_idx,
            Type::Text,
            format!("Invalid exercise type: {type_str}").into(),
        )
    })?;

    Ok(Exercise {
        id: row.get::<_, i64>(offset)? as u64,
        name: row.get(offset + 1)?,
        description: row.get(offset + 2)?,
        exercise_type,
    })
}
