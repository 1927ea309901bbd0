//! Session and Record construction and queries.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::{exercise_columns, exercise_queries::fetch_exercise, timestamp_column};
use crate::{
    defaults,
    error::{DatabaseResultExt, Result, TrainingError},
    models::{Exercise, Record, Session, SessionSummary},
    params::{CreateSession, RecordInput},
    validation::{ensure_chronological, ensure_not_blank, ensure_not_future, ensure_reps_match_type},
};

const INSERT_SESSION_SQL: &str =
    "INSERT INTO sessions (name, description, notes, start_time) VALUES (?1, ?2, ?3, ?4)";
const INSERT_RECORD_SQL: &str = "INSERT INTO records (session_id, exercise_id, start_time, end_time, reps) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_SESSION_SQL: &str =
    "SELECT id, name, description, notes, start_time FROM sessions WHERE id = ?1";
const SELECT_RECORDS_BY_SESSION_SQL: &str = "SELECT r.id, r.session_id, r.start_time, r.end_time, r.reps, e.id, e.name, e.description, e.exercise_type FROM records r JOIN exercises e ON e.id = r.exercise_id WHERE r.session_id = ?1 ORDER BY r.id";
const CHECK_SESSION_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM sessions WHERE id = ?1)";
const LIST_SESSION_SUMMARIES_SQL: &str = "SELECT s.id, s.name, s.description, s.start_time, (SELECT COUNT(*) FROM records r WHERE r.session_id = s.id), (SELECT COALESCE(SUM(r.reps), 0) FROM records r WHERE r.session_id = s.id) FROM sessions s ORDER BY s.start_time DESC, s.id DESC";
const DELETE_SESSION_SQL: &str = "DELETE FROM sessions WHERE id = ?1";

fn record_columns(row: &rusqlite::Row) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get::<_, i64>(0)? as u64,
        session_id: row.get::<_, i64>(1)? as u64,
        start: timestamp_column(row, 2)?,
        end: timestamp_column(row, 3)?,
        reps: row.get(4)?,
        exercise: exercise_columns(row, 5)?,
    })
}

/// Validates and inserts one record for an already resolved exercise.
///
/// Both instants must not be in the future, `end` must not precede `start`
/// and the reps must agree with the exercise type.
fn insert_record(
    conn: &Connection,
    session_id: u64,
    exercise: Exercise,
    input: &RecordInput,
    now: Timestamp,
) -> Result<Record> {
    let reps = input.reps_or_default();
    ensure_not_future("start", input.start, now)?;
    ensure_not_future("end", input.end, now)?;
    ensure_chronological(input.start, input.end)?;
    ensure_reps_match_type(exercise.exercise_type, reps)?;

    conn.execute(
        INSERT_RECORD_SQL,
        params![
            session_id as i64,
            exercise.id as i64,
            input.start.to_string(),
            input.end.to_string(),
            reps
        ],
    )
    .db_context("Failed to insert record")?;

    Ok(Record {
        id: conn.last_insert_rowid() as u64,
        session_id,
        exercise,
        start: input.start,
        end: input.end,
        reps,
    })
}

/// Resolves the exercise of a record input or fails with a reference error
/// describing the record.
fn resolve_record_exercise(conn: &Connection, input: &RecordInput) -> Result<Exercise> {
    fetch_exercise(conn, input.exercise_id)?.ok_or_else(|| {
        TrainingError::reference(format!(
            "Failed to create Record because the Exercise with ID {} does not exist. \
             Record data: start={}, end={}",
            input.exercise_id, input.start, input.end
        ))
    })
}

impl super::Database {
    /// Creates a session together with all of its records in one
    /// transaction. Any invalid record rolls back the whole session.
    pub fn create_session(&mut self, params: &CreateSession) -> Result<Session> {
        let now = Timestamp::now();
        ensure_not_blank("name", &params.name)?;
        ensure_not_future("start", params.start, now)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let description = params
            .description
            .as_deref()
            .unwrap_or(defaults::SESSION_DESCRIPTION);
        let notes = params.notes.as_deref().unwrap_or(defaults::SESSION_NOTES);

        tx.execute(
            INSERT_SESSION_SQL,
            params![params.name, description, notes, params.start.to_string()],
        )
        .db_context("Failed to insert session")?;

        let session_id = tx.last_insert_rowid() as u64;
        let mut records = Vec::with_capacity(params.records.len());
        for input in &params.records {
            let exercise = resolve_record_exercise(&tx, input)?;
            records.push(insert_record(&tx, session_id, exercise, input, now)?);
        }

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Created session {session_id} with {} records", records.len());

        Ok(Session {
            id: session_id,
            name: params.name.clone(),
            description: description.to_string(),
            notes: notes.to_string(),
            start: params.start,
            records,
        })
    }

    /// Appends one record to an existing session.
    pub fn add_record(&mut self, session_id: u64, input: &RecordInput) -> Result<Record> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_SESSION_EXISTS_SQL, params![session_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check session existence")?;
        if !exists {
            return Err(TrainingError::NotFound {
                entity: "Session",
                id: session_id,
            });
        }

        let exercise = resolve_record_exercise(&tx, input)?;
        let record = insert_record(&tx, session_id, exercise, input, Timestamp::now())?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(record)
    }

    /// Retrieves a session by its ID with records in insertion order.
    pub fn get_session(&self, id: u64) -> Result<Option<Session>> {
        let session = self
            .connection
            .query_row(SELECT_SESSION_SQL, params![id as i64], |row| {
                Ok(Session {
                    id: row.get::<_, i64>(0)? as u64,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    notes: row.get(3)?,
                    start: timestamp_column(row, 4)?,
                    records: Vec::new(),
                })
            })
            .optional()
            .db_context("Failed to query session")?;

        let Some(mut session) = session else {
            return Ok(None);
        };
        session.records = self.get_records(session.id)?;
        Ok(Some(session))
    }

    /// Records of a session in insertion order.
    pub fn get_records(&self, session_id: u64) -> Result<Vec<Record>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_RECORDS_BY_SESSION_SQL)
            .db_context("Failed to prepare query")?;

        let records = stmt
            .query_map(params![session_id as i64], record_columns)
            .db_context("Failed to query records")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read record row")?;

        Ok(records)
    }

    /// Lists all sessions, most recent first.
    pub fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let mut stmt = self
            .connection
            .prepare(LIST_SESSION_SUMMARIES_SQL)
            .db_context("Failed to prepare query")?;

        let summaries = stmt
            .query_map([], |row| {
                Ok(SessionSummary {
                    id: row.get::<_, i64>(0)? as u64,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    start: timestamp_column(row, 3)?,
                    total_records: row.get(4)?,
                    total_reps: row.get::<_, i64>(5)? as u64,
                })
            })
            .db_context("Failed to query sessions")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read session row")?;

        Ok(summaries)
    }

    /// Permanently deletes a session and its records. Returns false when no
    /// such session exists.
    pub fn delete_session(&mut self, id: u64) -> Result<bool> {
        let rows_affected = self
            .connection
            .execute(DELETE_SESSION_SQL, params![id as i64])
            .db_context("Failed to delete session")?;

        Ok(rows_affected > 0)
    }
}
