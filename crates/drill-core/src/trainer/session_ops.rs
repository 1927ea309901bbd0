//! Session operations for the Trainer.

use super::Trainer;
use crate::{
    error::Result,
    models::{Record, Session, SessionSummary},
    params::{CreateSession, Id, RecordInput},
};

impl Trainer {
    /// Creates a session with its records in one transaction.
    pub async fn create_session(&self, params: &CreateSession) -> Result<Session> {
        let params = params.clone();
        self.with_database(move |db| db.create_session(&params))
            .await
    }

    /// Appends one record to an existing session.
    pub async fn add_record(&self, session_id: u64, input: &RecordInput) -> Result<Record> {
        let input = input.clone();
        self.with_database(move |db| db.add_record(session_id, &input))
            .await
    }

    /// Retrieves a session with its records.
    pub async fn get_session(&self, params: &Id) -> Result<Option<Session>> {
        let id = params.id;
        self.with_database(move |db| db.get_session(id)).await
    }

    /// Lists all sessions as summaries, most recent first.
    pub async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        self.with_database(|db| db.list_sessions()).await
    }

    /// Permanently deletes a session. Returns the deleted session, or `None`
    /// if it did not exist.
    pub async fn delete_session(&self, params: &Id) -> Result<Option<Session>> {
        let id = params.id;
        self.with_database(move |db| {
            let Some(session) = db.get_session(id)? else {
                return Ok(None);
            };
            db.delete_session(id)?;
            Ok(Some(session))
        })
        .await
    }
}
