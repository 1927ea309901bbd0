//! Reads Impetus workouts as recorded Sessions.
//!
//! Timers only carry durations while records need real instants, and
//! sessions have no loops. The workout is therefore flattened: a cursor
//! starts at the session date and every timer, in document order, becomes a
//! record from the cursor to cursor + duration, after which the cursor moves
//! to the record's end. A `loop` replays its whole timer sequence `rounds`
//! times.
//!
//! A workout is sized before it is expanded: one ending in the future or
//! expanding past [`defaults::IMPORT_MAX_RECORDS`] records is rejected.

use std::path::Path;

use jiff::{SignedDuration, Timestamp};
use log::{debug, info, warn};
use roxmltree::Node;

use super::{
    element_children, element_label, parse_blocks, parse_date, parse_document, read_file,
    required_attr, Block, ExerciseResolver, ImportFailure, ImportSummary, RepsTable, Timer,
    DESCRIPTION_ATTRIB, SUMMARY_ATTRIB,
};
use crate::{
    db::Database,
    defaults,
    error::{Result, TrainingError},
    models::ExerciseType,
    params::{CreateSession, RecordInput},
    validation::ensure_not_future,
};

/// A timer placed on the session timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTimer<'a> {
    pub timer: &'a Timer,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Record count and total seconds `blocks` expand to, without expanding them.
fn schedule_size(blocks: &[Block]) -> Result<(u64, u64)> {
    let overflow = || TrainingError::validation("rounds").with_reason("workout is too long");
    let mut records: u64 = 0;
    let mut seconds: u64 = 0;

    for block in blocks {
        let (rounds, timers) = match block {
            Block::Timer(timer) => (1, std::slice::from_ref(timer)),
            Block::Loop { rounds, timers } => (u64::from(*rounds), timers.as_slice()),
        };
        let round_seconds: u64 = timers.iter().map(|timer| u64::from(timer.seconds)).sum();
        records = rounds
            .checked_mul(timers.len() as u64)
            .and_then(|n| records.checked_add(n))
            .ok_or_else(overflow)?;
        seconds = rounds
            .checked_mul(round_seconds)
            .and_then(|n| seconds.checked_add(n))
            .ok_or_else(overflow)?;
    }

    Ok((records, seconds))
}

/// Instant at which the last timer of `blocks` ends when started at `start`.
pub fn schedule_end(blocks: &[Block], start: Timestamp) -> Result<Timestamp> {
    let (_, seconds) = schedule_size(blocks)?;
    i64::try_from(seconds)
        .ok()
        .and_then(|secs| start.checked_add(SignedDuration::from_secs(secs)).ok())
        .ok_or_else(|| {
            TrainingError::validation("end").with_reason(format!(
                "workout of {seconds}s starting at {start} ends out of range"
            ))
        })
}

/// Lays `blocks` out back to back starting at `start`, expanding loop rounds.
///
/// Fails before allocating anything when the expansion would exceed
/// [`defaults::IMPORT_MAX_RECORDS`] records.
pub fn flatten_blocks(blocks: &[Block], start: Timestamp) -> Result<Vec<ScheduledTimer<'_>>> {
    let (records, _) = schedule_size(blocks)?;
    if records > defaults::IMPORT_MAX_RECORDS {
        return Err(TrainingError::validation("records").with_reason(format!(
            "workout expands to {records} records, at most {} are allowed",
            defaults::IMPORT_MAX_RECORDS
        )));
    }

    let mut cursor = start;
    let mut schedule = Vec::with_capacity(records as usize);

    for block in blocks {
        match block {
            Block::Timer(timer) => schedule.push(place(&mut cursor, timer)?),
            Block::Loop { rounds, timers } => {
                for _ in 0..*rounds {
                    for timer in timers {
                        schedule.push(place(&mut cursor, timer)?);
                    }
                }
            }
        }
    }

    Ok(schedule)
}

/// Schedules `timer` at `cursor` and advances the cursor to its end.
fn place<'a>(cursor: &mut Timestamp, timer: &'a Timer) -> Result<ScheduledTimer<'a>> {
    let start = *cursor;
    let end = start
        .checked_add(SignedDuration::from_secs(i64::from(timer.seconds)))
        .map_err(|e| TrainingError::format(timer.seconds.to_string(), e.to_string()))?;
    *cursor = end;
    Ok(ScheduledTimer { timer, start, end })
}

/// Imports Impetus workouts into the database as Sessions.
pub struct SessionImporter<'db> {
    db: &'db mut Database,
    reps: RepsTable,
}

impl<'db> SessionImporter<'db> {
    pub fn new(db: &'db mut Database) -> Self {
        Self {
            db,
            reps: RepsTable::default(),
        }
    }

    /// Uses `reps` to decide how many reps each WORK record gets.
    pub fn with_reps_table(mut self, reps: RepsTable) -> Self {
        self.reps = reps;
        self
    }

    /// Imports every workout of the file at `path`.
    pub fn import_file(&mut self, path: &Path) -> Result<ImportSummary> {
        let content = read_file(path)?;
        let mut summary = self.import_str(&content)?;
        summary.source = Some(path.to_path_buf());
        Ok(summary)
    }

    /// Imports every workout of an XML document, one session transaction
    /// per workout. Failed workouts are collected, not propagated.
    pub fn import_str(&mut self, content: &str) -> Result<ImportSummary> {
        let document = parse_document(content)?;
        let mut summary = ImportSummary::default();

        for (position, workout) in element_children(document.root_element()).enumerate() {
            let label = element_label(workout, position);
            match self.import_workout(workout) {
                Ok(entities) => {
                    info!("Imported session '{label}' ({entities} entities)");
                    summary.imported += 1;
                    summary.entities_created += entities;
                }
                Err(error) => {
                    warn!("Failed to import session '{label}': {error}");
                    summary.failures.push(ImportFailure {
                        element: label,
                        error,
                    });
                }
            }
        }

        Ok(summary)
    }

    fn import_workout(&mut self, workout: Node<'_, '_>) -> Result<usize> {
        let name = required_attr(workout, DESCRIPTION_ATTRIB)?;
        let start = parse_date(name).map_err(|_| {
            TrainingError::format(
                name,
                format!("Not possible to understand the Session start datetime from its description: {name}"),
            )
        })?;
        let description = required_attr(workout, SUMMARY_ATTRIB)?;
        let blocks = parse_blocks(workout)?;
        ensure_not_future("end", schedule_end(&blocks, start)?, Timestamp::now())?;
        let schedule = flatten_blocks(&blocks, start)?;

        let db: &Database = self.db;
        let reps_table = &self.reps;
        let mut resolver = ExerciseResolver::new();
        let records = schedule
            .iter()
            .map(|scheduled| {
                debug!(
                    "Scheduling {} from {} to {}",
                    scheduled.timer, scheduled.start, scheduled.end
                );
                let reps = match scheduled.timer.exercise_type {
                    ExerciseType::Work => Some(reps_table.reps_for(&scheduled.timer.name)),
                    ExerciseType::Rest | ExerciseType::Preparation => None,
                };
                Ok(RecordInput {
                    exercise_id: resolver.resolve(db, scheduled.timer)?,
                    start: scheduled.start,
                    end: scheduled.end,
                    reps,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let session = self.db.create_session(&CreateSession {
            name: name.to_string(),
            description: Some(description.to_string()),
            notes: None,
            start,
            records,
        })?;

        Ok(1 + session.records.len() + resolver.created)
    }
}
