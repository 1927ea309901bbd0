//! Default field values, one constant per entity field.
//!
//! Callers resolve these at construction time; nothing is looked up from the
//! database schema.

/// Exercise description when none is given.
pub const EXERCISE_DESCRIPTION: &str = "";

/// Plan description when none is given.
pub const PLAN_DESCRIPTION: &str = "";

/// Rounds of a loop when none are given.
pub const LOOP_ROUNDS: u32 = 1;

/// Loop description when none is given.
pub const LOOP_DESCRIPTION: &str = "";

/// Session description when none is given.
pub const SESSION_DESCRIPTION: &str = "";

/// Session notes when none are given.
pub const SESSION_NOTES: &str = "";

/// Reps of a record when none are given.
pub const RECORD_REPS: u32 = 0;

/// Repetitions of every goal created by the Plan importer.
pub const IMPORT_GOAL_REPETITIONS: u32 = 1;

/// Reps of a WORK record whose exercise is not in the reps table.
pub const IMPORT_WORK_REPS: u32 = 1;

/// Upper bound on the records one imported session may expand to
pub const IMPORT_MAX_RECORDS: u64 = 10_000;
