//! Input validation shared by every construction path.
//!
//! A `loop_index` is the position of a Loop inside a Plan and a `goal_index`
//! the position of a Goal inside a Loop. Both must start at 0 and grow one by
//! one without skipping any number:
//!
//! - Good: 0, 1, 2, 3, 4
//! - Bad:  1, 2, 3, 4, 5 (no 0)
//! - Bad:  0, 1, 7, 8, 9 (gap between 1 and 7)
//! - Bad:  0, 1, 1, 2    (duplicate)
//!
//! Input order does not matter; indexes are checked on a sorted copy.

use std::collections::BTreeMap;

use jiff::Timestamp;

use crate::{
    error::{Result, TrainingError},
    models::ExerciseType,
    params::{GoalInput, LoopInput},
};

const PLAN_LABEL: &str = "Plan";
const LOOP_LABEL: &str = "Loop";
const GOAL_LABEL: &str = "Goal";

/// Checks that `indexes` is a permutation of `0..indexes.len()`.
///
/// `parent_label` names the container and `child_label` the items being
/// positioned, e.g. `("Plan", "Loop")`. Failures are reported in this order:
/// missing zero, duplicates (all of them, with occurrence counts), first gap.
pub fn validate_indexes(indexes: &[u32], parent_label: &str, child_label: &str) -> Result<()> {
    let mut sorted = indexes.to_vec();
    sorted.sort_unstable();

    if sorted.first() != Some(&0) {
        return Err(TrainingError::index_integrity(format!(
            "Missing first {parent_label}, first {parent_label} index must be 0 (zero)."
        )));
    }

    let mut occurrences: BTreeMap<u32, usize> = BTreeMap::new();
    for index in &sorted {
        *occurrences.entry(*index).or_default() += 1;
    }
    let duplicates: Vec<String> = occurrences
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(index, count)| format!("{child_label} index {index} was found {count} times"))
        .collect();
    if !duplicates.is_empty() {
        return Err(TrainingError::index_integrity(format!(
            "Duplicated {child_label} found in {parent_label}: {}",
            duplicates.join(", ")
        )));
    }

    for (expected, index) in sorted.iter().enumerate() {
        let expected = expected as u32;
        if *index != expected {
            return Err(TrainingError::index_integrity(format!(
                "{child_label} with index {index} found after index {}, but index {expected} was expected.",
                expected - 1
            )));
        }
    }

    Ok(())
}

/// Checks the Goal positions of one loop.
pub fn validate_goal_indexes(goals: &[GoalInput]) -> Result<()> {
    let indexes: Vec<u32> = goals.iter().map(|goal| goal.goal_index).collect();
    validate_indexes(&indexes, LOOP_LABEL, GOAL_LABEL)
}

/// Checks the Loop positions of one plan.
pub fn validate_loop_indexes(loops: &[LoopInput]) -> Result<()> {
    let indexes: Vec<u32> = loops.iter().map(|l| l.loop_index).collect();
    validate_indexes(&indexes, PLAN_LABEL, LOOP_LABEL)
}

/// Validates a whole loop/goal tree: the Loop sequence first, then the Goal
/// sequence of every loop. A plan without loops is valid; a loop without
/// goals is not.
pub fn validate_loop_and_goal_indexes(loops: &[LoopInput]) -> Result<()> {
    if loops.is_empty() {
        return Ok(());
    }
    validate_loop_indexes(loops)?;
    for l in loops {
        validate_goal_indexes(&l.goals)?;
    }
    Ok(())
}

/// Rejects empty or whitespace-only text.
pub fn ensure_not_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(TrainingError::validation(field).with_reason("must not be empty"));
    }
    Ok(())
}

/// Rejects zero.
pub fn ensure_positive(field: &str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(TrainingError::validation(field).with_reason("must be greater than 0"));
    }
    Ok(())
}

/// Rejects `Some(0)`; `None` is accepted.
pub fn ensure_positive_if_set(field: &str, value: Option<u32>) -> Result<()> {
    match value {
        Some(value) => ensure_positive(field, value),
        None => Ok(()),
    }
}

/// Rejects instants after `now`.
pub fn ensure_not_future(field: &str, value: Timestamp, now: Timestamp) -> Result<()> {
    if value > now {
        return Err(TrainingError::validation(field)
            .with_reason(format!("{value} is in the future (now is {now})")));
    }
    Ok(())
}

/// Rejects an `end` earlier than its `start`.
pub fn ensure_chronological(start: Timestamp, end: Timestamp) -> Result<()> {
    if end < start {
        return Err(TrainingError::validation("end")
            .with_reason(format!("{end} is before start {start}")));
    }
    Ok(())
}

/// Checks that record reps agree with the exercise type:
/// WORK needs reps > 0, REST and PREPARATION need reps == 0.
pub fn ensure_reps_match_type(exercise_type: ExerciseType, reps: u32) -> Result<()> {
    if exercise_type.counts_reps() == (reps > 0) {
        return Ok(());
    }
    Err(TrainingError::validation("reps").with_reason(format!(
        "exercise type and record reps are not aligned (WORK needs reps > 0, REST and \
         PREPARATION need reps = 0); got {} exercise with {reps} reps",
        exercise_type.as_str().to_uppercase()
    )))
}
