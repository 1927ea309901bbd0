//! Parameter structures for drill operations.
//!
//! One plain struct per construction operation. Interface layers (the CLI,
//! a query API) build these from their own input types and hand them to
//! [`crate::Database`] or [`crate::Trainer`]. Optional fields fall back to
//! the constants in [`crate::defaults`].

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{defaults, models::ExerciseType};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating an exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExercise {
    /// Name of the exercise (required, non-blank)
    pub name: String,
    /// Optional instructions
    pub description: Option<String>,
    /// Semantic type
    pub exercise_type: ExerciseType,
}

impl CreateExercise {
    pub fn new(name: impl Into<String>, exercise_type: ExerciseType) -> Self {
        Self {
            name: name.into(),
            description: None,
            exercise_type,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or(defaults::EXERCISE_DESCRIPTION)
    }
}

/// One goal of a [`LoopInput`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalInput {
    /// Zero-based position inside the loop
    pub goal_index: u32,
    /// ID of an existing exercise
    pub exercise_id: u64,
    /// Target duration in seconds
    pub duration: Option<u32>,
    /// Target repetitions
    pub repetitions: Option<u32>,
    /// Wait for user confirmation after this goal
    #[serde(default)]
    pub pause: bool,
}

/// One loop of a [`CreatePlan`] tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopInput {
    /// Zero-based position inside the plan
    pub loop_index: u32,
    /// Repetitions of the goal sequence; defaults to one
    pub rounds: Option<u32>,
    pub description: Option<String>,
    #[serde(default)]
    pub goals: Vec<GoalInput>,
}

impl LoopInput {
    pub fn rounds_or_default(&self) -> u32 {
        self.rounds.unwrap_or(defaults::LOOP_ROUNDS)
    }

    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or(defaults::LOOP_DESCRIPTION)
    }
}

/// Parameters for creating a plan together with its loop/goal tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlan {
    /// Name of the plan (required, non-blank)
    pub name: String,
    pub description: Option<String>,
    /// Client-supplied creation instant
    pub created: Timestamp,
    #[serde(default)]
    pub loops: Vec<LoopInput>,
}

/// Parameters for appending a single loop to an existing plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLoop {
    pub plan_id: u64,
    pub loop_index: u32,
    pub rounds: Option<u32>,
    pub description: Option<String>,
}

/// Parameters for appending a single goal to an existing loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGoal {
    pub loop_id: u64,
    #[serde(flatten)]
    pub goal: GoalInput,
}

/// One record of a [`CreateSession`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordInput {
    /// ID of an existing exercise
    pub exercise_id: u64,
    pub start: Timestamp,
    pub end: Timestamp,
    /// Repetitions performed; defaults to zero
    pub reps: Option<u32>,
}

impl RecordInput {
    pub fn reps_or_default(&self) -> u32 {
        self.reps.unwrap_or(defaults::RECORD_REPS)
    }
}

/// Parameters for creating a session together with its records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    /// Name of the session (required, non-blank)
    pub name: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub start: Timestamp,
    #[serde(default)]
    pub records: Vec<RecordInput>,
}
