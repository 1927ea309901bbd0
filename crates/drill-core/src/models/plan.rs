//! Plan, Loop and Goal models.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Exercise;

/// A reusable workout template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Name of the plan
    pub name: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Creation instant as supplied by the client (UTC)
    pub created: Timestamp,

    /// Last modification instant (UTC)
    pub last_updated: Timestamp,

    /// Loops ordered by `loop_index` (eager-loaded by `get_plan`)
    #[serde(default)]
    pub loops: Vec<Loop>,
}

impl Plan {
    /// Total planned time in seconds, counting every round of every loop.
    /// Goals without a duration contribute nothing.
    pub fn total_duration(&self) -> u64 {
        self.loops.iter().map(Loop::total_duration).sum()
    }
}

/// A block of goals repeated `rounds` times.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Loop {
    pub id: u64,

    /// ID of the owning plan
    pub plan_id: u64,

    /// How many times the goal sequence is executed
    pub rounds: u32,

    /// Zero-based position of the loop inside the plan
    pub loop_index: u32,

    #[serde(default)]
    pub description: String,

    /// Goals ordered by `goal_index`
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl Loop {
    /// Duration of one round multiplied by the number of rounds.
    pub fn total_duration(&self) -> u64 {
        let round: u64 = self
            .goals
            .iter()
            .filter_map(|goal| goal.duration)
            .map(u64::from)
            .sum();
        round * u64::from(self.rounds)
    }
}

/// One exercise target inside a loop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: u64,

    /// ID of the owning loop
    pub loop_id: u64,

    /// Referenced exercise (not owned)
    pub exercise: Exercise,

    /// Zero-based position of the goal inside the loop
    pub goal_index: u32,

    /// Target duration in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,

    /// Target repetitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetitions: Option<u32>,

    /// Whether execution waits for the user to confirm before moving on
    pub pause: bool,
}
