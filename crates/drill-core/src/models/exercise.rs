//! Exercise model and its semantic type.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What an exercise is for. Every classification and reps check matches on
/// this exhaustively.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    /// Effort that is counted in repetitions
    Work,
    /// Recovery between efforts
    Rest,
    /// Lead-in before the first effort ("Get ready", "Start", ...)
    Preparation,
}

impl FromStr for ExerciseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "work" => Ok(ExerciseType::Work),
            "rest" => Ok(ExerciseType::Rest),
            "preparation" | "prep" => Ok(ExerciseType::Preparation),
            _ => Err(format!("Invalid exercise type: {s}")),
        }
    }
}

impl ExerciseType {
    /// Database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Work => "work",
            ExerciseType::Rest => "rest",
            ExerciseType::Preparation => "preparation",
        }
    }

    /// Whether a record of this type must carry a positive rep count.
    ///
    /// Work without counted reps is modelled as one big rep, so WORK always
    /// counts; REST and PREPARATION never do.
    pub fn counts_reps(&self) -> bool {
        match self {
            ExerciseType::Work => true,
            ExerciseType::Rest | ExerciseType::Preparation => false,
        }
    }
}

/// A reusable exercise definition referenced by goals and records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    /// Unique identifier for the exercise
    pub id: u64,

    /// Short name, e.g. "Push ups"
    pub name: String,

    /// Free-text instructions (empty when unknown)
    #[serde(default)]
    pub description: String,

    /// Semantic type of the exercise
    pub exercise_type: ExerciseType,
}
