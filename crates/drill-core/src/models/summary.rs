//! Compact list views of plans and sessions.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Plan, Session};

/// Plan header with loop and goal counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub created: Timestamp,
    pub last_updated: Timestamp,
    /// Number of loops in the plan
    pub total_loops: u32,
    /// Number of goals across all loops
    pub total_goals: u32,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id,
            name: plan.name.clone(),
            description: plan.description.clone(),
            created: plan.created,
            last_updated: plan.last_updated,
            total_loops: plan.loops.len() as u32,
            total_goals: plan.loops.iter().map(|l| l.goals.len() as u32).sum(),
        }
    }
}

/// Session header with record statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub start: Timestamp,
    /// Number of records in the session
    pub total_records: u32,
    /// Sum of reps across all records
    pub total_reps: u64,
}

impl From<&Session> for SessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            name: session.name.clone(),
            description: session.description.clone(),
            start: session.start,
            total_records: session.records.len() as u32,
            total_reps: session.total_reps(),
        }
    }
}
